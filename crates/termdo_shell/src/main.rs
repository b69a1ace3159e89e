use std::env;
use std::fs::OpenOptions;
use std::time::Duration;

use anyhow::Context;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use termdo_api::{ApiClient, ApiConfig};
use termdo_shell::app::{Shell, ShellEvent};
use termdo_shell::commands::Dispatcher;
use termdo_tui::{ProcessTerminal, Terminal, TerminalGuard};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let client = ApiClient::new(api_config_from_env()?).context("failed to build API client")?;

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let resize_tx = events_tx.clone();

    let mut terminal = ProcessTerminal::new();
    terminal
        .start(
            Box::new(move |data| {
                let _ = events_tx.send(ShellEvent::Input(data));
            }),
            Box::new(move || {
                let _ = resize_tx.send(ShellEvent::Resize);
            }),
        )
        .context("failed to start terminal")?;

    let hostname = env::var("TERMDO_HOSTNAME").unwrap_or_else(|_| "termdo".to_string());
    let mut shell = Shell::new(TerminalGuard::new(terminal), Dispatcher::new(client), hostname);
    shell.run(&mut events_rx).await;

    Ok(())
}

/// Log to a file when `TERMDO_LOG` names one; the terminal itself is in raw
/// mode, so stdout/stderr are never used for log output.
fn init_tracing() -> anyhow::Result<()> {
    let Ok(path) = env::var("TERMDO_LOG") else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {path}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(move || file.try_clone().expect("log file handle clone"))
        .with_ansi(false)
        .init();
    Ok(())
}

fn api_config_from_env() -> anyhow::Result<ApiConfig> {
    let mut config = match env::var("TERMDO_API_URL") {
        Ok(url) => ApiConfig::new(url),
        Err(_) => ApiConfig::default(),
    };
    if let Ok(secs) = env::var("TERMDO_TIMEOUT_SECS") {
        let secs: u64 = secs
            .parse()
            .context("TERMDO_TIMEOUT_SECS must be an integer number of seconds")?;
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}
