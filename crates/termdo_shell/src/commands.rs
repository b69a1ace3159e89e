//! Command table and dispatch.

use termdo_api::ApiClient;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::cmdline::tokenize;
use crate::session::{Identity, Session};
use crate::tasks;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Echo,
    Whoami,
    Which,
    History,
    Date,
    Clear,
    Su,
    Adduser,
    Exit,
    Ls,
    Touch,
    Cat,
    Rm,
    Edit,
}

pub const ALL_COMMANDS: [Command; 15] = [
    Command::Help,
    Command::Echo,
    Command::Whoami,
    Command::Which,
    Command::History,
    Command::Date,
    Command::Clear,
    Command::Su,
    Command::Adduser,
    Command::Exit,
    Command::Ls,
    Command::Touch,
    Command::Cat,
    Command::Rm,
    Command::Edit,
];

impl Command {
    pub fn parse(name: &str) -> Option<Self> {
        let command = match name {
            "help" => Self::Help,
            "echo" => Self::Echo,
            "whoami" => Self::Whoami,
            "which" => Self::Which,
            "history" => Self::History,
            "date" => Self::Date,
            "clear" => Self::Clear,
            "su" => Self::Su,
            "adduser" => Self::Adduser,
            "exit" => Self::Exit,
            "ls" => Self::Ls,
            "touch" => Self::Touch,
            "cat" => Self::Cat,
            "rm" => Self::Rm,
            "edit" => Self::Edit,
            _ => return None,
        };
        Some(command)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Echo => "echo",
            Self::Whoami => "whoami",
            Self::Which => "which",
            Self::History => "history",
            Self::Date => "date",
            Self::Clear => "clear",
            Self::Su => "su",
            Self::Adduser => "adduser",
            Self::Exit => "exit",
            Self::Ls => "ls",
            Self::Touch => "touch",
            Self::Cat => "cat",
            Self::Rm => "rm",
            Self::Edit => "edit",
        }
    }

    pub fn summary(self) -> &'static str {
        match self {
            Self::Help => "Show this help message",
            Self::Echo => "Print the provided text",
            Self::Whoami => "Print the current username",
            Self::Which => "Print the path of a command",
            Self::History => "Print the command history",
            Self::Date => "Print the current date and time",
            Self::Clear => "Clear the screen",
            Self::Su => "Switch to another user",
            Self::Adduser => "Create a new user (root only)",
            Self::Exit => "Log out the current user",
            Self::Ls => "List tasks",
            Self::Touch => "Create a task",
            Self::Cat => "Show a task",
            Self::Rm => "Delete a task",
            Self::Edit => "Update a task",
        }
    }

    pub fn usage(self) -> &'static [&'static str] {
        match self {
            Self::Help => &["Usage: help", "Shows the available commands."],
            Self::Echo => &["Usage: echo <text>", "Prints the provided text to the console."],
            Self::Whoami => &["Usage: whoami", "Prints the current username."],
            Self::Which => &[
                "Usage: which <command>",
                "Prints the path of the specified command.",
            ],
            Self::History => &["Usage: history", "Prints the command history."],
            Self::Date => &["Usage: date", "Prints the current date and time."],
            Self::Clear => &["Usage: clear", "Clears the screen."],
            Self::Su => &[
                "Usage: su <username> [<password>]",
                "Switches to the specified user. `su root` logs out and needs no password.",
            ],
            Self::Adduser => &[
                "Usage: adduser <username> <password>",
                "Creates a new user and switches to it. Requires the root identity.",
            ],
            Self::Exit => &["Usage: exit", "Logs out the current user."],
            Self::Ls => &[
                "Usage: ls [--sort <field>] [--order <asc|desc>] [--completed <true|false>]",
                "Lists tasks, most recently updated first by default.",
                "Sort fields: title, description, is-completed, created-at, updated-at.",
            ],
            Self::Touch => &[
                "Usage: touch <title> [--description <text>] [--completed [<true|false>]]",
                "Creates a task. The title may also be given with --title/-t.",
            ],
            Self::Cat => &["Usage: cat <id>", "Shows the task with the given id."],
            Self::Rm => &["Usage: rm <id>", "Deletes the task with the given id."],
            Self::Edit => &[
                "Usage: edit <id> [--title <text>] [--description <text>] [--completed <true|false>]",
                "Updates the given task. At least one change flag is required.",
            ],
        }
    }
}

/// What a dispatched command hands back to the shell loop.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub lines: Vec<String>,
    pub transition: Option<Identity>,
    pub clear_screen: bool,
}

impl CommandOutput {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn line(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
            ..Self::default()
        }
    }

    pub fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    pub fn with_transition(mut self, identity: Identity) -> Self {
        self.transition = Some(identity);
        self
    }
}

fn wants_help(args: &[String]) -> bool {
    args.iter().any(|arg| arg == "--help" || arg == "-h")
}

/// Maps command names to handlers. Handlers read the session and editor
/// history, may call the remote API, and produce output lines plus an
/// optional session transition.
#[derive(Debug)]
pub struct Dispatcher {
    client: ApiClient,
}

impl Dispatcher {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn dispatch(
        &self,
        session: &Session,
        history: &[String],
        line: &str,
        cols: usize,
    ) -> CommandOutput {
        let parsed = tokenize(line);
        if parsed.name.is_empty() {
            return CommandOutput::empty();
        }

        let Some(command) = Command::parse(&parsed.name) else {
            return CommandOutput::line(format!("Unknown command: {}", parsed.name));
        };

        // Help takes precedence over validation, gating, and side effects.
        if wants_help(&parsed.args) {
            return CommandOutput::lines(
                command.usage().iter().map(|line| line.to_string()).collect(),
            );
        }

        if let Err(denied) = session.authorize(command) {
            return CommandOutput::line(denied);
        }

        match command {
            Command::Help => help(),
            Command::Echo => CommandOutput::line(parsed.args.join(" ")),
            Command::Whoami => CommandOutput::line(session.username()),
            Command::Which => which(&parsed.args),
            Command::History => history_lines(history),
            Command::Date => date(),
            Command::Clear => CommandOutput {
                clear_screen: true,
                ..CommandOutput::default()
            },
            Command::Su => tasks::su(&self.client, &parsed.args).await,
            Command::Adduser => tasks::adduser(&self.client, &parsed.args).await,
            Command::Exit => tasks::exit(&self.client).await,
            Command::Ls => tasks::ls(&self.client, &parsed.args, cols).await,
            Command::Touch => tasks::touch(&self.client, &parsed.args).await,
            Command::Cat => tasks::cat(&self.client, &parsed.args).await,
            Command::Rm => tasks::rm(&self.client, &parsed.args).await,
            Command::Edit => tasks::edit(&self.client, &parsed.args).await,
        }
    }
}

fn help() -> CommandOutput {
    let mut lines = vec!["Available commands:".to_string()];
    for command in ALL_COMMANDS {
        lines.push(format!("  {:<8} - {}", command.name(), command.summary()));
    }
    CommandOutput::lines(lines)
}

fn which(args: &[String]) -> CommandOutput {
    let Some(name) = args.first() else {
        return CommandOutput::lines(
            Command::Which
                .usage()
                .iter()
                .map(|line| line.to_string())
                .collect(),
        );
    };
    CommandOutput::line(format!("/usr/bin/{name}"))
}

fn history_lines(history: &[String]) -> CommandOutput {
    // History is stored most-recent-first; print it oldest-first.
    CommandOutput::lines(history.iter().rev().cloned().collect())
}

fn date() -> CommandOutput {
    match OffsetDateTime::now_utc().format(&Rfc3339) {
        Ok(now) => CommandOutput::line(now),
        Err(_) => CommandOutput::line("Error: The current time is unavailable."),
    }
}
