//! Dispatcher behavior: help precedence, role gating, and local commands.
//!
//! The client points at an unroutable address with a short timeout, so any
//! accidental network call either fails fast as a transport error or, for the
//! paths under test here, never happens at all.

use std::time::Duration;

use termdo_api::{ApiClient, ApiConfig};
use termdo_shell::commands::Dispatcher;
use termdo_shell::session::{Identity, Session};

fn dispatcher() -> Dispatcher {
    let config =
        ApiConfig::new("http://192.0.2.1:9/api").with_timeout(Duration::from_millis(250));
    Dispatcher::new(ApiClient::new(config).expect("client builds"))
}

fn user_session() -> Session {
    let mut session = Session::new();
    session.apply(Identity::User("maya".to_string()));
    session
}

#[tokio::test]
async fn empty_line_produces_no_output() {
    let output = dispatcher().dispatch(&Session::new(), &[], "", 80).await;
    assert!(output.lines.is_empty());
    assert!(output.transition.is_none());
}

#[tokio::test]
async fn unknown_command_is_reported() {
    let output = dispatcher().dispatch(&Session::new(), &[], "sudo ls", 80).await;
    assert_eq!(output.lines, ["Unknown command: sudo"]);
}

#[tokio::test]
async fn help_flag_takes_precedence_over_gating_and_validation() {
    // `ls` is gated for root, but `--help` must still print usage.
    let output = dispatcher().dispatch(&Session::new(), &[], "ls --help", 80).await;
    assert!(output.lines[0].starts_with("Usage: ls"));

    // `-h` too, even with otherwise-invalid arguments.
    let output = dispatcher()
        .dispatch(&Session::new(), &[], "adduser -h", 80)
        .await;
    assert!(output.lines[0].starts_with("Usage: adduser"));
}

#[tokio::test]
async fn task_commands_are_rejected_for_root() {
    for line in ["ls", "touch x", "cat 1", "rm 1", "edit 1 -t x"] {
        let output = dispatcher().dispatch(&Session::new(), &[], line, 80).await;
        assert_eq!(
            output.lines,
            ["You must be logged in to manage tasks. Try `su <username> <password>`."],
            "for command line {line:?}"
        );
        assert!(output.transition.is_none());
    }
}

#[tokio::test]
async fn exit_is_rejected_for_root_and_adduser_for_users() {
    let output = dispatcher().dispatch(&Session::new(), &[], "exit", 80).await;
    assert_eq!(output.lines, ["You cannot exit as the root user."]);

    let output = dispatcher()
        .dispatch(&user_session(), &[], "adduser ana pw", 80)
        .await;
    assert_eq!(output.lines, ["You must be logged in as root to add a user."]);
}

#[tokio::test]
async fn echo_joins_arguments() {
    let output = dispatcher()
        .dispatch(&Session::new(), &[], "echo hello \"wide world\"", 80)
        .await;
    assert_eq!(output.lines, ["hello wide world"]);
}

#[tokio::test]
async fn whoami_reports_the_identity() {
    let output = dispatcher().dispatch(&Session::new(), &[], "whoami", 80).await;
    assert_eq!(output.lines, ["root"]);

    let output = dispatcher()
        .dispatch(&user_session(), &[], "whoami", 80)
        .await;
    assert_eq!(output.lines, ["maya"]);
}

#[tokio::test]
async fn which_prints_a_path_or_usage() {
    let output = dispatcher().dispatch(&Session::new(), &[], "which ls", 80).await;
    assert_eq!(output.lines, ["/usr/bin/ls"]);

    let output = dispatcher().dispatch(&Session::new(), &[], "which", 80).await;
    assert!(output.lines[0].starts_with("Usage: which"));
}

#[tokio::test]
async fn history_prints_oldest_first() {
    let history = vec!["second".to_string(), "first".to_string()];
    let output = dispatcher()
        .dispatch(&Session::new(), &history, "history", 80)
        .await;
    assert_eq!(output.lines, ["first", "second"]);
}

#[tokio::test]
async fn su_validates_arguments_before_any_network_call() {
    let output = dispatcher().dispatch(&Session::new(), &[], "su", 80).await;
    assert_eq!(output.lines, ["Error: Username is required."]);

    let output = dispatcher().dispatch(&Session::new(), &[], "su maya", 80).await;
    assert_eq!(
        output.lines,
        ["Error: Password is required for non-root users."]
    );
}

#[tokio::test]
async fn touch_requires_a_title_before_any_network_call() {
    let output = dispatcher()
        .dispatch(&user_session(), &[], "touch", 80)
        .await;
    assert_eq!(output.lines, ["Error: Title is required."]);
}

#[tokio::test]
async fn edit_requires_a_change_flag_before_any_network_call() {
    let output = dispatcher()
        .dispatch(&user_session(), &[], "edit 3", 80)
        .await;
    assert_eq!(
        output.lines,
        ["Error: Nothing to change. Provide --title, --description, or --completed."]
    );
}

#[tokio::test]
async fn cat_rejects_non_positive_ids() {
    for line in ["cat", "cat 0", "cat -7", "cat seven"] {
        let output = dispatcher().dispatch(&user_session(), &[], line, 80).await;
        assert_eq!(
            output.lines,
            ["Error: A positive task id is required."],
            "for command line {line:?}"
        );
    }
}

#[tokio::test]
async fn ls_rejects_unknown_options_and_bad_values() {
    let output = dispatcher()
        .dispatch(&user_session(), &[], "ls --sort id", 80)
        .await;
    assert_eq!(output.lines, ["Error: Invalid sort field 'id'."]);

    let output = dispatcher()
        .dispatch(&user_session(), &[], "ls --order sideways", 80)
        .await;
    assert_eq!(output.lines, ["Error: Invalid sort order 'sideways'."]);

    let output = dispatcher()
        .dispatch(&user_session(), &[], "ls --verbose", 80)
        .await;
    assert_eq!(output.lines, ["Error: Unknown option 'verbose'."]);
}

#[tokio::test]
async fn unreachable_gateway_surfaces_one_generic_line() {
    let output = dispatcher().dispatch(&user_session(), &[], "ls", 80).await;
    assert_eq!(output.lines, ["Error: Network failure. Please try again."]);
    assert!(output.transition.is_none());
}

#[tokio::test]
async fn clear_requests_a_screen_clear() {
    let output = dispatcher().dispatch(&Session::new(), &[], "clear", 80).await;
    assert!(output.clear_screen);
    assert!(output.lines.is_empty());
}
