//! Remote-backed command handlers: account transitions and task CRUD.

use termdo_api::{ApiClient, Failure, Task, TaskDraft};
use tracing::{debug, warn};

use crate::cmdline::{parse_options, positionals};
use crate::commands::CommandOutput;
use crate::session::Identity;
use crate::table;

const SESSION_EXPIRED: &str = "Session expired. Please log in again.";
const NETWORK_ERROR: &str = "Error: Network failure. Please try again.";

/// Failure mapping for task commands. A 401 means the session died out from
/// under us: flip back to root and show the session notice instead of a
/// generic error line.
fn task_failure(failure: Failure) -> CommandOutput {
    match failure {
        Failure::Auth => CommandOutput::line(SESSION_EXPIRED).with_transition(Identity::Root),
        Failure::Validation(messages) => CommandOutput::lines(messages),
        Failure::Transport(detail) => {
            warn!(%detail, "task command failed in transport");
            CommandOutput::line(NETWORK_ERROR)
        }
    }
}

/// Failure mapping for account commands, where a 401 is a credential problem
/// rather than an expired session.
fn account_failure(failure: Failure, auth_message: &str) -> CommandOutput {
    match failure {
        Failure::Auth => CommandOutput::line(auth_message),
        Failure::Validation(messages) => CommandOutput::lines(messages),
        Failure::Transport(detail) => {
            warn!(%detail, "account command failed in transport");
            CommandOutput::line(NETWORK_ERROR)
        }
    }
}

// >----- account commands -----< //

pub async fn su(client: &ApiClient, args: &[String]) -> CommandOutput {
    let Some(username) = args.first() else {
        return CommandOutput::line("Error: Username is required.");
    };

    if username == "root" {
        // Logging out is best-effort; the local identity resets regardless.
        if let Err(failure) = client.logout().await {
            debug!(%failure, "logout during `su root` failed");
        }
        return CommandOutput::line("Switched to user root.").with_transition(Identity::Root);
    }

    let Some(password) = args.get(1) else {
        return CommandOutput::line("Error: Password is required for non-root users.");
    };

    match client.login(username, password).await {
        Ok(account) => CommandOutput::line(format!("Switched to user {}.", account.username))
            .with_transition(Identity::User(account.username)),
        Err(failure) => account_failure(failure, "Error: Invalid username or password."),
    }
}

pub async fn adduser(client: &ApiClient, args: &[String]) -> CommandOutput {
    if args.len() < 2 {
        return CommandOutput::line("Error: Username and password are required.");
    }
    if args[0] == "root" {
        return CommandOutput::line("Error: Cannot create a user with the username 'root'.");
    }

    match client.signup(&args[0], &args[1]).await {
        Ok(account) => CommandOutput::line(format!(
            "User {} created successfully.",
            account.username
        ))
        .with_transition(Identity::User(account.username)),
        Err(failure) => account_failure(failure, "Error: Sign up was rejected."),
    }
}

pub async fn exit(client: &ApiClient) -> CommandOutput {
    if let Err(failure) = client.logout().await {
        debug!(%failure, "logout during `exit` failed");
    }
    CommandOutput::line("Logged out.").with_transition(Identity::Root)
}

// >----- task commands -----< //

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortField {
    Title,
    Description,
    IsCompleted,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    fn parse(value: &str) -> Option<Self> {
        let field = match value {
            "title" => Self::Title,
            "description" => Self::Description,
            "is-completed" => Self::IsCompleted,
            "created-at" => Self::CreatedAt,
            "updated-at" => Self::UpdatedAt,
            _ => return None,
        };
        Some(field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortOrder {
    Asc,
    Desc,
}

fn sort_tasks(tasks: &mut [Task], field: SortField, order: SortOrder) {
    tasks.sort_by(|a, b| {
        let ordering = match field {
            SortField::Title => a.title.cmp(&b.title),
            SortField::Description => a.description.cmp(&b.description),
            SortField::IsCompleted => a.is_completed.cmp(&b.is_completed),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn parse_bool_value(value: Option<&str>) -> Result<bool, ()> {
    match value {
        None => Ok(true),
        Some("true") => Ok(true),
        Some("false") => Ok(false),
        Some(_) => Err(()),
    }
}

pub async fn ls(client: &ApiClient, args: &[String], cols: usize) -> CommandOutput {
    let mut args = args.to_vec();
    let options = parse_options(&mut args);

    let mut field = SortField::UpdatedAt;
    let mut order = SortOrder::Desc;
    let mut completed: Option<bool> = None;

    for option in options {
        match option.key.as_str() {
            "sort" | "s" => {
                let Some(parsed) = option.value.as_deref().and_then(SortField::parse) else {
                    return CommandOutput::line(format!(
                        "Error: Invalid sort field '{}'.",
                        option.value.as_deref().unwrap_or("")
                    ));
                };
                field = parsed;
            }
            "order" | "o" => match option.value.as_deref() {
                Some("asc") => order = SortOrder::Asc,
                Some("desc") => order = SortOrder::Desc,
                other => {
                    return CommandOutput::line(format!(
                        "Error: Invalid sort order '{}'.",
                        other.unwrap_or("")
                    ));
                }
            },
            "completed" | "c" => match parse_bool_value(option.value.as_deref()) {
                Ok(value) => completed = Some(value),
                Err(()) => {
                    return CommandOutput::line(
                        "Error: --completed expects 'true' or 'false'.",
                    );
                }
            },
            other => {
                return CommandOutput::line(format!("Error: Unknown option '{other}'."));
            }
        }
    }

    match client.list_tasks().await {
        Ok(mut tasks) => {
            if let Some(done) = completed {
                tasks.retain(|task| task.is_completed == done);
            }
            sort_tasks(&mut tasks, field, order);
            CommandOutput::lines(listing_lines(&tasks, cols))
        }
        Err(failure) => task_failure(failure),
    }
}

fn listing_lines(tasks: &[Task], cols: usize) -> Vec<String> {
    let mut lines = vec![format!("Listing {} tasks:", tasks.len())];
    lines.extend(table::render(tasks, cols));
    lines
}

pub async fn touch(client: &ApiClient, args: &[String]) -> CommandOutput {
    let mut args = args.to_vec();
    let options = parse_options(&mut args);

    let mut title: Option<String> = None;
    let mut description = String::new();
    let mut completed = false;

    for option in options {
        match option.key.as_str() {
            "title" | "t" => match option.value {
                Some(value) => title = Some(value),
                None => return CommandOutput::line("Error: --title requires a value."),
            },
            "description" | "d" => match option.value {
                Some(value) => description = value,
                None => return CommandOutput::line("Error: --description requires a value."),
            },
            "completed" | "c" => match parse_bool_value(option.value.as_deref()) {
                Ok(value) => completed = value,
                Err(()) => {
                    return CommandOutput::line(
                        "Error: --completed expects 'true' or 'false'.",
                    );
                }
            },
            other => {
                return CommandOutput::line(format!("Error: Unknown option '{other}'."));
            }
        }
    }

    if title.is_none() {
        title = positionals(&args).first().map(|value| value.to_string());
    }
    let Some(title) = title else {
        return CommandOutput::line("Error: Title is required.");
    };

    let draft = TaskDraft::new(title)
        .with_description(description)
        .with_completed(completed);
    match client.create_task(&draft).await {
        Ok(task) => CommandOutput::line(format!("Created task {}.", task.id)),
        Err(failure) => task_failure(failure),
    }
}

fn parse_task_id(args: &[String]) -> Result<i64, CommandOutput> {
    let id = positionals(args)
        .first()
        .and_then(|value| value.parse::<i64>().ok())
        .filter(|id| *id > 0);
    id.ok_or_else(|| CommandOutput::line("Error: A positive task id is required."))
}

pub async fn cat(client: &ApiClient, args: &[String]) -> CommandOutput {
    let id = match parse_task_id(args) {
        Ok(id) => id,
        Err(output) => return output,
    };

    match client.get_task(id).await {
        Ok(task) => CommandOutput::lines(vec![
            format!("Task {}: {}", task.id, task.title),
            format!("  Description: {}", task.description),
            format!(
                "  Completed:   {}",
                if task.is_completed { "yes" } else { "no" }
            ),
            format!("  Created:     {}", table::format_date_time(task.created_at)),
            format!("  Updated:     {}", table::format_date_time(task.updated_at)),
        ]),
        Err(failure) => task_failure(failure),
    }
}

pub async fn rm(client: &ApiClient, args: &[String]) -> CommandOutput {
    let id = match parse_task_id(args) {
        Ok(id) => id,
        Err(output) => return output,
    };

    match client.delete_task(id).await {
        Ok(()) => CommandOutput::line(format!("Deleted task {id}.")),
        Err(failure) => task_failure(failure),
    }
}

pub async fn edit(client: &ApiClient, args: &[String]) -> CommandOutput {
    let mut args = args.to_vec();
    let options = parse_options(&mut args);

    let id = match parse_task_id(&args) {
        Ok(id) => id,
        Err(output) => return output,
    };

    let mut title: Option<String> = None;
    let mut description: Option<String> = None;
    let mut completed: Option<bool> = None;

    for option in options {
        match option.key.as_str() {
            "title" | "t" => match option.value {
                Some(value) => title = Some(value),
                None => return CommandOutput::line("Error: --title requires a value."),
            },
            "description" | "d" => match option.value {
                Some(value) => description = Some(value),
                None => return CommandOutput::line("Error: --description requires a value."),
            },
            "completed" | "c" => match parse_bool_value(option.value.as_deref()) {
                Ok(value) => completed = Some(value),
                Err(()) => {
                    return CommandOutput::line(
                        "Error: --completed expects 'true' or 'false'.",
                    );
                }
            },
            other => {
                return CommandOutput::line(format!("Error: Unknown option '{other}'."));
            }
        }
    }

    if title.is_none() && description.is_none() && completed.is_none() {
        return CommandOutput::line(
            "Error: Nothing to change. Provide --title, --description, or --completed.",
        );
    }

    // Fetch the current task so unchanged fields survive the update.
    let current = match client.get_task(id).await {
        Ok(task) => task,
        Err(failure) => return task_failure(failure),
    };

    let mut draft = TaskDraft::from(&current);
    if let Some(title) = title {
        draft.title = title;
    }
    if let Some(description) = description {
        draft.description = description;
    }
    if let Some(completed) = completed {
        draft.is_completed = completed;
    }

    match client.update_task(id, &draft).await {
        Ok(task) => CommandOutput::line(format!("Updated task {}.", task.id)),
        Err(failure) => task_failure(failure),
    }
}
