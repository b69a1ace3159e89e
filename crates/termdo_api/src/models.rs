//! Domain models and their wire payloads.

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::Failure;

/// Account payload returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_id: i64,
    pub username: String,
}

/// A task as held by the remote service. The shell only keeps transient
/// copies fetched per command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TaskPayload {
    pub task_id: i64,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl Task {
    pub(crate) fn from_payload(payload: TaskPayload) -> Result<Self, Failure> {
        if payload.task_id <= 0 {
            return Err(Failure::transport(format!(
                "task payload has non-positive id {}",
                payload.task_id
            )));
        }
        let created_at = parse_timestamp(&payload.created_at)?;
        let updated_at = parse_timestamp(&payload.updated_at)?;
        Ok(Self {
            id: payload.task_id,
            title: payload.title,
            description: payload.description,
            is_completed: payload.is_completed,
            created_at,
            updated_at,
        })
    }
}

fn parse_timestamp(value: &str) -> Result<OffsetDateTime, Failure> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|err| Failure::transport(format!("invalid task timestamp '{value}': {err}")))
}

/// Outgoing task body for create and update calls.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub is_completed: bool,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            is_completed: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_completed(mut self, is_completed: bool) -> Self {
        self.is_completed = is_completed;
        self
    }
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            is_completed: task.is_completed,
        }
    }
}
