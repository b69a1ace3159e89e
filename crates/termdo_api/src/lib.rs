//! Typed client for the termdo gateway API.
//!
//! Every remote-backed operation resolves to `Result<T, Failure>`: the only
//! way to inspect an outcome is to branch, and the failure taxonomy
//! (auth / validation / transport) is fixed at this crate boundary.

mod client;
mod config;
mod envelope;
mod error;
mod models;

pub use client::{ApiClient, ApiResult};
pub use config::ApiConfig;
pub use envelope::{ClientError, Envelope, Hostnames, HttpStatusInfo, ServerError};
pub use error::Failure;
pub use models::{Account, Task, TaskDraft};
