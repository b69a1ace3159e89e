use std::fmt;

/// Failure taxonomy for remote-backed operations.
///
/// Constructed only at the client boundary and consumed immediately by the
/// calling command handler; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    /// The remote rejected the credentials or session. Callers must drop the
    /// authenticated session in response.
    Auth,
    /// One or more user-facing messages, printed verbatim one per line.
    Validation(Vec<String>),
    /// Network, protocol, or decode trouble; surfaced as one generic line.
    Transport(String),
}

impl Failure {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auth => write!(f, "authentication rejected"),
            Self::Validation(messages) => write!(f, "{}", messages.join("; ")),
            Self::Transport(message) => write!(f, "transport failure: {message}"),
        }
    }
}

impl std::error::Error for Failure {}

impl From<reqwest::Error> for Failure {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

impl From<serde_json::Error> for Failure {
    fn from(error: serde_json::Error) -> Self {
        Self::Transport(format!("malformed response body: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::Failure;

    #[test]
    fn validation_joins_messages_for_display() {
        let failure = Failure::Validation(vec!["Title is required.".into(), "Too long.".into()]);
        assert_eq!(failure.to_string(), "Title is required.; Too long.");
    }

    #[test]
    fn variants_compare_by_content() {
        assert_eq!(Failure::Auth, Failure::Auth);
        assert_ne!(Failure::Auth, Failure::transport("down"));
    }
}
