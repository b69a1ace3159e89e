//! Session identity and command authorization.

use crate::commands::Command;

/// Who the shell is acting as.
///
/// `Root` is the default, unauthenticated elevated identity: it manages
/// accounts but has no task access. `User` is an account authenticated
/// against the remote API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Root,
    User(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    identity: Identity,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            identity: Identity::Root,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn apply(&mut self, identity: Identity) {
        self.identity = identity;
    }

    pub fn is_root(&self) -> bool {
        self.identity == Identity::Root
    }

    pub fn username(&self) -> &str {
        match &self.identity {
            Identity::Root => "root",
            Identity::User(name) => name,
        }
    }

    /// Trailing prompt mark, derived solely from the identity.
    pub fn mark(&self) -> char {
        match self.identity {
            Identity::Root => '#',
            Identity::User(_) => '$',
        }
    }

    /// The single authorization predicate: checked once by the dispatcher
    /// before a handler runs. Returns the denial message on rejection.
    pub fn authorize(&self, command: Command) -> Result<(), String> {
        match command {
            Command::Ls | Command::Touch | Command::Cat | Command::Rm | Command::Edit => {
                if self.is_root() {
                    Err(
                        "You must be logged in to manage tasks. Try `su <username> <password>`."
                            .to_string(),
                    )
                } else {
                    Ok(())
                }
            }
            Command::Adduser => {
                if self.is_root() {
                    Ok(())
                } else {
                    Err("You must be logged in as root to add a user.".to_string())
                }
            }
            Command::Exit => {
                if self.is_root() {
                    Err("You cannot exit as the root user.".to_string())
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Identity, Session};
    use crate::commands::Command;

    #[test]
    fn root_is_the_default_identity() {
        let session = Session::new();
        assert!(session.is_root());
        assert_eq!(session.username(), "root");
        assert_eq!(session.mark(), '#');
    }

    #[test]
    fn task_commands_require_a_user() {
        let mut session = Session::new();
        for command in [
            Command::Ls,
            Command::Touch,
            Command::Cat,
            Command::Rm,
            Command::Edit,
        ] {
            assert!(session.authorize(command).is_err());
        }

        session.apply(Identity::User("maya".to_string()));
        assert_eq!(session.mark(), '$');
        for command in [Command::Ls, Command::Touch, Command::Cat] {
            assert!(session.authorize(command).is_ok());
        }
    }

    #[test]
    fn identity_commands_have_complementary_gating() {
        let mut session = Session::new();
        assert!(session.authorize(Command::Adduser).is_ok());
        assert!(session.authorize(Command::Exit).is_err());

        session.apply(Identity::User("maya".to_string()));
        assert!(session.authorize(Command::Adduser).is_err());
        assert!(session.authorize(Command::Exit).is_ok());
    }

    #[test]
    fn local_commands_are_always_allowed() {
        let session = Session::new();
        assert!(session.authorize(Command::Help).is_ok());
        assert!(session.authorize(Command::Echo).is_ok());
        assert!(session.authorize(Command::Su).is_ok());
    }
}
