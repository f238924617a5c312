//! Collaborators the dashboard talks to but does not implement.
//!
//! The front-end provides terminal-backed implementations; tests use fakes.

use serde::Deserialize;

use crate::{EngineError, ResultEngine};

/// Platform clipboard.
pub trait Clipboard {
    fn write_text(&mut self, value: &str) -> ResultEngine<()>;
}

/// Blocking yes/no prompt.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Opens an external URL (a provider portal) outside the dashboard.
pub trait UrlOpener {
    fn open(&mut self, url: &str) -> ResultEngine<()>;
}

/// Signed-in user handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub username: String,
}

/// Session provider gating the dashboard.
pub trait AuthProvider {
    fn current_user(&self) -> Option<&User>;
    fn sign_in(&mut self, username: &str, password: &str) -> ResultEngine<User>;
    fn sign_out(&mut self);
}

/// One username/password pair accepted by [`LocalAuth`].
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub username: String,
    pub password: String,
}

/// In-process stand-in for the hosted auth provider.
#[derive(Clone, Debug, Default)]
pub struct LocalAuth {
    accounts: Vec<Account>,
    current: Option<User>,
}

impl LocalAuth {
    #[must_use]
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts,
            current: None,
        }
    }
}

impl AuthProvider for LocalAuth {
    fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    fn sign_in(&mut self, username: &str, password: &str) -> ResultEngine<User> {
        let username = username.trim();
        let known = self
            .accounts
            .iter()
            .any(|account| account.username == username && account.password == password);
        if !known {
            tracing::info!(username, "sign-in rejected");
            return Err(EngineError::Unauthorized);
        }
        let user = User {
            username: username.to_string(),
        };
        tracing::info!(username, "signed in");
        self.current = Some(user.clone());
        Ok(user)
    }

    fn sign_out(&mut self) {
        if let Some(user) = self.current.take() {
            tracing::info!(username = %user.username, "signed out");
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Transient, dismissable message for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> LocalAuth {
        LocalAuth::new(vec![Account {
            username: "admin".to_string(),
            password: "secret".to_string(),
        }])
    }

    #[test]
    fn sign_in_and_out() {
        let mut auth = auth();
        assert!(auth.current_user().is_none());

        let user = auth.sign_in(" admin ", "secret").unwrap();
        assert_eq!(user.username, "admin");
        assert_eq!(auth.current_user(), Some(&user));

        auth.sign_out();
        assert!(auth.current_user().is_none());
    }

    #[test]
    fn wrong_password_is_unauthorized() {
        let mut auth = auth();
        assert_eq!(auth.sign_in("admin", "nope"), Err(EngineError::Unauthorized));
        assert!(auth.current_user().is_none());
    }
}
