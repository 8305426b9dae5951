use super::api::ConsoleError;
use crate::middleware::auth::NO_PERMISSION;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A transient message for the operator, drained by whoever renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Permission failures get a fixed message; anything else shows what the
    /// server said, or `fallback` when it said nothing usable.
    pub fn from_failure(err: &ConsoleError, fallback: &str) -> Self {
        let message = match err {
            ConsoleError::Forbidden(_) => NO_PERMISSION.to_string(),
            ConsoleError::MissingToken => err.to_string(),
            other => other
                .server_message()
                .map(str::to_string)
                .unwrap_or_else(|| fallback.to_string()),
        };
        Self::error(message)
    }

    /// Like [`Notice::from_failure`], but always shows `message` instead of
    /// the server's text.
    pub fn fixed_failure(err: &ConsoleError, message: &str) -> Self {
        match err {
            ConsoleError::Forbidden(_) => Self::error(NO_PERMISSION),
            ConsoleError::MissingToken => Self::error(err.to_string()),
            _ => Self::error(message),
        }
    }
}
