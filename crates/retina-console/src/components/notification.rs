//! Banner notifications shown above page content

use crate::error::ConsoleError;

/// Severity of a notification banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Neutral information
    Info,
    /// Completed action
    Success,
    /// Failed action
    Error,
}

/// A message for the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity
    pub level: NotificationLevel,
    /// Text shown in the banner
    pub message: String,
}

impl Notification {
    /// Informational banner
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    /// Success banner
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    /// Error banner
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    /// Error banner for a failed backend call, preferring the server's own message
    #[must_use]
    pub fn from_error(err: &ConsoleError, fallback: &str) -> Self {
        Self::error(err.user_message(fallback))
    }

    /// CSS class of the banner
    #[must_use]
    pub const fn css_class(&self) -> &'static str {
        match self.level {
            NotificationLevel::Info => "notice notice-info",
            NotificationLevel::Success => "notice notice-success",
            NotificationLevel::Error => "notice notice-error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_error_uses_server_message() {
        let err = ConsoleError::Backend {
            status: StatusCode::BAD_REQUEST,
            message: Some("Page size too large".to_string()),
        };
        let notification = Notification::from_error(&err, "Failed to load audit logs");
        assert_eq!(notification.message, "Page size too large");
        assert_eq!(notification.level, NotificationLevel::Error);
    }

    #[test]
    fn test_from_error_falls_back() {
        let notification = Notification::from_error(&ConsoleError::Unauthorized, "Failed");
        assert_eq!(notification.message, "Failed");
        assert_eq!(notification.css_class(), "notice notice-error");
    }
}
