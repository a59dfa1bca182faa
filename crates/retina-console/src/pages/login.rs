//! Operator login page

use askama::Template;

use crate::components::Notification;

/// Login form
#[derive(Debug, Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    /// Always empty; the navigation bar is hidden
    pub operator: String,
    /// Active navigation entry
    pub active: &'static str,
    /// Banners above the form
    pub notifications: Vec<Notification>,
    /// Email to prefill after a failed attempt
    pub email: String,
}

impl LoginPage {
    /// Empty login form
    #[must_use]
    pub fn new() -> Self {
        Self {
            operator: String::new(),
            active: "",
            notifications: Vec::new(),
            email: String::new(),
        }
    }

    /// Add a banner
    #[must_use]
    pub fn with_notification(mut self, notification: Notification) -> Self {
        self.notifications.push(notification);
        self
    }
}

impl Default for LoginPage {
    fn default() -> Self {
        Self::new()
    }
}
