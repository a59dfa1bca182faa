//! Page templates and their view models

pub mod analytics;
pub mod audit;
pub mod login;

pub use analytics::{ANALYTICS_PATH, AnalyticsPage, AnalyticsReport};
pub use audit::AuditLogsPage;
pub use login::LoginPage;
