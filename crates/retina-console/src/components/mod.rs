//! Reusable view models rendered by the page templates

pub mod notification;
pub mod pagination;
pub mod risk_bar;
pub mod stat_card;

pub use notification::{Notification, NotificationLevel};
pub use pagination::{Pagination, clamp_page};
pub use risk_bar::{RiskBar, RiskLegendItem, RiskSegment};
pub use stat_card::{BreakdownRow, StatCard};
