//! Analytics dashboard page

use askama::Template;
use chrono::NaiveDate;
use retina_core::SystemAnalytics;

use crate::components::{
    BreakdownRow, Notification, RiskBar, StatCard,
    stat_card::{
        analysis_status_rows, error_rate_card, error_type_rows, image_count_card, usage_cards,
    },
};

/// Console path of the analytics dashboard
pub const ANALYTICS_PATH: &str = "/analytics";

/// Everything drawn from one analytics snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsReport {
    /// Usage statistic cards
    pub usage_cards: Vec<StatCard>,
    /// Error rate card
    pub error_card: StatCard,
    /// Failures by error type
    pub error_rows: Vec<BreakdownRow>,
    /// Image count card
    pub image_card: StatCard,
    /// Risk distribution bar
    pub risk_bar: RiskBar,
    /// Analyses by processing status
    pub status_rows: Vec<BreakdownRow>,
    /// Snapshot time, may be empty
    pub generated_at: String,
}

impl AnalyticsReport {
    /// Build every card from a snapshot
    #[must_use]
    pub fn from_analytics(analytics: &SystemAnalytics) -> Self {
        Self {
            usage_cards: usage_cards(analytics),
            error_card: error_rate_card(analytics),
            error_rows: error_type_rows(analytics),
            image_card: image_count_card(analytics),
            risk_bar: RiskBar::from_distribution(&analytics.risk_distribution),
            status_rows: analysis_status_rows(analytics),
            generated_at: analytics
                .generated_at
                .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Analytics dashboard
#[derive(Debug, Template)]
#[template(path = "analytics.html")]
pub struct AnalyticsPage {
    /// Logged in operator
    pub operator: String,
    /// Active navigation entry
    pub active: &'static str,
    /// Banners above the content
    pub notifications: Vec<Notification>,
    /// Range start as `YYYY-MM-DD`
    pub start_date: String,
    /// Range end as `YYYY-MM-DD`
    pub end_date: String,
    /// Link reloading the current range
    pub refresh_href: String,
    /// Loaded snapshot, absent when loading failed
    pub report: Option<AnalyticsReport>,
}

impl AnalyticsPage {
    /// Page for `start..=end` with nothing loaded yet
    #[must_use]
    pub fn new(operator: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        let start_date = start.format("%Y-%m-%d").to_string();
        let end_date = end.format("%Y-%m-%d").to_string();
        let refresh_href =
            format!("{ANALYTICS_PATH}?startDate={start_date}&endDate={end_date}");

        Self {
            operator: operator.into(),
            active: "analytics",
            notifications: Vec::new(),
            start_date,
            end_date,
            refresh_href,
            report: None,
        }
    }
}
