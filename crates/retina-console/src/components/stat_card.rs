//! Headline figure cards

use retina_core::SystemAnalytics;
use retina_core::utils::{format_count, format_percent};

/// A titled figure with an optional caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    /// Card title
    pub title: &'static str,
    /// Formatted figure
    pub value: String,
    /// Small print under the figure, may be empty
    pub caption: String,
}

impl StatCard {
    /// Card with a count figure
    #[must_use]
    pub fn count(title: &'static str, value: u64) -> Self {
        Self {
            title,
            value: format_count(value),
            caption: String::new(),
        }
    }

    /// Attach a caption
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }
}

/// A labelled row of a breakdown table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownRow {
    /// Row label
    pub label: String,
    /// Formatted count
    pub value: String,
}

impl BreakdownRow {
    fn new(label: impl Into<String>, value: u64) -> Self {
        Self {
            label: label.into(),
            value: format_count(value),
        }
    }
}

/// Usage statistic cards in display order
#[must_use]
pub fn usage_cards(analytics: &SystemAnalytics) -> Vec<StatCard> {
    let usage = &analytics.usage_statistics;
    vec![
        StatCard::count("Total Users", usage.total_users)
            .with_caption(format!("{} new in range", format_count(usage.new_users))),
        StatCard::count("Active Users", usage.active_users),
        StatCard::count("Doctors", usage.total_doctors),
        StatCard::count("Analyses", usage.total_analyses).with_caption(format!(
            "{:.1} per day",
            usage.average_analyses_per_day
        )),
    ]
}

/// Error rate card
#[must_use]
pub fn error_rate_card(analytics: &SystemAnalytics) -> StatCard {
    let errors = &analytics.error_rate;
    StatCard {
        title: "Error Rate",
        value: format_percent(errors.error_rate),
        caption: format!(
            "{} failed of {} requests",
            format_count(errors.failed_requests),
            format_count(errors.total_requests)
        ),
    }
}

/// Failures by error type, in backend order
#[must_use]
pub fn error_type_rows(analytics: &SystemAnalytics) -> Vec<BreakdownRow> {
    analytics
        .error_rate
        .errors_by_type
        .iter()
        .map(|(kind, count)| BreakdownRow::new(kind.as_str(), *count))
        .collect()
}

/// Image count card
#[must_use]
pub fn image_count_card(analytics: &SystemAnalytics) -> StatCard {
    let images = &analytics.image_count;
    StatCard::count("Images", images.total_images).with_caption(format!(
        "{} processed, {} pending, {} failed",
        format_count(images.processed_images),
        format_count(images.pending_images),
        format_count(images.failed_images)
    ))
}

/// Analyses by processing status
#[must_use]
pub fn analysis_status_rows(analytics: &SystemAnalytics) -> Vec<BreakdownRow> {
    let status = &analytics.usage_statistics.analysis_status;
    vec![
        BreakdownRow::new("Pending", status.pending),
        BreakdownRow::new("Processing", status.processing),
        BreakdownRow::new("Completed", status.completed),
        BreakdownRow::new("Failed", status.failed),
    ]
}
