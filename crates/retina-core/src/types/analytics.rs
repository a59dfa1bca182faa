//! System analytics snapshot returned by the backend

use chrono::{DateTime, Days, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range
    pub start: NaiveDate,
    /// Last day of the range
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`
    ///
    /// # Errors
    ///
    /// Returns a validation error when the start date is after the end date.
    pub fn new(start: NaiveDate, end: NaiveDate) -> crate::Result<Self> {
        if start > end {
            return Err(crate::Error::validation(
                "startDate",
                "start date must be on or before end date",
            ));
        }
        Ok(Self { start, end })
    }

    /// The `days` calendar days ending with and including `end`
    ///
    /// A zero-day range still covers `end` itself.
    #[must_use]
    pub fn ending_on(end: NaiveDate, days: u32) -> Self {
        let start = end
            .checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
            .unwrap_or(end);
        Self { start, end }
    }

    /// Default range ending today (UTC)
    #[must_use]
    pub fn ending_today(days: u32) -> Self {
        Self::ending_on(Utc::now().date_naive(), days)
    }
}

/// Aggregate analytics for a date range, replaced wholesale on refresh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemAnalytics {
    /// Platform usage figures
    pub usage_statistics: UsageStatistics,
    /// Request error figures
    pub error_rate: ErrorRate,
    /// Uploaded image figures
    pub image_count: ImageCount,
    /// Analysed items bucketed by risk level
    pub risk_distribution: RiskDistribution,
    /// When the backend produced the snapshot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

/// Usage statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStatistics {
    /// Registered users
    pub total_users: u64,
    /// Users active within the range
    pub active_users: u64,
    /// Registered doctors
    pub total_doctors: u64,
    /// Users registered within the range
    #[serde(default)]
    pub new_users: u64,
    /// Analyses started within the range
    pub total_analyses: u64,
    /// Mean analyses per day over the range
    #[serde(default)]
    pub average_analyses_per_day: f64,
    /// Analyses by processing status
    #[serde(default)]
    pub analysis_status: AnalysisStatusBreakdown,
}

/// Analyses by processing status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStatusBreakdown {
    /// Waiting to be processed
    #[serde(default)]
    pub pending: u64,
    /// Being processed
    #[serde(default)]
    pub processing: u64,
    /// Finished successfully
    #[serde(default)]
    pub completed: u64,
    /// Finished with an error
    #[serde(default)]
    pub failed: u64,
}

/// Request error figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRate {
    /// Requests handled within the range
    pub total_requests: u64,
    /// Requests that failed
    pub failed_requests: u64,
    /// Failure share in percent, as computed by the backend
    pub error_rate: f64,
    /// Failure counts by error type, in backend order
    #[serde(default)]
    pub errors_by_type: IndexMap<String, u64>,
}

/// Uploaded image figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCount {
    /// Images uploaded
    pub total_images: u64,
    /// Images analysed
    #[serde(default)]
    pub processed_images: u64,
    /// Images waiting for analysis
    #[serde(default)]
    pub pending_images: u64,
    /// Images whose analysis failed
    #[serde(default)]
    pub failed_images: u64,
}

/// Severity tier assigned by the analysis service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskLevel {
    /// No notable findings
    Minimal,
    /// Low risk
    Low,
    /// Medium risk
    Medium,
    /// High risk
    High,
}

impl RiskLevel {
    /// All levels in ascending severity
    pub const ALL: [Self; 4] = [Self::Minimal, Self::Low, Self::Medium, Self::High];

    /// Human readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Stable lowercase key, used for CSS classes
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Analysed items bucketed by risk level, percentages computed server-side
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskDistribution {
    /// Minimal-risk count
    #[serde(default)]
    pub minimal: u64,
    /// Low-risk count
    #[serde(default)]
    pub low: u64,
    /// Medium-risk count
    #[serde(default)]
    pub medium: u64,
    /// High-risk count
    #[serde(default)]
    pub high: u64,
    /// Total analysed items
    #[serde(default)]
    pub total: u64,
    /// Minimal share in percent
    #[serde(default)]
    pub minimal_percentage: f64,
    /// Low share in percent
    #[serde(default)]
    pub low_percentage: f64,
    /// Medium share in percent
    #[serde(default)]
    pub medium_percentage: f64,
    /// High share in percent
    #[serde(default)]
    pub high_percentage: f64,
}

/// One bucket of a [`RiskDistribution`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskBucket {
    /// Severity tier
    pub level: RiskLevel,
    /// Items in the tier
    pub count: u64,
    /// Share in percent, as reported by the backend
    pub percentage: f64,
}

impl RiskDistribution {
    /// The four buckets in ascending severity
    #[must_use]
    pub fn buckets(&self) -> [RiskBucket; 4] {
        RiskLevel::ALL.map(|level| self.bucket(level))
    }

    /// Count and percentage of one level
    #[must_use]
    pub const fn bucket(&self, level: RiskLevel) -> RiskBucket {
        let (count, percentage) = match level {
            RiskLevel::Minimal => (self.minimal, self.minimal_percentage),
            RiskLevel::Low => (self.low, self.low_percentage),
            RiskLevel::Medium => (self.medium, self.medium_percentage),
            RiskLevel::High => (self.high, self.high_percentage),
        };
        RiskBucket {
            level,
            count,
            percentage,
        }
    }
}
