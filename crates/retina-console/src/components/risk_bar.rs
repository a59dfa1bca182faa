//! Stacked horizontal bar of the risk distribution

use retina_core::types::{RiskDistribution, RiskLevel};
use retina_core::utils::{format_count, format_percent};

/// Segments at or below this share render without an inline label
pub const LABEL_THRESHOLD_PERCENT: f64 = 5.0;

/// One coloured segment of the bar
#[derive(Debug, Clone, PartialEq)]
pub struct RiskSegment {
    /// Severity tier
    pub level: RiskLevel,
    /// Width in percent of the bar
    pub width: f64,
    /// Width formatted for an inline style
    pub width_style: String,
    /// Whether the percentage label fits inside the segment
    pub show_label: bool,
    /// Percentage label
    pub label: String,
}

impl RiskSegment {
    /// CSS class for the segment colour
    #[must_use]
    pub fn css_class(&self) -> String {
        format!("risk-segment risk-{}", self.level.key())
    }
}

/// Legend entry, one per level including empty ones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskLegendItem {
    /// Severity tier
    pub level: RiskLevel,
    /// Formatted count
    pub count: String,
    /// Formatted percentage
    pub percentage: String,
}

impl RiskLegendItem {
    /// CSS class for the legend swatch
    #[must_use]
    pub fn css_class(&self) -> String {
        format!("risk-swatch risk-{}", self.level.key())
    }
}

/// View model of the whole bar
#[derive(Debug, Clone, PartialEq)]
pub struct RiskBar {
    /// Non-empty segments in ascending severity
    pub segments: Vec<RiskSegment>,
    /// Legend for all four levels
    pub legend: Vec<RiskLegendItem>,
    /// Formatted total of analysed items
    pub total: String,
}

impl RiskBar {
    /// Build the bar from backend percentages
    #[must_use]
    pub fn from_distribution(distribution: &RiskDistribution) -> Self {
        let buckets = distribution.buckets();

        let segments = buckets
            .iter()
            .filter(|bucket| bucket.percentage.is_finite() && bucket.percentage > 0.0)
            .map(|bucket| {
                let width = bucket.percentage.min(100.0);
                RiskSegment {
                    level: bucket.level,
                    width,
                    width_style: format!("{width:.2}"),
                    show_label: width > LABEL_THRESHOLD_PERCENT,
                    label: format_percent(width),
                }
            })
            .collect();

        let legend = buckets
            .iter()
            .map(|bucket| RiskLegendItem {
                level: bucket.level,
                count: format_count(bucket.count),
                percentage: format_percent(bucket.percentage),
            })
            .collect();

        Self {
            segments,
            legend,
            total: format_count(distribution.total),
        }
    }

    /// Whether there is anything to draw
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of segment widths
    #[must_use]
    pub fn total_width(&self) -> f64 {
        self.segments.iter().map(|segment| segment.width).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn distribution(percentages: [f64; 4]) -> RiskDistribution {
        RiskDistribution {
            minimal: 40,
            low: 30,
            medium: 20,
            high: 10,
            total: 100,
            minimal_percentage: percentages[0],
            low_percentage: percentages[1],
            medium_percentage: percentages[2],
            high_percentage: percentages[3],
        }
    }

    #[test]
    fn test_labels_suppressed_at_threshold() {
        let bar = RiskBar::from_distribution(&distribution([80.0, 10.0, 5.0, 5.0]));

        let labelled: Vec<(RiskLevel, bool)> = bar
            .segments
            .iter()
            .map(|segment| (segment.level, segment.show_label))
            .collect();
        assert_eq!(
            labelled,
            vec![
                (RiskLevel::Minimal, true),
                (RiskLevel::Low, true),
                (RiskLevel::Medium, false),
                (RiskLevel::High, false),
            ]
        );
    }

    #[test]
    fn test_label_shown_just_above_threshold() {
        let bar = RiskBar::from_distribution(&distribution([44.44, 33.33, 16.67, 5.56]));
        let high = bar.segments.last().map(|segment| segment.show_label);
        assert_eq!(high, Some(true));
        assert_eq!(bar.segments[0].label, "44.4%");
        assert_eq!(bar.segments[0].width_style, "44.44");
    }

    #[test]
    fn test_zero_buckets_render_no_segment() {
        let bar = RiskBar::from_distribution(&distribution([100.0, 0.0, 0.0, 0.0]));
        assert_eq!(bar.segments.len(), 1);
        assert_eq!(bar.legend.len(), 4);
        assert!((bar.total_width() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_widths_sum_to_hundred() {
        let bar = RiskBar::from_distribution(&distribution([44.44, 33.33, 16.67, 5.56]));
        assert!((bar.total_width() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_distribution() {
        let bar = RiskBar::from_distribution(&RiskDistribution::default());
        assert!(bar.is_empty());
        assert_eq!(bar.total, "0");
    }
}
