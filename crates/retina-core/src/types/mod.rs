//! Core data types for the retina admin console

pub mod analytics;
pub mod audit;

pub use analytics::{
    AnalysisStatusBreakdown, DateRange, ErrorRate, ImageCount, RiskBucket, RiskDistribution,
    RiskLevel, SystemAnalytics, UsageStatistics,
};
pub use audit::{Actor, AuditLog, AuditLogFilter, AuditLogPage, ExportFormat};
