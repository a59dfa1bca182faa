//! Navigation state of the audit log browser

use retina_core::{AuditLogFilter, ExportFormat, config::AuditConfig, utils::blank_as_none};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::components::clamp_page;

/// Console path of the audit log browser
pub const AUDIT_PATH: &str = "/audit-logs";

/// Console path of the audit export download
pub const AUDIT_EXPORT_PATH: &str = "/audit-logs/export";

const MAX_FILTER_TEXT: usize = 128;
const MAX_IP_ADDRESS: usize = 45;

/// Query string of the audit log browser
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuditQuery {
    /// Requested page (1-based)
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page: Option<u32>,
    /// Requested page size
    #[serde(default, deserialize_with = "blank_as_none")]
    pub page_size: Option<u32>,
    /// Record whose detail dialog is open
    #[serde(default, deserialize_with = "blank_as_none")]
    pub selected: Option<String>,
    /// Field filters
    #[serde(flatten)]
    #[validate(custom(function = "validate_filter"))]
    pub filter: AuditLogFilter,
}

/// Query string of the export download
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ExportQuery {
    /// File format, CSV when absent
    #[serde(default)]
    pub format: ExportFormat,
    /// Field filters
    #[serde(flatten)]
    #[validate(custom(function = "validate_filter"))]
    pub filter: AuditLogFilter,
}

fn validate_filter(filter: &AuditLogFilter) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (filter.start_date, filter.end_date) {
        if start > end {
            return Err(ValidationError::new("date_range")
                .with_message("Start date must be on or before end date".into()));
        }
    }

    let too_long = [
        &filter.action_type,
        &filter.resource_type,
        &filter.user_id,
        &filter.admin_id,
    ]
    .into_iter()
    .flatten()
    .any(|value| value.len() > MAX_FILTER_TEXT);
    if too_long {
        let message = format!("Filter values are limited to {MAX_FILTER_TEXT} characters");
        return Err(ValidationError::new("length").with_message(message.into()));
    }

    if filter
        .ip_address
        .as_ref()
        .is_some_and(|ip| ip.len() > MAX_IP_ADDRESS)
    {
        return Err(ValidationError::new("ip_address")
            .with_message("IP address filter is too long".into()));
    }

    Ok(())
}

/// First human readable message of a validation failure
#[must_use]
pub fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errors| errors.iter())
        .find_map(|error| error.message.as_ref().map(ToString::to_string))
        .unwrap_or_else(|| "Invalid filter".to_string())
}

/// Filter, page and page size of the listing being shown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditViewState {
    /// Active filter
    pub filter: AuditLogFilter,
    /// Current page (1-based)
    pub page: u32,
    /// Records per page
    pub page_size: u32,
}

impl AuditViewState {
    /// Unfiltered first page
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            filter: AuditLogFilter::default(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Resolve the state for a request
    ///
    /// `previous` is the filter of the listing shown last; when the request
    /// carries a different filter the page resets to 1.
    #[must_use]
    pub fn resolve(
        previous: Option<&AuditLogFilter>,
        query: &AuditQuery,
        config: &AuditConfig,
    ) -> Self {
        let page_size = query
            .page_size
            .unwrap_or(config.default_page_size)
            .clamp(1, config.max_page_size.max(1));

        let state = Self {
            filter: previous.cloned().unwrap_or_default(),
            page: query.page.unwrap_or(1).max(1),
            page_size,
        };
        if state.filter == query.filter {
            state
        } else {
            state.with_filter(query.filter.clone())
        }
    }

    /// Replace the filter, returning to the first page
    #[must_use]
    pub fn with_filter(mut self, filter: AuditLogFilter) -> Self {
        self.filter = filter;
        self.page = 1;
        self
    }

    /// Move to `page`, clamped into `[1, total_pages]`
    pub fn go_to(&mut self, page: u32, total_pages: u32) {
        self.page = clamp_page(page, total_pages);
    }

    fn listing_pairs(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", page.to_string()),
            ("pageSize", self.page_size.to_string()),
        ];
        pairs.extend(self.filter.to_query_pairs());
        pairs
    }

    /// Link to `page` of this listing
    #[must_use]
    pub fn page_href(&self, page: u32) -> String {
        href(AUDIT_PATH, &self.listing_pairs(page))
    }

    /// Link to the current page with the detail dialog of `id` open
    #[must_use]
    pub fn detail_href(&self, id: &str) -> String {
        let mut pairs = self.listing_pairs(self.page);
        pairs.push(("selected", id.to_string()));
        href(AUDIT_PATH, &pairs)
    }

    /// Link downloading every record matching the filter
    #[must_use]
    pub fn export_href(&self, format: ExportFormat) -> String {
        let mut pairs = vec![("format", format.extension().to_string())];
        pairs.extend(self.filter.to_query_pairs());
        href(AUDIT_EXPORT_PATH, &pairs)
    }
}

fn href(path: &str, pairs: &[(&'static str, String)]) -> String {
    match serde_urlencoded::to_string(pairs) {
        Ok(query) if !query.is_empty() => format!("{path}?{query}"),
        _ => path.to_string(),
    }
}
