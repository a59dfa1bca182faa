//! Audit log browser page

use askama::Template;
use retina_core::{
    AuditLog, AuditLogFilter, AuditLogPage, ExportFormat,
    utils::{format_count, pretty_json},
};

use crate::{
    components::{Notification, Pagination},
    view_state::AuditViewState,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const PAGE_SIZE_CHOICES: [u32; 4] = [10, 20, 50, 100];

/// Filter form values, blank for unset fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterForm {
    /// Action type
    pub action_type: String,
    /// Resource type
    pub resource_type: String,
    /// Acting user
    pub user_id: String,
    /// Acting admin
    pub admin_id: String,
    /// Earliest day
    pub start_date: String,
    /// Latest day
    pub end_date: String,
    /// Client IP address
    pub ip_address: String,
}

impl From<&AuditLogFilter> for FilterForm {
    fn from(filter: &AuditLogFilter) -> Self {
        let date = |d: Option<chrono::NaiveDate>| {
            d.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
        };
        Self {
            action_type: filter.action_type.clone().unwrap_or_default(),
            resource_type: filter.resource_type.clone().unwrap_or_default(),
            user_id: filter.user_id.clone().unwrap_or_default(),
            admin_id: filter.admin_id.clone().unwrap_or_default(),
            start_date: date(filter.start_date),
            end_date: date(filter.end_date),
            ip_address: filter.ip_address.clone().unwrap_or_default(),
        }
    }
}

/// Entry of the page size selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizeOption {
    /// Records per page
    pub value: u32,
    /// Whether this is the current size
    pub selected: bool,
}

/// One table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRow {
    /// Record identifier
    pub id: String,
    /// Formatted timestamp
    pub timestamp: String,
    /// Actor label
    pub actor: String,
    /// Action type
    pub action_type: String,
    /// Resource type and identifier
    pub resource: String,
    /// Client IP, may be empty
    pub ip_address: String,
    /// Link opening the detail dialog
    pub detail_href: String,
}

impl AuditRow {
    fn new(log: &AuditLog, view: &AuditViewState) -> Self {
        let resource = match &log.resource_id {
            Some(id) => format!("{} {id}", log.resource_type),
            None => log.resource_type.clone(),
        };
        Self {
            id: log.id.clone(),
            timestamp: log.created_at.format(TIMESTAMP_FORMAT).to_string(),
            actor: log.actor.to_string(),
            action_type: log.action_type.clone(),
            resource,
            ip_address: log.ip_address.clone().unwrap_or_default(),
            detail_href: view.detail_href(&log.id),
        }
    }
}

/// Detail dialog of one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditDetail {
    /// Record identifier
    pub id: String,
    /// Formatted timestamp
    pub timestamp: String,
    /// Actor kind
    pub actor_kind: String,
    /// Actor identifier, may be empty
    pub actor_id: String,
    /// Action type
    pub action_type: String,
    /// Resource type
    pub resource_type: String,
    /// Resource identifier, may be empty
    pub resource_id: String,
    /// Client IP, may be empty
    pub ip_address: String,
    /// Client user agent, may be empty
    pub user_agent: String,
    /// Pretty-printed snapshot before the action, may be empty
    pub old_values: String,
    /// Pretty-printed snapshot after the action, may be empty
    pub new_values: String,
    /// Link closing the dialog
    pub close_href: String,
}

impl AuditDetail {
    /// Detail view of `log`
    #[must_use]
    pub fn new(log: &AuditLog, close_href: String) -> Self {
        let pretty = |raw: &Option<String>| raw.as_deref().map(pretty_json).unwrap_or_default();
        Self {
            id: log.id.clone(),
            timestamp: log.created_at.format(TIMESTAMP_FORMAT).to_string(),
            actor_kind: log.actor.kind().to_string(),
            actor_id: log.actor.id().unwrap_or_default().to_string(),
            action_type: log.action_type.clone(),
            resource_type: log.resource_type.clone(),
            resource_id: log.resource_id.clone().unwrap_or_default(),
            ip_address: log.ip_address.clone().unwrap_or_default(),
            user_agent: log.user_agent.clone().unwrap_or_default(),
            old_values: pretty(&log.old_values),
            new_values: pretty(&log.new_values),
            close_href,
        }
    }
}

/// A loaded page of records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditListing {
    /// Table rows
    pub rows: Vec<AuditRow>,
    /// Formatted match count across all pages
    pub total_count: String,
    /// Previous/next controls
    pub pagination: Pagination,
}

impl AuditListing {
    /// Listing of `page` under `view`
    #[must_use]
    pub fn new(page: &AuditLogPage, view: &AuditViewState) -> Self {
        Self {
            rows: page.logs.iter().map(|log| AuditRow::new(log, view)).collect(),
            total_count: format_count(page.total_count),
            pagination: Pagination::new(view.page, page.total_pages(view.page_size), |p| {
                view.page_href(p)
            }),
        }
    }
}

/// Audit log browser
#[derive(Debug, Template)]
#[template(path = "audit_logs.html")]
pub struct AuditLogsPage {
    /// Logged in operator
    pub operator: String,
    /// Active navigation entry
    pub active: &'static str,
    /// Banners above the content
    pub notifications: Vec<Notification>,
    /// Filter form values
    pub form: FilterForm,
    /// Page size selector
    pub page_sizes: Vec<PageSizeOption>,
    /// Loaded records, absent when loading failed
    pub listing: Option<AuditListing>,
    /// Open detail dialog
    pub detail: Option<AuditDetail>,
    /// CSV download link
    pub export_csv_href: String,
    /// JSON download link
    pub export_json_href: String,
}

impl AuditLogsPage {
    /// Page for `view` with nothing loaded yet
    #[must_use]
    pub fn new(operator: impl Into<String>, view: &AuditViewState) -> Self {
        let mut sizes: Vec<u32> = PAGE_SIZE_CHOICES.to_vec();
        if !sizes.contains(&view.page_size) {
            sizes.push(view.page_size);
            sizes.sort_unstable();
        }

        Self {
            operator: operator.into(),
            active: "audit",
            notifications: Vec::new(),
            form: FilterForm::from(&view.filter),
            page_sizes: sizes
                .into_iter()
                .map(|value| PageSizeOption {
                    value,
                    selected: value == view.page_size,
                })
                .collect(),
            listing: None,
            detail: None,
            export_csv_href: view.export_href(ExportFormat::Csv),
            export_json_href: view.export_href(ExportFormat::Json),
        }
    }

    /// Fill in the loaded page and the dialog for `selected`
    pub fn load(&mut self, page: &AuditLogPage, view: &AuditViewState, selected: Option<&str>) {
        self.listing = Some(AuditListing::new(page, view));
        self.detail = None;
        if let Some(id) = selected {
            match page.find(id) {
                Some(log) => self.detail = Some(AuditDetail::new(log, view.page_href(view.page))),
                None => self
                    .notifications
                    .push(Notification::info("The selected record is not on this page")),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page() -> AuditLogPage {
        serde_json::from_str(
            r#"{
                "logs": [
                    {
                        "id": "a1", "createdAt": "2024-05-01T10:15:00Z", "adminId": "adm-1",
                        "actionType": "UPDATE_USER", "resourceType": "User", "resourceId": "u-42",
                        "ipAddress": "10.0.0.8", "userAgent": "Mozilla/5.0",
                        "oldValues": "{\"role\":\"user\"}", "newValues": "not json"
                    },
                    {
                        "id": "a2", "createdAt": "2024-05-01T11:00:00Z",
                        "actionType": "PURGE", "resourceType": "Cache"
                    }
                ],
                "totalCount": 45,
                "page": 2,
                "pageSize": 20
            }"#,
        )
        .unwrap()
    }

    fn view() -> AuditViewState {
        let mut view = AuditViewState::new(20);
        view.page = 2;
        view
    }

    #[test]
    fn test_listing_rows_and_pagination() {
        let listing = AuditListing::new(&page(), &view());

        assert_eq!(listing.rows.len(), 2);
        assert_eq!(listing.rows[0].actor, "Admin adm-1");
        assert_eq!(listing.rows[0].resource, "User u-42");
        assert_eq!(listing.rows[1].actor, "System");
        assert_eq!(listing.total_count, "45");
        assert_eq!(listing.pagination.total_pages, 3);
        assert!(listing.pagination.has_prev);
        assert!(listing.pagination.has_next);
    }

    #[test]
    fn test_detail_pretty_prints_json_and_keeps_raw_text() {
        let data = page();
        let detail = AuditDetail::new(data.find("a1").unwrap(), "/audit-logs".to_string());

        assert_eq!(detail.old_values, "{\n  \"role\": \"user\"\n}");
        assert_eq!(detail.new_values, "not json");
        assert_eq!(detail.actor_kind, "Admin");
    }

    #[test]
    fn test_load_opens_selected_record() {
        let view = view();
        let mut page_view = AuditLogsPage::new("ops", &view);
        page_view.load(&page(), &view, Some("a1"));

        let html = page_view.render().unwrap();
        assert!(html.contains("Mozilla"));
        assert!(html.contains("&quot;role&quot;"));
    }

    #[test]
    fn test_load_with_unknown_selection() {
        let view = view();
        let mut page_view = AuditLogsPage::new("ops", &view);
        page_view.load(&page(), &view, Some("missing"));

        assert!(page_view.detail.is_none());
        assert_eq!(page_view.notifications.len(), 1);
    }

    #[test]
    fn test_custom_page_size_is_selectable() {
        let page_view = AuditLogsPage::new("ops", &AuditViewState::new(35));
        let values: Vec<u32> = page_view.page_sizes.iter().map(|o| o.value).collect();
        assert_eq!(values, vec![10, 20, 35, 50, 100]);
        assert!(page_view.page_sizes[2].selected);
    }
}
