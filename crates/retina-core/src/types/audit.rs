//! Audit log records, filters and pages

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::utils::blank_as_none;

/// Who performed an audited action
///
/// The backend sends `adminId`, `userId` and `doctorId` as separate optional
/// fields; at most one of them is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    /// Platform administrator
    Admin(String),
    /// End user
    User(String),
    /// Doctor account
    Doctor(String),
    /// No actor recorded (background jobs)
    System,
}

impl Actor {
    /// Actor kind label
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Admin(_) => "Admin",
            Self::User(_) => "User",
            Self::Doctor(_) => "Doctor",
            Self::System => "System",
        }
    }

    /// Actor identifier, if any
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Admin(id) | Self::User(id) | Self::Doctor(id) => Some(id),
            Self::System => None,
        }
    }

    fn from_wire(
        admin_id: Option<String>,
        user_id: Option<String>,
        doctor_id: Option<String>,
    ) -> crate::Result<Self> {
        match (admin_id, user_id, doctor_id) {
            (Some(id), None, None) => Ok(Self::Admin(id)),
            (None, Some(id), None) => Ok(Self::User(id)),
            (None, None, Some(id)) => Ok(Self::Doctor(id)),
            (None, None, None) => Ok(Self::System),
            _ => Err(crate::Error::validation(
                "actor",
                "at most one of adminId, userId and doctorId may be set",
            )),
        }
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id() {
            Some(id) => write!(f, "{} {id}", self.kind()),
            None => f.write_str(self.kind()),
        }
    }
}

/// One immutable record of an administrative or user action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AuditLogWire", into = "AuditLogWire")]
pub struct AuditLog {
    /// Record identifier
    pub id: String,
    /// When the action happened
    pub created_at: DateTime<Utc>,
    /// Who performed the action
    pub actor: Actor,
    /// Action performed, e.g. `UPDATE_USER`
    pub action_type: String,
    /// Kind of resource acted upon
    pub resource_type: String,
    /// Identifier of the resource acted upon
    pub resource_id: Option<String>,
    /// Client IP address
    pub ip_address: Option<String>,
    /// Client user agent
    pub user_agent: Option<String>,
    /// Serialized snapshot before the action
    pub old_values: Option<String>,
    /// Serialized snapshot after the action
    pub new_values: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuditLogWire {
    #[serde(deserialize_with = "id_from_string_or_number")]
    id: String,
    created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    admin_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    doctor_id: Option<String>,
    action_type: String,
    resource_type: String,
    #[serde(default)]
    resource_id: Option<String>,
    #[serde(default)]
    ip_address: Option<String>,
    #[serde(default)]
    user_agent: Option<String>,
    #[serde(default)]
    old_values: Option<String>,
    #[serde(default)]
    new_values: Option<String>,
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

impl TryFrom<AuditLogWire> for AuditLog {
    type Error = crate::Error;

    fn try_from(wire: AuditLogWire) -> crate::Result<Self> {
        Ok(Self {
            actor: Actor::from_wire(wire.admin_id, wire.user_id, wire.doctor_id)?,
            id: wire.id,
            created_at: wire.created_at,
            action_type: wire.action_type,
            resource_type: wire.resource_type,
            resource_id: wire.resource_id,
            ip_address: wire.ip_address,
            user_agent: wire.user_agent,
            old_values: wire.old_values,
            new_values: wire.new_values,
        })
    }
}

impl From<AuditLog> for AuditLogWire {
    fn from(log: AuditLog) -> Self {
        let (admin_id, user_id, doctor_id) = match log.actor {
            Actor::Admin(id) => (Some(id), None, None),
            Actor::User(id) => (None, Some(id), None),
            Actor::Doctor(id) => (None, None, Some(id)),
            Actor::System => (None, None, None),
        };
        Self {
            id: log.id,
            created_at: log.created_at,
            admin_id,
            user_id,
            doctor_id,
            action_type: log.action_type,
            resource_type: log.resource_type,
            resource_id: log.resource_id,
            ip_address: log.ip_address,
            user_agent: log.user_agent,
            old_values: log.old_values,
            new_values: log.new_values,
        }
    }
}

/// Field filters for the audit log browser
///
/// Blank form values deserialize as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogFilter {
    /// Action type, e.g. `DELETE_USER`
    #[serde(default, deserialize_with = "blank_as_none")]
    pub action_type: Option<String>,
    /// Resource type, e.g. `User`
    #[serde(default, deserialize_with = "blank_as_none")]
    pub resource_type: Option<String>,
    /// Acting user identifier
    #[serde(default, deserialize_with = "blank_as_none")]
    pub user_id: Option<String>,
    /// Acting admin identifier
    #[serde(default, deserialize_with = "blank_as_none")]
    pub admin_id: Option<String>,
    /// Earliest day to include
    #[serde(default, deserialize_with = "blank_as_none")]
    pub start_date: Option<NaiveDate>,
    /// Latest day to include
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end_date: Option<NaiveDate>,
    /// Client IP address
    #[serde(default, deserialize_with = "blank_as_none")]
    pub ip_address: Option<String>,
}

impl AuditLogFilter {
    /// Whether no field is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_query_pairs().is_empty()
    }

    /// Backend query parameters for the set fields, in a stable order
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let text = [
            ("actionType", &self.action_type),
            ("resourceType", &self.resource_type),
            ("userId", &self.user_id),
            ("adminId", &self.admin_id),
        ];
        for (name, value) in text {
            if let Some(value) = value {
                pairs.push((name, value.clone()));
            }
        }
        if let Some(start) = self.start_date {
            pairs.push(("startDate", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("endDate", end.format("%Y-%m-%d").to_string()));
        }
        if let Some(ip) = &self.ip_address {
            pairs.push(("ipAddress", ip.clone()));
        }
        pairs
    }
}

const fn default_page() -> u32 {
    1
}

/// One page of audit records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogPage {
    /// Records on this page
    pub logs: Vec<AuditLog>,
    /// Records matching the filter across all pages
    pub total_count: u64,
    /// Page number (1-based)
    #[serde(default = "default_page")]
    pub page: u32,
    /// Records per page, when the backend reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl AuditLogPage {
    /// Number of pages, never less than one
    ///
    /// `requested_page_size` applies when the backend left out `pageSize`.
    #[must_use]
    pub fn total_pages(&self, requested_page_size: u32) -> u32 {
        let page_size = self.page_size.unwrap_or(requested_page_size);
        crate::utils::total_pages(self.total_count, page_size)
    }

    /// Find a record on this page by id
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&AuditLog> {
        self.logs.iter().find(|log| log.id == id)
    }
}

/// Audit export file format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Comma separated values
    #[default]
    Csv,
    /// Pretty-printed JSON
    Json,
}

impl ExportFormat {
    /// File extension without the dot
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// HTTP content type of the exported file
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(crate::Error::validation(
                "format",
                format!("unsupported export format: {other}"),
            )),
        }
    }
}
