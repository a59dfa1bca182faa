//! In-memory operator sessions keyed by an opaque cookie value

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use retina_core::AuditLogFilter;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

use crate::components::Notification;

/// Opaque session identifier stored in the session cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh random identifier
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// An authenticated operator
#[derive(Debug, Clone)]
pub struct Session {
    /// Backend bearer token
    pub token: String,
    /// Operator display name
    pub operator: String,
    /// Last request time
    pub last_seen: DateTime<Utc>,
    /// Filter of the last audit log listing, used to detect filter changes
    pub audit_filter: Option<AuditLogFilter>,
    flash: Vec<Notification>,
}

impl Session {
    fn new(token: String, operator: String) -> Self {
        Self {
            token,
            operator,
            last_seen: Utc::now(),
            audit_filter: None,
            flash: Vec::new(),
        }
    }

    fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.last_seen > ttl
    }
}

/// Concurrent session store with idle expiry
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<SessionId, Session>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store whose sessions expire after `ttl_minutes` of inactivity
    #[must_use]
    pub fn new(ttl_minutes: u64) -> Self {
        let minutes = i64::try_from(ttl_minutes).unwrap_or(i64::MAX);
        Self {
            sessions: DashMap::new(),
            ttl: Duration::try_minutes(minutes).unwrap_or(Duration::MAX),
        }
    }

    /// Start a session for a freshly logged in operator
    pub fn create(&self, token: impl Into<String>, operator: impl Into<String>) -> SessionId {
        let id = SessionId::new();
        let operator = operator.into();
        info!("Session started for {}", operator);
        self.sessions.insert(id, Session::new(token.into(), operator));
        id
    }

    /// Look up a live session, refreshing its idle timer
    ///
    /// Expired sessions are removed and reported as absent.
    #[must_use]
    pub fn get(&self, id: &SessionId) -> Option<Session> {
        let now = Utc::now();
        let expired = match self.sessions.get_mut(id) {
            None => return None,
            Some(session) if session.is_expired(self.ttl, now) => true,
            Some(mut session) => {
                session.last_seen = now;
                return Some(session.clone());
            }
        };
        if expired {
            debug!("Session {} expired", id);
            self.sessions.remove(id);
        }
        None
    }

    /// Whether `id` names a live session
    #[must_use]
    pub fn is_authenticated(&self, id: &SessionId) -> bool {
        self.get(id).is_some()
    }

    /// End a session; returns whether one existed
    pub fn logout(&self, id: &SessionId) -> bool {
        let removed = self.sessions.remove(id);
        if let Some((_, session)) = &removed {
            info!("Session ended for {}", session.operator);
        }
        removed.is_some()
    }

    /// Queue a notification for the next rendered page
    pub fn push_flash(&self, id: &SessionId, notification: Notification) {
        if let Some(mut session) = self.sessions.get_mut(id) {
            session.flash.push(notification);
        }
    }

    /// Take all queued notifications
    #[must_use]
    pub fn take_flash(&self, id: &SessionId) -> Vec<Notification> {
        self.sessions
            .get_mut(id)
            .map(|mut session| std::mem::take(&mut session.flash))
            .unwrap_or_default()
    }

    /// Remember the filter of the audit listing just shown
    pub fn set_audit_filter(&self, id: &SessionId, filter: AuditLogFilter) {
        if let Some(mut session) = self.sessions.get_mut(id) {
            session.audit_filter = Some(filter);
        }
    }

    /// Drop every expired session; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| !session.is_expired(self.ttl, now));
        before.saturating_sub(self.sessions.len())
    }

    /// Number of stored sessions
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
