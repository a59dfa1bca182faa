//! Route definitions for the console

use crate::{
    handlers::{analytics, audit, auth, health},
    state::AppState,
};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

/// Build the complete console router
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Authentication
        .route("/", get(auth::index))
        .route("/login", get(auth::login_page).post(auth::login_submit))
        .route("/logout", post(auth::logout))
        // Pages
        .route("/analytics", get(analytics::analytics_page))
        .route("/audit-logs", get(audit::audit_logs_page))
        .route("/audit-logs/export", get(audit::export_audit_logs))
        // Assets and health
        .route("/static/console.css", get(health::stylesheet))
        .route("/health", get(health::health_check))
}
