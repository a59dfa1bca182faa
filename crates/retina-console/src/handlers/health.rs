//! Health check and static asset handlers

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json},
};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

const CONSOLE_CSS: &str = include_str!("../../static/console.css");

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: &'static str,
    /// Service version
    pub version: &'static str,
    /// Live operator sessions
    pub sessions: usize,
    /// Timestamp of the check
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Liveness probe; does not contact the backend
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        sessions: state.sessions.len(),
        timestamp: chrono::Utc::now(),
    })
}

/// Console stylesheet
pub async fn stylesheet() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        CONSOLE_CSS,
    )
}
