//! Web server setup and configuration

use crate::{error::ConsoleResult, routes::build_routes, state::AppState};
use axum::Router;
use retina_core::Config;
use std::{sync::Arc, time::Duration};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::debug;

/// Build the complete console application with all routes and state
///
/// # Errors
///
/// Returns an error if the backend client cannot be built.
pub fn build_app(config: Config) -> ConsoleResult<Router> {
    let state = Arc::new(AppState::new(config)?);
    Ok(build_app_with_state(state))
}

/// Build the application around existing state
pub fn build_app_with_state(state: Arc<AppState>) -> Router {
    build_routes().with_state(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new()),
    )
}

/// Periodically drop expired sessions
pub fn spawn_session_sweeper(state: Arc<AppState>, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let purged = state.sessions.purge_expired();
            if purged > 0 {
                debug!("Purged {} expired sessions", purged);
            }
        }
    })
}
