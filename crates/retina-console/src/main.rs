//! Web console for retina platform operators
#![forbid(unsafe_code)]

use retina_console::{AppState, build_app_with_state, server::spawn_session_sweeper};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Get configuration
    let (config, load_error) = match retina_core::Config::load() {
        Ok(config) => (config, None),
        Err(e) => (retina_core::Config::default(), Some(e)),
    };

    retina_core::init_logging(&config.logging)?;
    if let Some(e) = load_error {
        warn!("Failed to load config: {}, using defaults", e);
    }

    let host: IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| format!("Invalid server host '{}': {}", config.server.host, e))?;
    let addr = SocketAddr::new(host, config.server.port);

    let state = Arc::new(AppState::new(config)?);
    spawn_session_sweeper(Arc::clone(&state), SESSION_SWEEP_INTERVAL);
    let app = build_app_with_state(Arc::clone(&state));

    info!(
        "Starting retina console on {} against backend {}",
        addr,
        state.backend.base_url()
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Retina console stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
