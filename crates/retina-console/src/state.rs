//! Application state management

use retina_core::Config;

use crate::{api_client::BackendClient, error::ConsoleResult, session::SessionStore};

/// Application state holding configuration, backend client and sessions
#[derive(Debug)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Client for the platform admin API
    pub backend: BackendClient,
    /// Logged in operators
    pub sessions: SessionStore,
}

impl AppState {
    /// Create new application state
    ///
    /// # Errors
    ///
    /// Returns an error if the backend client cannot be built.
    pub fn new(config: Config) -> ConsoleResult<Self> {
        let backend = BackendClient::from_config(&config.backend)?;
        let sessions = SessionStore::new(config.session.ttl_minutes);

        Ok(Self {
            config,
            backend,
            sessions,
        })
    }
}
