//! Common test utilities and fixtures for console integration tests

#![allow(dead_code, unused_imports, clippy::unwrap_used, clippy::expect_used)]

use axum::{Router, body::Body, http::Request, response::Response};
use retina_console::{AppState, build_app_with_state, session::SessionId};
use retina_core::Config;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::MockServer;

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;

/// Bearer token held by test sessions
pub const TEST_TOKEN: &str = "test-token";

/// Operator name of test sessions
pub const TEST_OPERATOR: &str = "ops@example.org";

/// Console wired to a mock backend
pub struct TestConsole {
    pub backend: MockServer,
    pub state: Arc<AppState>,
    pub app: Router,
}

impl TestConsole {
    /// Start a mock backend and build the console against it
    pub async fn start() -> Self {
        init_test_logging();
        let backend = MockServer::start().await;

        let mut config = Config::default();
        config.backend.base_url = backend.uri();
        config.backend.request_timeout_secs = 5;
        config.logging.format = "text".to_string();

        let state = Arc::new(AppState::new(config).expect("Failed to build console state"));
        let app = build_app_with_state(Arc::clone(&state));

        Self {
            backend,
            state,
            app,
        }
    }

    /// Create a logged in session directly in the store
    pub fn login(&self) -> SessionId {
        self.state.sessions.create(TEST_TOKEN, TEST_OPERATOR)
    }

    /// Cookie header value for `session`
    pub fn cookie(&self, session: SessionId) -> String {
        format!("{}={}", self.state.config.session.cookie_name, session)
    }

    /// Send a GET request, optionally with a session cookie
    pub async fn get(&self, uri: &str, session: Option<SessionId>) -> Response {
        let mut request = Request::builder().method("GET").uri(uri);
        if let Some(session) = session {
            request = request.header("cookie", self.cookie(session));
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    /// Send a form POST, optionally with a session cookie
    pub async fn post_form(&self, uri: &str, form: &str, session: Option<SessionId>) -> Response {
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded");
        if let Some(session) = session {
            request = request.header("cookie", self.cookie(session));
        }
        self.send(request.body(Body::from(form.to_string())).unwrap())
            .await
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.app.clone().oneshot(request).await.unwrap()
    }
}
