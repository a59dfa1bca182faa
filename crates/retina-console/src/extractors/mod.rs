//! Custom extractors for request processing

pub mod auth_session;

pub use auth_session::{AuthSession, LOGIN_PATH, LoginRedirect};
