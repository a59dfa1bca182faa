//! HTTP handlers for console pages

pub mod analytics;
pub mod audit;
pub mod auth;
pub mod health;

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::warn;

use crate::{
    extractors::{AuthSession, LOGIN_PATH},
    state::AppState,
};

/// Expired-session redirect target
pub const SESSION_EXPIRED_PATH: &str = "/login?expired=1";

/// Shown when a query string cannot be parsed
pub const INVALID_QUERY_MESSAGE: &str =
    "Some filter values could not be read. Dates must be real days written as YYYY-MM-DD.";

/// End the session after the backend rejected its token
///
/// Clears the server-side session and the cookie, then sends the browser to the
/// login page.
pub fn expire_session(state: &AppState, auth: &AuthSession, jar: CookieJar) -> Response {
    warn!("Backend rejected token of {}, ending session", auth.session.operator);
    state.sessions.logout(&auth.id);
    let jar = jar.add(removal_cookie(&state.config.session.cookie_name));
    (jar, Redirect::to(SESSION_EXPIRED_PATH)).into_response()
}

/// Cookie instructing the browser to drop the session cookie
pub(crate) fn removal_cookie(name: &str) -> Cookie<'static> {
    let mut cookie = Cookie::build((name.to_string(), "")).path("/").build();
    cookie.make_removal();
    cookie
}

/// Redirect to the login page without touching cookies
#[must_use]
pub fn to_login() -> Redirect {
    Redirect::to(LOGIN_PATH)
}
