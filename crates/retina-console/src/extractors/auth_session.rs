//! Authenticated session extractor

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::debug;

use crate::{
    handlers::removal_cookie,
    session::{Session, SessionId},
    state::AppState,
};

/// Login page path used for every authentication redirect
pub const LOGIN_PATH: &str = "/login";

/// A live operator session resolved from the session cookie
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Session identifier from the cookie
    pub id: SessionId,
    /// Session contents
    pub session: Session,
}

/// Rejection that sends the browser to the login page
#[derive(Debug)]
pub struct LoginRedirect {
    stale_cookie: Option<String>,
}

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        match self.stale_cookie {
            Some(name) => {
                let jar = CookieJar::new().add(removal_cookie(&name));
                (jar, Redirect::to(LOGIN_PATH)).into_response()
            }
            None => Redirect::to(LOGIN_PATH).into_response(),
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthSession {
    type Rejection = LoginRedirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let cookie_name = &state.config.session.cookie_name;
        let jar = CookieJar::from_headers(&parts.headers);

        let Some(cookie) = jar.get(cookie_name) else {
            return Err(LoginRedirect { stale_cookie: None });
        };
        let stale = || LoginRedirect {
            stale_cookie: Some(cookie_name.clone()),
        };

        let id: SessionId = cookie.value().parse().map_err(|_| stale())?;
        let session = state.sessions.get(&id).ok_or_else(|| {
            debug!("Unknown or expired session cookie");
            stale()
        })?;

        Ok(Self { id, session })
    }
}
