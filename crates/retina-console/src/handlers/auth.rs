//! Login and logout handlers

use askama::Template;
use axum::{
    extract::{Form, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};
use validator::Validate;

use crate::{
    components::Notification,
    error::ConsoleResult,
    extractors::AuthSession,
    handlers::{removal_cookie, to_login},
    pages::{ANALYTICS_PATH, LoginPage},
    state::AppState,
};

/// Query flags of the login page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginQuery {
    /// Set when the previous session was rejected by the backend
    #[serde(default)]
    pub expired: Option<String>,
}

/// Submitted login form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginForm {
    /// Operator email
    #[validate(length(min = 3, max = 254, message = "Enter a valid email address"))]
    pub email: String,
    /// Operator password
    #[validate(length(min = 1, message = "Enter your password"))]
    pub password: String,
}

/// Login form page; operators with a live session go straight to the dashboard
///
/// # Errors
///
/// Returns an error if the page fails to render.
pub async fn login_page(
    auth: Option<AuthSession>,
    Query(query): Query<LoginQuery>,
) -> ConsoleResult<Response> {
    if auth.is_some() {
        return Ok(Redirect::to(ANALYTICS_PATH).into_response());
    }

    let mut page = LoginPage::new();
    if query.expired.is_some() {
        page = page.with_notification(Notification::info(
            "Your session has expired, please sign in again",
        ));
    }
    Ok(Html(page.render()?).into_response())
}

/// Exchange credentials for a backend token and start a session
///
/// # Errors
///
/// Returns an error if the login page fails to render after a rejected attempt.
pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> ConsoleResult<Response> {
    let mut page = LoginPage::new();
    page.email = form.email.trim().to_string();

    if let Err(errors) = form.validate() {
        let message = crate::view_state::first_validation_message(&errors);
        let page = page.with_notification(Notification::error(message));
        return Ok(Html(page.render()?).into_response());
    }

    match state.backend.login(form.email.trim(), &form.password).await {
        Ok(login) => {
            let operator = login.name.unwrap_or_else(|| form.email.trim().to_string());
            let welcome = Notification::success(format!("Signed in as {operator}"));
            let id = state.sessions.create(login.token, operator);
            state.sessions.push_flash(&id, welcome);

            let cookie = Cookie::build((state.config.session.cookie_name.clone(), id.to_string()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .secure(state.config.session.secure_cookie)
                .build();

            Ok((jar.add(cookie), Redirect::to(ANALYTICS_PATH)).into_response())
        }
        Err(e) if e.is_unauthorized() => {
            warn!("Rejected login for {}", page.email);
            let page = page.with_notification(Notification::error("Invalid email or password"));
            Ok(Html(page.render()?).into_response())
        }
        Err(e) => {
            error!("Login request failed: {}", e);
            let page =
                page.with_notification(Notification::from_error(&e, "Unable to sign in right now"));
            Ok(Html(page.render()?).into_response())
        }
    }
}

/// End the session and return to the login page
pub async fn logout(
    State(state): State<Arc<AppState>>,
    auth: Option<AuthSession>,
    jar: CookieJar,
) -> Response {
    if let Some(auth) = auth {
        state.sessions.logout(&auth.id);
        info!("Operator {} logged out", auth.session.operator);
    }
    let jar = jar.add(removal_cookie(&state.config.session.cookie_name));
    (jar, to_login()).into_response()
}

/// Landing page
pub async fn index() -> Redirect {
    Redirect::to(ANALYTICS_PATH)
}
