//! Audit log browser and export handlers

use askama::Template;
use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};
use validator::Validate;

use crate::{
    components::Notification,
    error::ConsoleResult,
    export::ExportArtifact,
    extractors::AuthSession,
    handlers::{INVALID_QUERY_MESSAGE, expire_session},
    pages::AuditLogsPage,
    state::AppState,
    view_state::{AuditQuery, AuditViewState, ExportQuery, first_validation_message},
};

/// Audit log browser page
///
/// # Errors
///
/// Returns an error only if the page fails to render; backend failures become
/// notifications.
pub async fn audit_logs_page(
    State(state): State<Arc<AppState>>,
    auth: AuthSession,
    jar: CookieJar,
    query: Result<Query<AuditQuery>, QueryRejection>,
) -> ConsoleResult<Response> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            info!("Rejected audit query: {}", rejection.body_text());
            let view = AuditViewState::new(state.config.audit.default_page_size);
            let mut page = AuditLogsPage::new(auth.session.operator.clone(), &view);
            page.notifications = state.sessions.take_flash(&auth.id);
            page.notifications.push(Notification::error(INVALID_QUERY_MESSAGE));
            return Ok(Html(page.render()?).into_response());
        }
    };

    let mut view = AuditViewState::resolve(
        auth.session.audit_filter.as_ref(),
        &query,
        &state.config.audit,
    );

    let mut page = AuditLogsPage::new(auth.session.operator.clone(), &view);
    page.notifications = state.sessions.take_flash(&auth.id);

    if let Err(errors) = query.validate() {
        info!("Rejected audit filter: {}", errors);
        let notice = Notification::error(first_validation_message(&errors));
        page.notifications.push(notice);
        return Ok(Html(page.render()?).into_response());
    }

    let result = state
        .backend
        .get_audit_logs(&auth.session.token, &view.filter, view.page, view.page_size)
        .await;

    match result {
        Ok(logs) => {
            state.sessions.set_audit_filter(&auth.id, view.filter.clone());

            let total_pages = logs.total_pages(view.page_size);
            if view.page > total_pages {
                return Ok(Redirect::to(&view.page_href(total_pages)).into_response());
            }
            view.go_to(view.page, total_pages);
            page.load(&logs, &view, query.selected.as_deref());
        }
        Err(e) if e.is_unauthorized() => return Ok(expire_session(&state, &auth, jar)),
        Err(e) => {
            error!("Failed to fetch audit logs: {}", e);
            let notice = Notification::from_error(&e, "Failed to load audit logs");
            page.notifications.push(notice);
        }
    }

    Ok(Html(page.render()?).into_response())
}

/// Download every record matching the filter
///
/// Failures redirect back to the listing with a notification.
pub async fn export_audit_logs(
    State(state): State<Arc<AppState>>,
    auth: AuthSession,
    jar: CookieJar,
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> Response {
    let listing = AuditViewState::new(state.config.audit.default_page_size);

    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            info!("Rejected export query: {}", rejection.body_text());
            state
                .sessions
                .push_flash(&auth.id, Notification::error(INVALID_QUERY_MESSAGE));
            return Redirect::to(&listing.page_href(1)).into_response();
        }
    };

    let back = listing.with_filter(query.filter.clone()).page_href(1);

    if let Err(errors) = query.validate() {
        state.sessions.push_flash(
            &auth.id,
            Notification::error(first_validation_message(&errors)),
        );
        return Redirect::to(&back).into_response();
    }

    match state
        .backend
        .export_audit_logs(&auth.session.token, &query.filter, query.format)
        .await
    {
        Ok(payload) => {
            let artifact = ExportArtifact::new(query.format, payload, Utc::now().date_naive());
            info!(
                "Exported audit logs as {} for {}",
                artifact.filename, auth.session.operator
            );
            artifact.into_response()
        }
        Err(e) if e.is_unauthorized() => expire_session(&state, &auth, jar),
        Err(e) => {
            error!("Failed to export audit logs: {}", e);
            state.sessions.push_flash(
                &auth.id,
                Notification::from_error(&e, "Failed to export audit logs"),
            );
            Redirect::to(&back).into_response()
        }
    }
}
