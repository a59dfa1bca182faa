//! Analytics dashboard handler

use askama::Template;
use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::NaiveDate;
use retina_core::{DateRange, utils::blank_as_none};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    components::Notification,
    error::{ConsoleError, ConsoleResult},
    extractors::AuthSession,
    handlers::{INVALID_QUERY_MESSAGE, expire_session},
    pages::{AnalyticsPage, AnalyticsReport},
    state::AppState,
};

/// Date range query of the dashboard
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsQuery {
    /// First day, defaults to the configured range before `end_date`
    #[serde(default, deserialize_with = "blank_as_none")]
    pub start_date: Option<NaiveDate>,
    /// Last day, defaults to today
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end_date: Option<NaiveDate>,
}

/// Analytics dashboard page
///
/// # Errors
///
/// Returns an error only if the page fails to render; backend failures become
/// notifications.
pub async fn analytics_page(
    State(state): State<Arc<AppState>>,
    auth: AuthSession,
    jar: CookieJar,
    query: Result<Query<AnalyticsQuery>, QueryRejection>,
) -> ConsoleResult<Response> {
    let days = state.config.analytics.default_range_days;

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            info!("Rejected analytics query: {}", rejection.body_text());
            let range = DateRange::ending_today(days);
            let operator = auth.session.operator.clone();
            let mut page = AnalyticsPage::new(operator, range.start, range.end);
            page.notifications = state.sessions.take_flash(&auth.id);
            page.notifications.push(Notification::error(INVALID_QUERY_MESSAGE));
            return Ok(Html(page.render()?).into_response());
        }
    };

    let default_range = match query.end_date {
        Some(end) => DateRange::ending_on(end, days),
        None => DateRange::ending_today(days),
    };
    let start = query.start_date.unwrap_or(default_range.start);
    let end = default_range.end;

    let mut page = AnalyticsPage::new(auth.session.operator.clone(), start, end);
    page.notifications = state.sessions.take_flash(&auth.id);

    match DateRange::new(start, end) {
        Err(e) => {
            info!("Rejected analytics range {} to {}", start, end);
            let notice = Notification::from_error(&ConsoleError::from(e), "Invalid date range");
            page.notifications.push(notice);
        }
        Ok(range) => match state
            .backend
            .get_system_analytics(&auth.session.token, range)
            .await
        {
            Ok(analytics) => page.report = Some(AnalyticsReport::from_analytics(&analytics)),
            Err(e) if e.is_unauthorized() => return Ok(expire_session(&state, &auth, jar)),
            Err(e) => {
                error!("Failed to fetch analytics: {}", e);
                let notice = Notification::from_error(&e, "Failed to load analytics");
                page.notifications.push(notice);
            }
        },
    }

    Ok(Html(page.render()?).into_response())
}
