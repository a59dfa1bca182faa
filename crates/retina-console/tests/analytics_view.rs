//! Analytics dashboard tests

mod common;

use axum::http::StatusCode;
use common::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::{
    Mock, ResponseTemplate,
    matchers::{any, header, method, path, query_param},
};

#[tokio::test]
async fn renders_backend_totals_for_requested_range() {
    let console = TestConsole::start().await;
    let session = console.login();
    Mock::given(method("GET"))
        .and(path("/api/admin/analytics/system"))
        .and(query_param("startDate", "2024-03-01"))
        .and(query_param("endDate", "2024-03-31"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(analytics_body()))
        .expect(1)
        .mount(&console.backend)
        .await;

    let response = console
        .get("/analytics?startDate=2024-03-01&endDate=2024-03-31", Some(session))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    for figure in ["12,345", "678", "42", "9,001", "9,100", "0.2%", "8,990", "Timeout"] {
        assert!(html.contains(figure), "missing {figure}");
    }
    assert!(html.contains("risk-segment risk-minimal"));
    assert!(html.contains("width: 55.56%"));
    assert!(html.contains(r#"value="2024-03-01""#));
}

#[tokio::test]
async fn inverted_range_is_rejected_without_fetch() {
    let console = TestConsole::start().await;
    let session = console.login();
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&console.backend)
        .await;

    let response = console
        .get("/analytics?startDate=2024-04-10&endDate=2024-04-01", Some(session))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("start date must be on or before end date"));
    assert!(!html.contains("risk-bar"));
}

#[tokio::test]
async fn unparseable_date_renders_notice_without_fetch() {
    let console = TestConsole::start().await;
    let session = console.login();
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&console.backend)
        .await;

    let response = console
        .get("/analytics?startDate=2024-13-40", Some(session))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Dates must be real days written as YYYY-MM-DD"));
    assert!(!html.contains("risk-bar"));
    assert!(console.state.sessions.is_authenticated(&session));
}

#[tokio::test]
async fn default_range_ends_today() {
    let console = TestConsole::start().await;
    let session = console.login();
    let today = chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string();
    Mock::given(method("GET"))
        .and(path("/api/admin/analytics/system"))
        .and(query_param("endDate", today.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(analytics_body()))
        .expect(1)
        .mount(&console.backend)
        .await;

    let response = console.get("/analytics", Some(session)).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn default_range_spans_configured_days() {
    let console = TestConsole::start().await;
    let session = console.login();
    let range = retina_core::DateRange::ending_today(30);
    assert_eq!((range.end - range.start).num_days(), 29);
    Mock::given(method("GET"))
        .and(path("/api/admin/analytics/system"))
        .and(query_param("startDate", range.start.format("%Y-%m-%d").to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(analytics_body()))
        .expect(1)
        .mount(&console.backend)
        .await;

    let response = console.get("/analytics", Some(session)).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn server_error_message_is_shown() {
    let console = TestConsole::start().await;
    let session = console.login();
    Mock::given(method("GET"))
        .and(path("/api/admin/analytics/system"))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(json!({"message": "Analytics warehouse offline"})),
        )
        .mount(&console.backend)
        .await;

    let response = console.get("/analytics", Some(session)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Analytics warehouse offline"));
    assert!(console.state.sessions.is_authenticated(&session));
}

#[tokio::test]
async fn unreadable_error_falls_back_to_generic_message() {
    let console = TestConsole::start().await;
    let session = console.login();
    Mock::given(method("GET"))
        .and(path("/api/admin/analytics/system"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&console.backend)
        .await;

    let html = body_text(console.get("/analytics", Some(session)).await).await;

    assert!(html.contains("Failed to load analytics"));
}

#[tokio::test]
async fn malformed_payload_is_reported() {
    let console = TestConsole::start().await;
    let session = console.login();
    Mock::given(method("GET"))
        .and(path("/api/admin/analytics/system"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&console.backend)
        .await;

    let html = body_text(console.get("/analytics", Some(session)).await).await;

    assert!(html.contains("Failed to load analytics"));
}
