//! HTTP client for the retina platform admin API

use axum::body::Bytes;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use retina_core::{
    AuditLogFilter, AuditLogPage, DateRange, ExportFormat, SystemAnalytics,
    config::BackendConfig,
};
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{ConsoleError, ConsoleResult, server_message};

/// Credentials posted to the backend login endpoint
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    /// Operator email
    pub email: &'a str,
    /// Operator password
    pub password: &'a str,
}

/// Successful login answer
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent admin calls
    #[serde(alias = "accessToken")]
    pub token: String,
    /// Display name of the operator
    #[serde(default, alias = "fullName")]
    pub name: Option<String>,
}

/// API client for the admin endpoints of the platform backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ConsoleResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from the backend configuration section
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &BackendConfig) -> ConsoleResult<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Backend base URL without trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange operator credentials for a bearer token
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Unauthorized`] for rejected credentials, or an
    /// error if the request fails or the response cannot be parsed.
    pub async fn login(&self, email: &str, password: &str) -> ConsoleResult<LoginResponse> {
        let url = format!("{}/api/admin/auth/login", self.base_url);
        let request = self
            .client
            .post(&url)
            .json(&LoginRequest { email, password });

        let response = Self::send(request).await?;
        Self::decode(response).await
    }

    /// Get the analytics snapshot for a date range
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Unauthorized`] when the token is rejected, or an
    /// error if the request fails or the response cannot be parsed.
    pub async fn get_system_analytics(
        &self,
        token: &str,
        range: DateRange,
    ) -> ConsoleResult<SystemAnalytics> {
        let url = format!("{}/api/admin/analytics/system", self.base_url);
        let query = [
            ("startDate", range.start.format("%Y-%m-%d").to_string()),
            ("endDate", range.end.format("%Y-%m-%d").to_string()),
        ];
        let request = self.client.get(&url).bearer_auth(token).query(&query);

        let response = Self::send(request).await?;
        Self::decode(response).await
    }

    /// Get one page of audit records matching `filter`
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Unauthorized`] when the token is rejected, or an
    /// error if the request fails or the response cannot be parsed.
    pub async fn get_audit_logs(
        &self,
        token: &str,
        filter: &AuditLogFilter,
        page: u32,
        page_size: u32,
    ) -> ConsoleResult<AuditLogPage> {
        let url = format!("{}/api/admin/audit-logs", self.base_url);
        let mut query = vec![
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
        ];
        query.extend(filter.to_query_pairs());
        let request = self.client.get(&url).bearer_auth(token).query(&query);

        let response = Self::send(request).await?;
        Self::decode(response).await
    }

    /// Download every audit record matching `filter` in `format`
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Unauthorized`] when the token is rejected, or an
    /// error if the request fails.
    pub async fn export_audit_logs(
        &self,
        token: &str,
        filter: &AuditLogFilter,
        format: ExportFormat,
    ) -> ConsoleResult<Bytes> {
        let url = format!("{}/api/admin/audit-logs/export", self.base_url);
        let mut query = vec![("format", format.extension().to_string())];
        query.extend(filter.to_query_pairs());
        let request = self.client.get(&url).bearer_auth(token).query(&query);

        let response = Self::send(request).await?;
        Ok(response.bytes().await?)
    }

    async fn send(request: RequestBuilder) -> ConsoleResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!("Backend answered {} for {}", status, response.url().path());

        if status == StatusCode::UNAUTHORIZED {
            return Err(ConsoleError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Backend returned error status {}", status);
            return Err(ConsoleError::Backend {
                status,
                message: server_message(&body),
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> ConsoleResult<T> {
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
