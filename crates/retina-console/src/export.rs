//! Audit export downloads

use axum::{
    body::Bytes,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use retina_core::{ExportFormat, utils::pretty_json};

/// A file ready to be sent as an attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// Download file name
    pub filename: String,
    /// File format
    pub format: ExportFormat,
    /// File contents
    pub body: Bytes,
}

impl ExportArtifact {
    /// Wrap a backend payload exported on `today`
    ///
    /// JSON payloads are pretty-printed when they parse; CSV passes through.
    #[must_use]
    pub fn new(format: ExportFormat, payload: Bytes, today: NaiveDate) -> Self {
        let body = match format {
            ExportFormat::Csv => payload,
            ExportFormat::Json => match std::str::from_utf8(&payload) {
                Ok(text) => Bytes::from(pretty_json(text)),
                Err(_) => payload,
            },
        };

        Self {
            filename: Self::filename_for(format, today),
            format,
            body,
        }
    }

    /// `audit-logs-YYYY-MM-DD.<ext>`
    #[must_use]
    pub fn filename_for(format: ExportFormat, today: NaiveDate) -> String {
        format!(
            "audit-logs-{}.{}",
            today.format("%Y-%m-%d"),
            format.extension()
        )
    }
}

impl IntoResponse for ExportArtifact {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.filename);
        (
            [
                (header::CONTENT_TYPE, self.format.content_type().to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.body,
        )
            .into_response()
    }
}
