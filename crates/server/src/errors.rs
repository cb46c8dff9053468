use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

/// JSON error payload returned by every failing handler.
///
/// Body shape is `{"error": title, "detail": message}`; `detail` is omitted
/// from the JSON when absent.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = match self.detail {
            Some(detail) => serde_json::json!({"error": self.title, "detail": detail}),
            None => serde_json::json!({"error": self.title}),
        };
        (self.status, Json(body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

impl IntoResponse for StartupError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let msg = self.to_string();
        error!(error = %msg, "startup error");
        (status, Json(serde_json::json!({"error": msg}))).into_response()
    }
}
