use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::HistoryError;
use crate::types::MetricKind;

/// Failure returned to HTTP clients. Carries only a generic message; the
/// underlying cause is logged where the error is created.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    InternalError(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    /// Map a pipeline failure for `kind` onto the endpoint's generic response.
    pub fn from_history(kind: MetricKind, error: &HistoryError) -> Self {
        let message = format!("Failed to fetch {} history.", kind);
        if error.is_malformed_input() {
            Self::bad_request(message)
        } else {
            Self::internal_error(message)
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) | ApiError::InternalError(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}
