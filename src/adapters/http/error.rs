//! Error translation for the REST surface.
//!
//! The only place draft errors become HTTP statuses: access control is
//! always 403, missing records 404, constraint/validation failures 400,
//! lock conflicts 409, everything else 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::draft::DraftError;

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }
}

/// Translate a draft error into an HTTP response.
pub fn draft_error_response(error: DraftError) -> Response {
    let (status, code) = match &error {
        DraftError::AccessControl(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
        DraftError::NotFound(_) | DraftError::DoesNotExist(_) => {
            (StatusCode::NOT_FOUND, "NOT_FOUND")
        }
        DraftError::NotUnique(_) => (StatusCode::BAD_REQUEST, "NOT_UNIQUE"),
        DraftError::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
        DraftError::Locked(_) => (StatusCode::CONFLICT, "LOCKED"),
        DraftError::Model(message) => {
            tracing::error!("unexpected model error: {}", message);
            (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
        }
    };

    (status, Json(ErrorResponse::new(code, error.message()))).into_response()
}
