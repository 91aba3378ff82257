//! Unified error handling
//!
//! Application errors and their JSON shape:
//!
//! ```json
//! {
//!   "success": false,
//!   "error": "validation_error",
//!   "message": "Missing required field: order",
//!   "timestamp": "2026-01-01T12:00:00Z"
//! }
//! ```
//!
//! | Variant | Status | `error` |
//! |---------|--------|---------|
//! | [`AppError::Validation`] | 400 | `validation_error` |
//! | [`AppError::Internal`] | 500 | `internal_error` |
//!
//! Printer failures never reach this type: the dispatcher falls back to the
//! console and the request still succeeds.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use super::time::now_rfc3339;
use crate::printing::ValidationError;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: &'static str,
    pub message: String,
    pub timestamp: String,
}

/// Application error
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    /// Bad request data (400)
    Validation(String),

    #[error("{0}")]
    /// Unexpected failure (500)
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(msg) = &self {
            error!(target: "internal", error = %msg, "Internal error occurred");
        }

        let status = self.status();
        let body = Json(ErrorResponse {
            success: false,
            error: self.code(),
            message: self.to_string(),
            timestamp: now_rfc3339(),
        });

        (status, body).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Validation(format!("Invalid JSON body: {}", e))
    }
}

/// Handler result
pub type AppResult<T> = Result<T, AppError>;
