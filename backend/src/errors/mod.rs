//! Global application error types and handlers.
//!
//! This module defines the error taxonomy used across the backend and maps
//! each variant onto a consistent HTTP response. Every error is terminal for
//! the current request: nothing is retried, and the user-facing message is
//! the only reporting channel.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use clubreg_adapters::StoreError;
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;

#[derive(Error, Debug)]
pub enum AppError {
    /// One or more required fields were empty or blank.
    #[error("missing required fields: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// The submitted register number is already present.
    #[error("register number {0} is already registered")]
    DuplicateRegistration(String),

    /// The external store failed; surfaced as-is, never retried.
    #[error("store unavailable: {0}")]
    Store(#[from] StoreError),

    /// An export could not represent the dataset.
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::DuplicateRegistration(_) => "duplicate_registration",
            AppError::Store(_) => "store_unavailable",
            AppError::Export(_) => "export_failed",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DuplicateRegistration(_) => StatusCode::CONFLICT,
            AppError::Store(_) => StatusCode::BAD_GATEWAY,
            AppError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(json!({ "error": self.kind(), "message": self.to_string() }));
        (status, body).into_response()
    }
}
