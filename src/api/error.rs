//! HTTP error responses.
//!
//! Every error becomes a JSON body with a machine-readable kind, the message and,
//! for validation failures, the list of failing fields.

use crate::{core::validation::FieldError, errors::Error};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Standard error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error kind (e.g., `"NOT_FOUND"`)
    pub error: String,
    /// Human-readable message
    pub message: String,
    /// Failing fields, for validation errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            Self::Validation { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_FAILED"),
            Self::ProductNotFound { .. } | Self::OrderNotFound { .. } => {
                (StatusCode::NOT_FOUND, "NOT_FOUND")
            }
            Self::Conflict { .. } => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Config { .. } | Self::Database(_) | Self::Io(_) | Self::AddrParse(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let message = match &self {
            // storage details stay in the log
            Self::Database(_) => "Internal server error".to_string(),
            Self::Conflict { message } => message.clone(),
            other => other.to_string(),
        };
        let details = match self {
            Self::Validation { errors } => Some(errors),
            _ => None,
        };

        let body = ErrorBody {
            error: kind.to_string(),
            message,
            details,
        };
        (status, Json(body)).into_response()
    }
}
