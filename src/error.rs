use actix_web::{error, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

use crate::models::{ErrorKind, ErrorResponse};

/// Errors a calculator can return
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Input violates a schema constraint or a cross-field clinical rule
    #[error("{0}")]
    Validation(String),

    /// The calculator itself misbehaved
    #[error("{0}")]
    Internal(String),
}

impl CalcError {
    pub fn validation(message: impl Into<String>) -> Self {
        CalcError::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CalcError::Internal(message.into())
    }
}

impl From<validator::ValidationErrors> for CalcError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CalcError::Validation(errors.to_string())
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::Validation(err.to_string())
    }
}

/// Errors raised while building the registry at startup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("score '{0}' is already registered")]
    DuplicateScore(String),

    #[error("example request for '{score_id}' cannot be serialized: {reason}")]
    InvalidExample { score_id: String, reason: String },
}

/// Structured error for request extraction failures
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.body.error, self.body.message)
    }
}

impl std::error::Error for ApiError {}

impl error::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

/// Handle JSON payload errors
///
/// Malformed bodies, unknown enum values and missing fields all fail at the
/// schema layer and are reported the same way as range violations.
pub fn handle_json_payload_error(
    err: error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError {
        status: StatusCode::UNPROCESSABLE_ENTITY,
        body: ErrorResponse::new(
            ErrorKind::ValidationError,
            format!("Invalid request body for {}", req.path()),
            json!({ "error": err.to_string() }),
        ),
    }
    .into()
}

/// Handle query string errors
pub fn handle_query_payload_error(
    err: error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    ApiError {
        status: StatusCode::BAD_REQUEST,
        body: ErrorResponse::new(
            ErrorKind::ValidationError,
            format!("Invalid query: {}", err),
            json!({ "error": err.to_string() }),
        ),
    }
    .into()
}
