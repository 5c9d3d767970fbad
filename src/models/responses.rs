use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Machine-readable error category carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    ValidationError,
    CalculationError,
    InternalServerError,
    ScoreNotFound,
}

/// Error response
///
/// `details` always carries either the offending parameters or the
/// underlying error text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorKind,
    pub message: String,
    pub details: Value,
}

impl ErrorResponse {
    pub fn new(error: ErrorKind, message: impl Into<String>, details: Value) -> Self {
        Self {
            error,
            message: message.into(),
            details,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub version: String,
    pub scores_loaded: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Basic catalogue entry for one score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub version: Option<String>,
}

/// Response for the score listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreListResponse {
    pub scores: Vec<ScoreInfo>,
    pub total: usize,
}

/// Full metadata for a single score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreMetadataResponse {
    #[serde(flatten)]
    pub info: ScoreInfo,
    pub endpoint: String,
    pub references: Vec<String>,
    pub example_request: Value,
}

/// Response for the category listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
    pub total: usize,
}

/// Calculator availability check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateScoreResponse {
    pub score_id: String,
    pub score_exists: bool,
    pub calculator_available: bool,
    pub status: String,
}
