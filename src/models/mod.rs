// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{ScoreMetadata, ScoreResult, ScoreValue, Sex, YesNo};
pub use requests::ScoreListQuery;
pub use responses::{
    CategoriesResponse, ErrorKind, ErrorResponse, HealthResponse, ScoreInfo, ScoreListResponse,
    ScoreMetadataResponse, ValidateScoreResponse,
};
