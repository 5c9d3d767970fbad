use serde::{Deserialize, Serialize};

/// Query string for the score listing endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreListQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}
