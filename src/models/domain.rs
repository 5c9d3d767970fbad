use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::models::responses::ScoreInfo;

/// Binary clinical finding as submitted by clients ("yes" / "no")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    #[inline]
    pub fn is_yes(self) -> bool {
        self == YesNo::Yes
    }

    /// Points contributed when the finding is present
    #[inline]
    pub fn points(self, weight: i64) -> i64 {
        if self.is_yes() { weight } else { 0 }
    }
}

/// Biological sex where a score weights it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

/// Primary value of a calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScoreValue {
    Integer(i64),
    Decimal(f64),
    Label(String),
}

impl From<i64> for ScoreValue {
    fn from(value: i64) -> Self {
        ScoreValue::Integer(value)
    }
}

impl From<u8> for ScoreValue {
    fn from(value: u8) -> Self {
        ScoreValue::Integer(i64::from(value))
    }
}

impl From<f64> for ScoreValue {
    fn from(value: f64) -> Self {
        ScoreValue::Decimal(value)
    }
}

impl From<&str> for ScoreValue {
    fn from(value: &str) -> Self {
        ScoreValue::Label(value.to_string())
    }
}

impl fmt::Display for ScoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreValue::Integer(v) => write!(f, "{}", v),
            ScoreValue::Decimal(v) => write!(f, "{}", v),
            ScoreValue::Label(v) => f.write_str(v),
        }
    }
}

/// Output of every calculator
///
/// The five named fields are mandatory for every score. Score-specific
/// breakdowns live in `extra`, which is flattened into the JSON body. The
/// map is ordered so the same result always serializes to the same bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub result: ScoreValue,
    pub unit: String,
    pub interpretation: String,
    pub stage: String,
    pub stage_description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ScoreResult {
    pub fn new(
        result: impl Into<ScoreValue>,
        unit: &str,
        interpretation: impl Into<String>,
        stage: impl Into<String>,
        stage_description: impl Into<String>,
    ) -> Self {
        Self {
            result: result.into(),
            unit: unit.to_string(),
            interpretation: interpretation.into(),
            stage: stage.into(),
            stage_description: stage_description.into(),
            extra: Map::new(),
        }
    }

    /// Attach a score-specific field
    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }
}

/// Static catalogue description of a calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreMetadata {
    pub title: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub version: Option<&'static str>,
    pub references: &'static [&'static str],
}

impl ScoreMetadata {
    pub fn info(&self, id: &str) -> ScoreInfo {
        ScoreInfo {
            id: id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            category: self.category.to_string(),
            version: self.version.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yes_no_points() {
        assert_eq!(YesNo::Yes.points(2), 2);
        assert_eq!(YesNo::No.points(2), 0);
    }

    #[test]
    fn test_score_result_flattens_extras() {
        let result = ScoreResult::new(3_i64, "points", "text", "High Risk", "desc")
            .with("components", json!({"a": 1}));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["result"], json!(3));
        assert_eq!(value["components"]["a"], json!(1));
        assert_eq!(value["stage"], json!("High Risk"));
    }

    #[test]
    fn test_decimal_result_serializes_as_number() {
        let result = ScoreResult::new(20.0, "index", "text", "Good Outcome", "desc");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["result"], json!(20.0));
    }
}
