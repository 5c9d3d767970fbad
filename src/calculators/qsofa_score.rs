//! qSOFA (Quick SOFA) score for sepsis
//!
//! Three bedside criteria, one point each. Two or more points flag patients
//! with suspected infection at high risk of poor outcome.

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::core::Calculator;
use crate::error::CalcError;
use crate::models::{ScoreMetadata, ScoreResult, YesNo};

const HIGH_RISK_THRESHOLD: i64 = 2;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QsofaScoreRequest {
    pub respiratory_rate_22_or_higher: YesNo,
    pub altered_mental_status: YesNo,
    pub systolic_bp_100_or_lower: YesNo,
}

pub struct QsofaScore;

impl Calculator for QsofaScore {
    const ID: &'static str = "qsofa_score";
    type Params = QsofaScoreRequest;

    fn metadata() -> ScoreMetadata {
        ScoreMetadata {
            title: "qSOFA (Quick SOFA) Score for Sepsis",
            description: "Identifies patients with suspected infection at greater risk for poor outcomes outside the ICU",
            category: "emergency",
            version: Some("2016"),
            references: &[
                "Seymour CW, et al. Assessment of Clinical Criteria for Sepsis (Sepsis-3). JAMA. 2016;315(8):762-74.",
                "Singer M, et al. The Third International Consensus Definitions for Sepsis and Septic Shock (Sepsis-3). JAMA. 2016;315(8):801-10.",
            ],
        }
    }

    fn example() -> QsofaScoreRequest {
        QsofaScoreRequest {
            respiratory_rate_22_or_higher: YesNo::Yes,
            altered_mental_status: YesNo::No,
            systolic_bp_100_or_lower: YesNo::No,
        }
    }

    fn calculate(params: &QsofaScoreRequest) -> Result<ScoreResult, CalcError> {
        let respiratory = params.respiratory_rate_22_or_higher.points(1);
        let mental = params.altered_mental_status.points(1);
        let pressure = params.systolic_bp_100_or_lower.points(1);
        let score = respiratory + mental + pressure;

        let result = if score >= HIGH_RISK_THRESHOLD {
            ScoreResult::new(
                score,
                "points",
                format!(
                    "qSOFA score of {} (≥2). High risk for poor outcomes associated with sepsis. \
                     Assess for organ dysfunction with a full SOFA score, start sepsis management \
                     protocols, and consider escalation of care.",
                    score
                ),
                "High Risk",
                "High mortality risk",
            )
        } else {
            ScoreResult::new(
                score,
                "points",
                format!(
                    "qSOFA score of {} (<2). Lower risk for poor outcomes associated with sepsis. \
                     Continue standard infection management and reassess if the clinical picture changes.",
                    score
                ),
                "Low Risk",
                "Low mortality risk",
            )
        };

        Ok(result.with(
            "components",
            json!({
                "respiratory_rate_22_or_higher": respiratory,
                "altered_mental_status": mental,
                "systolic_bp_100_or_lower": pressure,
            }),
        ))
    }
}
