//! CHADS₂ score for stroke risk in atrial fibrillation

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::core::Calculator;
use crate::error::CalcError;
use crate::models::{ScoreMetadata, ScoreResult, YesNo};

struct StrokeRisk {
    annual_rate: f64,
    confidence_interval: &'static str,
    category: &'static str,
}

/// Adjusted annual stroke rate by score, Gage et al. 2001
const STROKE_RISK: [StrokeRisk; 7] = [
    StrokeRisk { annual_rate: 1.9, confidence_interval: "1.2-3.0", category: "Low" },
    StrokeRisk { annual_rate: 2.8, confidence_interval: "2.0-3.8", category: "Low-Intermediate" },
    StrokeRisk { annual_rate: 4.0, confidence_interval: "3.1-5.1", category: "Intermediate" },
    StrokeRisk { annual_rate: 5.9, confidence_interval: "4.6-7.3", category: "High" },
    StrokeRisk { annual_rate: 8.5, confidence_interval: "6.3-11.1", category: "High" },
    StrokeRisk { annual_rate: 12.5, confidence_interval: "8.2-17.5", category: "Very High" },
    StrokeRisk { annual_rate: 18.2, confidence_interval: "10.5-27.4", category: "Very High" },
];

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Chads2ScoreRequest {
    pub congestive_heart_failure: YesNo,
    pub hypertension: YesNo,
    pub age_75_or_older: YesNo,
    pub diabetes_mellitus: YesNo,
    pub stroke_tia_thromboembolism: YesNo,
}

pub struct Chads2Score;

impl Calculator for Chads2Score {
    const ID: &'static str = "chads2_score";
    type Params = Chads2ScoreRequest;

    fn metadata() -> ScoreMetadata {
        ScoreMetadata {
            title: "CHADS₂ Score for Atrial Fibrillation Stroke Risk",
            description: "Estimates annual stroke risk in non-valvular atrial fibrillation",
            category: "cardiology",
            version: Some("2001"),
            references: &[
                "Gage BF, Waterman AD, Shannon W, Boechler M, Rich MW, Radford MJ. Validation of clinical classification schemes for predicting stroke. JAMA. 2001;285(22):2864-70.",
            ],
        }
    }

    fn example() -> Chads2ScoreRequest {
        Chads2ScoreRequest {
            congestive_heart_failure: YesNo::No,
            hypertension: YesNo::Yes,
            age_75_or_older: YesNo::Yes,
            diabetes_mellitus: YesNo::No,
            stroke_tia_thromboembolism: YesNo::No,
        }
    }

    fn calculate(params: &Chads2ScoreRequest) -> Result<ScoreResult, CalcError> {
        let chf = params.congestive_heart_failure.points(1);
        let htn = params.hypertension.points(1);
        let age = params.age_75_or_older.points(1);
        let dm = params.diabetes_mellitus.points(1);
        let stroke = params.stroke_tia_thromboembolism.points(2);
        let score = chf + htn + age + dm + stroke;

        let risk = usize::try_from(score)
            .ok()
            .and_then(|index| STROKE_RISK.get(index))
            .ok_or_else(|| CalcError::internal(format!("no stroke risk entry for score {}", score)))?;

        let guidance = match score {
            0 => "Consider further stratification with CHA₂DS₂-VASc. Aspirin or no therapy may be reasonable depending on bleeding risk.",
            1 => "Consider CHA₂DS₂-VASc stratification or anticoagulation after weighing bleeding risk.",
            2 => "Anticoagulation is generally recommended unless contraindicated by bleeding risk.",
            _ => "Anticoagulation with warfarin or a direct oral anticoagulant is strongly recommended.",
        };

        let interpretation = format!(
            "CHADS₂ score {}: {} stroke risk ({}% per year, 95% CI {}%). {}",
            score,
            risk.category.to_lowercase(),
            risk.annual_rate,
            risk.confidence_interval,
            guidance
        );

        Ok(ScoreResult::new(
            score,
            "points",
            interpretation,
            format!("{} Risk", risk.category),
            format!("{} annual stroke risk", risk.category),
        )
        .with("annual_stroke_rate", json!(risk.annual_rate))
        .with("confidence_interval", json!(risk.confidence_interval))
        .with(
            "scoring_breakdown",
            json!({
                "congestive_heart_failure": chf,
                "hypertension": htn,
                "age_75_or_older": age,
                "diabetes_mellitus": dm,
                "stroke_tia_thromboembolism": stroke,
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScoreValue;

    fn none() -> Chads2ScoreRequest {
        Chads2ScoreRequest {
            congestive_heart_failure: YesNo::No,
            hypertension: YesNo::No,
            age_75_or_older: YesNo::No,
            diabetes_mellitus: YesNo::No,
            stroke_tia_thromboembolism: YesNo::No,
        }
    }

    #[test]
    fn test_zero_is_low_risk() {
        let result = Chads2Score::calculate(&none()).unwrap();
        assert_eq!(result.result, ScoreValue::Integer(0));
        assert_eq!(result.stage, "Low Risk");
        assert_eq!(result.extra["annual_stroke_rate"], json!(1.9));
    }

    #[test]
    fn test_stroke_counts_double() {
        let params = Chads2ScoreRequest { stroke_tia_thromboembolism: YesNo::Yes, ..none() };
        let result = Chads2Score::calculate(&params).unwrap();
        assert_eq!(result.result, ScoreValue::Integer(2));
        assert_eq!(result.stage, "Intermediate Risk");
    }

    #[test]
    fn test_maximum_score() {
        let params = Chads2ScoreRequest {
            congestive_heart_failure: YesNo::Yes,
            hypertension: YesNo::Yes,
            age_75_or_older: YesNo::Yes,
            diabetes_mellitus: YesNo::Yes,
            stroke_tia_thromboembolism: YesNo::Yes,
        };
        let result = Chads2Score::calculate(&params).unwrap();
        assert_eq!(result.result, ScoreValue::Integer(6));
        assert_eq!(result.stage, "Very High Risk");
        assert_eq!(result.extra["confidence_interval"], "10.5-27.4");
    }
}
