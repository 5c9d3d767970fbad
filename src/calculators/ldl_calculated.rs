//! LDL cholesterol by the Friedewald equation
//!
//! `LDL = TC - HDL - TG/5` (mg/dL). The estimate degrades with very high or
//! very low triglycerides, so every result carries an accuracy assessment.

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::core::{classify, round_to, Band, Calculator};
use crate::error::CalcError;
use crate::models::{ScoreMetadata, ScoreResult};

const TG_ACCURACY_LIMIT: f64 = 400.0;
const TG_HIGH: f64 = 200.0;
const TG_LOW: f64 = 100.0;

const LDL_LEVELS: [Band; 5] = [
    Band::new(f64::NEG_INFINITY, "Optimal", "Optimal LDL cholesterol"),
    Band::new(100.0, "Near Optimal", "Near optimal/above optimal LDL cholesterol"),
    Band::new(130.0, "Borderline High", "Borderline high LDL cholesterol"),
    Band::new(160.0, "High", "High LDL cholesterol"),
    Band::new(190.0, "Very High", "Very high LDL cholesterol"),
];

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LdlCalculatedRequest {
    #[validate(range(min = 50.0, max = 1000.0))]
    pub total_cholesterol: f64,
    #[validate(range(min = 10.0, max = 200.0))]
    pub hdl_cholesterol: f64,
    #[validate(range(min = 30.0, max = 5000.0))]
    pub triglycerides: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Accuracy {
    accuracy_level: &'static str,
    issues: Vec<&'static str>,
    recommend_direct_measurement: bool,
}

fn assess_accuracy(triglycerides: f64, ldl: f64) -> Accuracy {
    let mut accuracy = Accuracy {
        accuracy_level: "High",
        issues: Vec::new(),
        recommend_direct_measurement: triglycerides > TG_ACCURACY_LIMIT,
    };

    if triglycerides > TG_ACCURACY_LIMIT {
        accuracy.issues.push("Triglycerides >400 mg/dL - formula inaccurate");
        accuracy.accuracy_level = "Poor";
    } else if triglycerides > TG_HIGH && ldl < 70.0 {
        accuracy.issues.push("May underestimate LDL at triglycerides >200 mg/dL and LDL <70 mg/dL");
        accuracy.accuracy_level = "Moderate";
    } else if triglycerides > TG_HIGH && ldl > 130.0 {
        accuracy.issues.push("May overestimate LDL at triglycerides >200 mg/dL and LDL >130 mg/dL");
        accuracy.accuracy_level = "Moderate";
    }

    if triglycerides < TG_LOW {
        accuracy.issues.push("May underestimate LDL when triglycerides <100 mg/dL");
        if accuracy.accuracy_level == "High" {
            accuracy.accuracy_level = "Moderate";
        }
    }

    if ldl < 0.0 {
        accuracy.issues.push("Calculated LDL is negative - estimate is not valid");
        accuracy.accuracy_level = "Poor";
        accuracy.recommend_direct_measurement = true;
    }

    accuracy
}

pub struct LdlCalculated;

impl Calculator for LdlCalculated {
    const ID: &'static str = "ldl_calculated";
    type Params = LdlCalculatedRequest;

    fn metadata() -> ScoreMetadata {
        ScoreMetadata {
            title: "LDL Calculated (Friedewald Equation)",
            description: "Estimates LDL cholesterol from total cholesterol, HDL and triglycerides",
            category: "cardiology",
            version: Some("1972"),
            references: &[
                "Friedewald WT, Levy RI, Fredrickson DS. Estimation of the concentration of low-density lipoprotein cholesterol in plasma, without use of the preparative ultracentrifuge. Clin Chem. 1972;18(6):499-502.",
            ],
        }
    }

    fn example() -> LdlCalculatedRequest {
        LdlCalculatedRequest { total_cholesterol: 200.0, hdl_cholesterol: 50.0, triglycerides: 150.0 }
    }

    fn calculate(params: &LdlCalculatedRequest) -> Result<ScoreResult, CalcError> {
        if params.hdl_cholesterol >= params.total_cholesterol {
            return Err(CalcError::validation(
                "HDL cholesterol cannot be greater than or equal to total cholesterol",
            ));
        }

        let ldl = round_to(
            params.total_cholesterol - params.hdl_cholesterol - params.triglycerides / 5.0,
            1,
        );
        let band = classify(ldl, &LDL_LEVELS)?;
        let accuracy = assess_accuracy(params.triglycerides, ldl);

        let mut interpretation = format!(
            "Calculated LDL cholesterol {:.1} mg/dL ({}). Friedewald estimate accuracy: {}.",
            ldl,
            band.description.to_lowercase(),
            accuracy.accuracy_level.to_lowercase()
        );
        if accuracy.recommend_direct_measurement {
            interpretation.push_str(" Direct LDL measurement is recommended.");
        }

        Ok(ScoreResult::new(ldl, "mg/dL", interpretation, band.stage, band.description)
            .with("accuracy_assessment", json!(accuracy)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::run_typed;
    use crate::models::ScoreValue;

    fn ldl(tc: f64, hdl: f64, tg: f64) -> Result<ScoreResult, CalcError> {
        run_typed::<LdlCalculated>(&LdlCalculatedRequest {
            total_cholesterol: tc,
            hdl_cholesterol: hdl,
            triglycerides: tg,
        })
    }

    #[test]
    fn test_friedewald() {
        let result = ldl(200.0, 50.0, 150.0).unwrap();
        assert_eq!(result.result, ScoreValue::Decimal(120.0));
        assert_eq!(result.stage, "Near Optimal");
        assert_eq!(result.extra["accuracy_assessment"]["accuracy_level"], "High");
    }

    #[test]
    fn test_very_high_triglycerides_poor_accuracy() {
        let result = ldl(300.0, 40.0, 500.0).unwrap();
        assert_eq!(result.result, ScoreValue::Decimal(160.0));
        assert_eq!(result.stage, "High");
        assert_eq!(result.extra["accuracy_assessment"]["accuracy_level"], "Poor");
        assert_eq!(result.extra["accuracy_assessment"]["recommend_direct_measurement"], true);
    }

    #[test]
    fn test_low_triglycerides_moderate_accuracy() {
        let result = ldl(150.0, 60.0, 50.0).unwrap();
        assert_eq!(result.result, ScoreValue::Decimal(80.0));
        assert_eq!(result.stage, "Optimal");
        assert_eq!(result.extra["accuracy_assessment"]["accuracy_level"], "Moderate");
    }

    #[test]
    fn test_negative_estimate_flagged() {
        let result = ldl(100.0, 50.0, 300.0).unwrap();
        assert_eq!(result.result, ScoreValue::Decimal(-10.0));
        let accuracy = &result.extra["accuracy_assessment"];
        assert_eq!(accuracy["accuracy_level"], "Poor");
        assert_eq!(accuracy["recommend_direct_measurement"], true);
        assert_eq!(
            accuracy["issues"][1],
            "Calculated LDL is negative - estimate is not valid"
        );
        assert!(result.interpretation.contains("Direct LDL measurement is recommended"));

        let result = ldl(60.0, 50.0, 5000.0).unwrap();
        assert_eq!(result.result, ScoreValue::Decimal(-990.0));
        let issues = result.extra["accuracy_assessment"]["issues"].as_array().unwrap().clone();
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_hdl_not_below_total_rejected() {
        assert!(matches!(ldl(100.0, 100.0, 150.0), Err(CalcError::Validation(_))));
    }
}
