//! Winters' formula for metabolic acidosis compensation
//!
//! Expected pCO2 = 1.5 × HCO3 + 8, ± 2 mmHg. When a measured pCO2 is
//! supplied it is compared against that window.

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::core::{round_to, Calculator};
use crate::error::CalcError;
use crate::models::{ScoreMetadata, ScoreResult};

const BICARBONATE_COEFFICIENT: f64 = 1.5;
const OFFSET: f64 = 8.0;
const TOLERANCE: f64 = 2.0;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WintersFormulaRequest {
    /// mEq/L
    #[validate(range(min = 5.0, max = 35.0))]
    pub bicarbonate: f64,
    /// mmHg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 10.0, max = 80.0))]
    pub measured_pco2: Option<f64>,
}

fn acidosis_severity(bicarbonate: f64) -> &'static str {
    if bicarbonate >= 18.0 {
        "Mild metabolic acidosis"
    } else if bicarbonate >= 12.0 {
        "Moderate metabolic acidosis"
    } else if bicarbonate >= 10.0 {
        "Severe metabolic acidosis"
    } else {
        "Life-threatening metabolic acidosis"
    }
}

pub struct WintersFormula;

impl Calculator for WintersFormula {
    const ID: &'static str = "winters_formula_metabolic_acidosis";
    type Params = WintersFormulaRequest;

    fn metadata() -> ScoreMetadata {
        ScoreMetadata {
            title: "Winters' Formula for Metabolic Acidosis Compensation",
            description: "Calculates the expected pCO2 for respiratory compensation of metabolic acidosis",
            category: "pulmonology",
            version: None,
            references: &[
                "Albert MS, Dell RB, Winters RW. Quantitative displacement of acid-base equilibrium in metabolic acidosis. Ann Intern Med. 1967;66(2):312-22.",
            ],
        }
    }

    fn example() -> WintersFormulaRequest {
        WintersFormulaRequest { bicarbonate: 12.0, measured_pco2: Some(28.0) }
    }

    fn calculate(params: &WintersFormulaRequest) -> Result<ScoreResult, CalcError> {
        let expected = BICARBONATE_COEFFICIENT * params.bicarbonate + OFFSET;
        let lower = round_to(expected - TOLERANCE, 1);
        let upper = round_to(expected + TOLERANCE, 1);
        let expected = round_to(expected, 1);

        let (stage, description, interpretation, analysis) = match params.measured_pco2 {
            None => (
                "Expected Compensation",
                "Calculated expected respiratory compensation",
                format!(
                    "For a bicarbonate of {} mEq/L the expected pCO₂ is {:.1} mmHg (range {:.1}-{:.1} mmHg) \
                     if respiratory compensation is appropriate. Obtain an arterial blood gas to assess compensation.",
                    params.bicarbonate, expected, lower, upper
                ),
                json!(null),
            ),
            Some(measured) => {
                let difference = round_to(measured - expected, 1);
                let (stage, description, finding) = if difference < -TOLERANCE {
                    (
                        "Overcompensation",
                        "Respiratory overcompensation",
                        "suggesting a concurrent primary respiratory alkalosis or mixed disorder",
                    )
                } else if difference > TOLERANCE {
                    (
                        "Undercompensation",
                        "Inadequate respiratory compensation",
                        "suggesting a concurrent primary respiratory acidosis or respiratory fatigue",
                    )
                } else {
                    (
                        "Appropriate Compensation",
                        "Expected respiratory compensation",
                        "consistent with appropriate respiratory compensation",
                    )
                };
                (
                    stage,
                    description,
                    format!(
                        "Measured pCO₂ {} mmHg against an expected {:.1} mmHg (range {:.1}-{:.1} mmHg), {}.",
                        measured, expected, lower, upper, finding
                    ),
                    json!({ "measured_pco2": measured, "difference": difference }),
                )
            }
        };

        Ok(ScoreResult::new(expected, "mmHg", interpretation, stage, description)
            .with("expected_range", json!({ "lower": lower, "upper": upper }))
            .with("compensation_analysis", analysis)
            .with("acidosis_severity", json!(acidosis_severity(params.bicarbonate))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::run_typed;
    use crate::models::ScoreValue;

    fn winters(bicarbonate: f64, measured_pco2: Option<f64>) -> ScoreResult {
        run_typed::<WintersFormula>(&WintersFormulaRequest { bicarbonate, measured_pco2 }).unwrap()
    }

    #[test]
    fn test_expected_only() {
        let result = winters(12.0, None);
        assert_eq!(result.result, ScoreValue::Decimal(26.0));
        assert_eq!(result.stage, "Expected Compensation");
        assert_eq!(result.extra["expected_range"], json!({ "lower": 24.0, "upper": 28.0 }));
        assert!(result.extra["compensation_analysis"].is_null());
    }

    #[test]
    fn test_tolerance_window_is_inclusive() {
        assert_eq!(winters(12.0, Some(28.0)).stage, "Appropriate Compensation");
        assert_eq!(winters(12.0, Some(24.0)).stage, "Appropriate Compensation");
    }

    #[test]
    fn test_outside_window() {
        assert_eq!(winters(12.0, Some(20.0)).stage, "Overcompensation");
        assert_eq!(winters(12.0, Some(32.0)).stage, "Undercompensation");
    }

    #[test]
    fn test_measured_out_of_range_rejected() {
        let outcome = run_typed::<WintersFormula>(&WintersFormulaRequest { bicarbonate: 12.0, measured_pco2: Some(5.0) });
        assert!(matches!(outcome, Err(CalcError::Validation(_))));
    }
}
