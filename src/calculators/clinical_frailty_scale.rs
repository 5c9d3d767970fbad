//! Clinical Frailty Scale (CFS), version 2.0
//!
//! A clinician-judged level from 1 (very fit) to 9 (terminally ill) for
//! adults aged 65 or older. The level is the result; this module attaches
//! the matching description and risk grouping.

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::core::Calculator;
use crate::error::CalcError;
use crate::models::{ScoreMetadata, ScoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DementiaStatus {
    Yes,
    No,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClinicalFrailtyScaleRequest {
    #[validate(range(min = 1, max = 9))]
    pub frailty_level: u8,
    #[validate(range(min = 65, max = 120))]
    pub age: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dementia_present: Option<DementiaStatus>,
}

struct FrailtyLevel {
    label: &'static str,
    description: &'static str,
    overall_risk: &'static str,
}

const LEVELS: [FrailtyLevel; 9] = [
    FrailtyLevel {
        label: "Very Fit",
        description: "Robust, active, energetic and motivated; among the fittest for their age",
        overall_risk: "Very Low Risk",
    },
    FrailtyLevel {
        label: "Fit",
        description: "No active disease symptoms but less fit than level 1; exercises occasionally",
        overall_risk: "Very Low Risk",
    },
    FrailtyLevel {
        label: "Managing Well",
        description: "Medical problems well controlled; not regularly active beyond routine walking",
        overall_risk: "Low Risk",
    },
    FrailtyLevel {
        label: "Living with Very Mild Frailty",
        description: "Not dependent on others for daily help, but symptoms often limit activities",
        overall_risk: "Mild Risk",
    },
    FrailtyLevel {
        label: "Living with Mild Frailty",
        description: "Evident slowing; needs help with higher-order instrumental activities of daily living",
        overall_risk: "Moderate Risk",
    },
    FrailtyLevel {
        label: "Living with Moderate Frailty",
        description: "Needs help with all outside activities and with keeping house; may need help bathing",
        overall_risk: "Moderate Risk",
    },
    FrailtyLevel {
        label: "Living with Severe Frailty",
        description: "Completely dependent for personal care, but stable and not at high risk of dying within 6 months",
        overall_risk: "High Risk",
    },
    FrailtyLevel {
        label: "Living with Very Severe Frailty",
        description: "Completely dependent and approaching end of life",
        overall_risk: "Very High Risk",
    },
    FrailtyLevel {
        label: "Terminally Ill",
        description: "Life expectancy under 6 months without other evident frailty",
        overall_risk: "Very High Risk",
    },
];

fn care_focus(level: u8) -> &'static str {
    match level {
        0..=3 => "Focus on maintaining fitness and preventing decline through regular activity and preventive care.",
        4 => "Vulnerable to stressors; monitor closely and consider early comprehensive geriatric assessment.",
        5 | 6 => "Comprehensive geriatric assessment and multidisciplinary support are recommended.",
        7 | 8 => "Prioritise goals-of-care discussions and weigh the burden of intensive interventions.",
        _ => "Focus on palliative care and symptom management consistent with patient wishes.",
    }
}

pub struct ClinicalFrailtyScale;

impl Calculator for ClinicalFrailtyScale {
    const ID: &'static str = "clinical_frailty_scale";
    type Params = ClinicalFrailtyScaleRequest;

    fn metadata() -> ScoreMetadata {
        ScoreMetadata {
            title: "Clinical Frailty Scale (CFS)",
            description: "Summarises overall fitness or frailty of adults aged 65 and older",
            category: "geriatrics",
            version: Some("2.0"),
            references: &[
                "Rockwood K, Song X, MacKnight C, et al. A global clinical measure of fitness and frailty in elderly people. CMAJ. 2005;173(5):489-95.",
                "Rockwood K, Theou O. Using the Clinical Frailty Scale in Allocating Scarce Health Care Resources. Can Geriatr J. 2020;23(3):210-5.",
            ],
        }
    }

    fn example() -> ClinicalFrailtyScaleRequest {
        ClinicalFrailtyScaleRequest { frailty_level: 5, age: 78, dementia_present: Some(DementiaStatus::No) }
    }

    fn calculate(params: &ClinicalFrailtyScaleRequest) -> Result<ScoreResult, CalcError> {
        let level = LEVELS
            .get(usize::from(params.frailty_level).wrapping_sub(1))
            .ok_or_else(|| CalcError::validation("frailty_level must be between 1 and 9"))?;

        let mut interpretation = format!(
            "CFS level {} ({}): {}. {}",
            params.frailty_level,
            level.label,
            level.description,
            care_focus(params.frailty_level)
        );
        if params.dementia_present == Some(DementiaStatus::Yes) {
            interpretation.push_str(" With dementia, the level reflects the degree of cognitive as well as physical impairment.");
        }

        Ok(ScoreResult::new(params.frailty_level, "CFS level", interpretation, level.label, level.description)
            .with("overall_risk", json!(level.overall_risk))
            .with("age", json!(params.age)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::run_typed;
    use crate::models::ScoreValue;

    fn cfs(level: u8, age: u32) -> Result<ScoreResult, CalcError> {
        run_typed::<ClinicalFrailtyScale>(&ClinicalFrailtyScaleRequest {
            frailty_level: level,
            age,
            dementia_present: None,
        })
    }

    #[test]
    fn test_labels_follow_level() {
        assert_eq!(cfs(1, 70).unwrap().stage, "Very Fit");
        assert_eq!(cfs(4, 70).unwrap().stage, "Living with Very Mild Frailty");
        assert_eq!(cfs(9, 70).unwrap().stage, "Terminally Ill");
    }

    #[test]
    fn test_result_is_level() {
        let result = cfs(6, 80).unwrap();
        assert_eq!(result.result, ScoreValue::Integer(6));
        assert_eq!(result.unit, "CFS level");
        assert_eq!(result.extra["overall_risk"], "Moderate Risk");
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(matches!(cfs(0, 70), Err(CalcError::Validation(_))));
        assert!(matches!(cfs(10, 70), Err(CalcError::Validation(_))));
        assert!(matches!(cfs(5, 64), Err(CalcError::Validation(_))));
    }
}
