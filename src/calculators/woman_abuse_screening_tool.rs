//! Woman Abuse Screening Tool (WAST)
//!
//! Eight items, each answer worth 1 (most concerning) to 3 (least). Lower
//! totals mean higher risk of intimate partner violence.

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::core::Calculator;
use crate::error::CalcError;
use crate::models::{ScoreMetadata, ScoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TensionLevel {
    LotsOfTension,
    SomeTension,
    NoTension,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    GreatDifficulty,
    SomeDifficulty,
    NoDifficulty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Often,
    Sometimes,
    Never,
}

impl TensionLevel {
    fn points(self) -> i64 {
        match self {
            TensionLevel::LotsOfTension => 1,
            TensionLevel::SomeTension => 2,
            TensionLevel::NoTension => 3,
        }
    }
}

impl Difficulty {
    fn points(self) -> i64 {
        match self {
            Difficulty::GreatDifficulty => 1,
            Difficulty::SomeDifficulty => 2,
            Difficulty::NoDifficulty => 3,
        }
    }
}

impl Frequency {
    fn points(self) -> i64 {
        match self {
            Frequency::Often => 1,
            Frequency::Sometimes => 2,
            Frequency::Never => 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WomanAbuseScreeningToolRequest {
    pub tension_arguments_relationship: TensionLevel,
    pub partner_jealousy_possessiveness: Difficulty,
    pub arguments_resolution: Frequency,
    pub arguments_feeling_bad: Frequency,
    pub physical_violence_frequency: Frequency,
    pub feel_frightened: Frequency,
    pub physical_abuse_history: Frequency,
    pub emotional_abuse_history: Frequency,
}

pub struct WomanAbuseScreeningTool;

impl Calculator for WomanAbuseScreeningTool {
    const ID: &'static str = "woman_abuse_screening_tool";
    type Params = WomanAbuseScreeningToolRequest;

    fn metadata() -> ScoreMetadata {
        ScoreMetadata {
            title: "Woman Abuse Screening Tool (WAST)",
            description: "Screens for intimate partner violence in primary care and emergency settings",
            category: "emergency",
            version: None,
            references: &[
                "Brown JB, Lent B, Schmidt G, Sas G. Application of the Woman Abuse Screening Tool (WAST) and WAST-short in the family practice setting. J Fam Pract. 2000;49(10):896-903.",
            ],
        }
    }

    fn example() -> WomanAbuseScreeningToolRequest {
        WomanAbuseScreeningToolRequest {
            tension_arguments_relationship: TensionLevel::SomeTension,
            partner_jealousy_possessiveness: Difficulty::NoDifficulty,
            arguments_resolution: Frequency::Never,
            arguments_feeling_bad: Frequency::Sometimes,
            physical_violence_frequency: Frequency::Never,
            feel_frightened: Frequency::Never,
            physical_abuse_history: Frequency::Never,
            emotional_abuse_history: Frequency::Never,
        }
    }

    fn calculate(params: &WomanAbuseScreeningToolRequest) -> Result<ScoreResult, CalcError> {
        let items = [
            ("tension_arguments_relationship", params.tension_arguments_relationship.points()),
            ("partner_jealousy_possessiveness", params.partner_jealousy_possessiveness.points()),
            ("arguments_resolution", params.arguments_resolution.points()),
            ("arguments_feeling_bad", params.arguments_feeling_bad.points()),
            ("physical_violence_frequency", params.physical_violence_frequency.points()),
            ("feel_frightened", params.feel_frightened.points()),
            ("physical_abuse_history", params.physical_abuse_history.points()),
            ("emotional_abuse_history", params.emotional_abuse_history.points()),
        ];
        let total: i64 = items.iter().map(|(_, points)| points).sum();

        let (stage, description, risk_level, recommendations) = if total <= 12 {
            (
                "High Risk",
                "High risk for intimate partner violence",
                "high",
                vec![
                    "Conduct a private, detailed safety assessment",
                    "Offer referral to domestic violence advocacy services",
                    "Develop a safety plan with the patient",
                    "Document findings carefully in the medical record",
                ],
            )
        } else if total <= 17 {
            (
                "Moderate Risk",
                "Moderate risk for intimate partner violence",
                "moderate",
                vec![
                    "Explore relationship concerns further in private",
                    "Provide information on local support resources",
                    "Arrange follow-up screening",
                ],
            )
        } else {
            (
                "Low Risk",
                "Low risk for intimate partner violence",
                "low",
                vec![
                    "Continue routine screening at future visits",
                    "Let the patient know support is available if circumstances change",
                ],
            )
        };

        let breakdown: serde_json::Map<String, serde_json::Value> =
            items.iter().map(|(name, points)| (name.to_string(), json!(points))).collect();

        Ok(ScoreResult::new(
            total,
            "points",
            format!(
                "WAST score {} of 24. {}. Lower scores indicate more concerning responses.",
                total, description
            ),
            stage,
            description,
        )
        .with("risk_level", json!(risk_level))
        .with("safety_recommendations", json!(recommendations))
        .with("item_scores", serde_json::Value::Object(breakdown)))
    }
}
