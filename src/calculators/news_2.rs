//! National Early Warning Score 2 (NEWS2)
//!
//! Seven physiological parameters, each banded to 0-3 points. SpO2 uses
//! scale 2 for patients with hypercapnic respiratory failure. A single
//! parameter scoring 3 (a "red score") escalates an otherwise low total.

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::core::Calculator;
use crate::error::CalcError;
use crate::models::{ScoreMetadata, ScoreResult, YesNo};

const RED_SCORE: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Consciousness {
    /// Alert
    Alert,
    /// New confusion, or responds only to voice, pain, or is unresponsive
    Altered,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct News2Request {
    /// breaths/min
    #[validate(range(min = 1, max = 80))]
    pub respiratory_rate: i64,
    pub hypercapnic_respiratory_failure: YesNo,
    /// %
    #[validate(range(min = 50, max = 100))]
    pub oxygen_saturation: i64,
    pub supplemental_oxygen: YesNo,
    /// °C
    #[validate(range(min = 25.0, max = 45.0))]
    pub temperature: f64,
    /// mmHg
    #[validate(range(min = 40, max = 300))]
    pub systolic_bp: i64,
    /// beats/min
    #[validate(range(min = 20, max = 250))]
    pub heart_rate: i64,
    pub consciousness: Consciousness,
}

fn respiratory_rate_points(rate: i64) -> i64 {
    match rate {
        i64::MIN..=8 => 3,
        9..=11 => 1,
        12..=20 => 0,
        21..=24 => 2,
        _ => 3,
    }
}

fn spo2_points(saturation: i64, hypercapnic: bool, on_oxygen: bool) -> i64 {
    if !hypercapnic {
        return match saturation {
            i64::MIN..=91 => 3,
            92..=93 => 2,
            94..=95 => 1,
            _ => 0,
        };
    }

    match saturation {
        i64::MIN..=83 => 3,
        84..=85 => 2,
        86..=87 => 1,
        88..=92 => 0,
        _ if !on_oxygen => 0,
        93..=94 => 1,
        95..=96 => 2,
        _ => 3,
    }
}

fn temperature_points(celsius: f64) -> i64 {
    if celsius <= 35.0 {
        3
    } else if celsius <= 36.0 {
        1
    } else if celsius <= 38.0 {
        0
    } else if celsius <= 39.0 {
        1
    } else {
        2
    }
}

fn systolic_points(pressure: i64) -> i64 {
    match pressure {
        i64::MIN..=90 => 3,
        91..=100 => 2,
        101..=110 => 1,
        111..=219 => 0,
        _ => 3,
    }
}

fn heart_rate_points(rate: i64) -> i64 {
    match rate {
        i64::MIN..=40 => 3,
        41..=50 => 1,
        51..=90 => 0,
        91..=110 => 1,
        111..=130 => 2,
        _ => 3,
    }
}

pub struct News2;

impl Calculator for News2 {
    const ID: &'static str = "news_2";
    type Params = News2Request;

    fn metadata() -> ScoreMetadata {
        ScoreMetadata {
            title: "National Early Warning Score (NEWS) 2",
            description: "Determines the degree of illness of a patient and prompts critical care intervention",
            category: "emergency",
            version: Some("2017"),
            references: &[
                "Royal College of Physicians. National Early Warning Score (NEWS) 2: Standardising the assessment of acute-illness severity in the NHS. London: RCP, 2017.",
            ],
        }
    }

    fn example() -> News2Request {
        News2Request {
            respiratory_rate: 22,
            hypercapnic_respiratory_failure: YesNo::No,
            oxygen_saturation: 95,
            supplemental_oxygen: YesNo::No,
            temperature: 38.2,
            systolic_bp: 118,
            heart_rate: 96,
            consciousness: Consciousness::Alert,
        }
    }

    fn calculate(params: &News2Request) -> Result<ScoreResult, CalcError> {
        let on_oxygen = params.supplemental_oxygen.is_yes();
        let components = [
            ("respiratory_rate", respiratory_rate_points(params.respiratory_rate)),
            (
                "oxygen_saturation",
                spo2_points(
                    params.oxygen_saturation,
                    params.hypercapnic_respiratory_failure.is_yes(),
                    on_oxygen,
                ),
            ),
            ("supplemental_oxygen", params.supplemental_oxygen.points(2)),
            ("temperature", temperature_points(params.temperature)),
            ("systolic_bp", systolic_points(params.systolic_bp)),
            ("heart_rate", heart_rate_points(params.heart_rate)),
            (
                "consciousness",
                match params.consciousness {
                    Consciousness::Alert => 0,
                    Consciousness::Altered => RED_SCORE,
                },
            ),
        ];

        let total: i64 = components.iter().map(|(_, points)| points).sum();
        let red_parameters: Vec<&str> = components
            .iter()
            .filter(|(_, points)| *points >= RED_SCORE)
            .map(|(name, _)| *name)
            .collect();

        let (stage, description, advice) = if !red_parameters.is_empty() && total < 5 {
            (
                "Low-Medium Risk",
                "RED score - Individual parameter scoring 3",
                "Urgent review by ward-based doctor required. Minimum monitoring frequency every hour.",
            )
        } else if total == 0 {
            (
                "Low Risk",
                "Very low early warning score",
                "Continue routine monitoring. Minimum monitoring frequency every 12 hours.",
            )
        } else if total <= 4 {
            (
                "Low Risk",
                "Low early warning score",
                "Assessment by competent registered nurse. Minimum monitoring frequency every 4-6 hours.",
            )
        } else if total <= 6 {
            (
                "Medium Risk",
                "Medium early warning score",
                "Urgent review by ward-based doctor or acute team nurse to decide if critical care team assessment needed.",
            )
        } else {
            (
                "High Risk",
                "High early warning score",
                "Emergent assessment by clinical team or critical care team. Continuous monitoring of vital signs. \
                 Usually requires transfer to higher level of care.",
            )
        };

        let breakdown: serde_json::Map<String, serde_json::Value> =
            components.iter().map(|(name, points)| (name.to_string(), json!(points))).collect();

        Ok(ScoreResult::new(total, "points", format!("NEWS2 score {}. {}", total, advice), stage, description)
            .with("scoring_breakdown", serde_json::Value::Object(breakdown))
            .with("red_score_parameters", json!(red_parameters)))
    }
}
