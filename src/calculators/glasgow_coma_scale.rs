//! Glasgow Coma Scale

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::core::{classify, Band, Calculator};
use crate::error::CalcError;
use crate::models::{ScoreMetadata, ScoreResult};

const SEVERITY: [Band; 3] = [
    Band::new(f64::NEG_INFINITY, "Severe Brain Injury", "Comatose patient"),
    Band::new(9.0, "Moderate Brain Injury", "Moderate impairment of consciousness"),
    Band::new(13.0, "Mild Brain Injury", "Alert to mildly confused"),
];

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GlasgowComaScaleRequest {
    #[validate(range(min = 1, max = 4))]
    pub eye_opening: u8,
    #[validate(range(min = 1, max = 5))]
    pub verbal_response: u8,
    #[validate(range(min = 1, max = 6))]
    pub motor_response: u8,
}

pub struct GlasgowComaScale;

fn eye_label(score: u8) -> &'static str {
    match score {
        4 => "Spontaneous",
        3 => "To verbal command",
        2 => "To pain",
        _ => "No eye opening",
    }
}

fn verbal_label(score: u8) -> &'static str {
    match score {
        5 => "Oriented",
        4 => "Confused",
        3 => "Inappropriate words",
        2 => "Incomprehensible sounds",
        _ => "No verbal response",
    }
}

fn motor_label(score: u8) -> &'static str {
    match score {
        6 => "Obeys commands",
        5 => "Localizes pain",
        4 => "Withdrawal from pain",
        3 => "Abnormal flexion (decorticate)",
        2 => "Extension (decerebrate)",
        _ => "No motor response",
    }
}

impl Calculator for GlasgowComaScale {
    const ID: &'static str = "glasgow_coma_scale";
    type Params = GlasgowComaScaleRequest;

    fn metadata() -> ScoreMetadata {
        ScoreMetadata {
            title: "Glasgow Coma Scale (GCS)",
            description: "Estimates coma severity from eye, verbal and motor responses",
            category: "neurology",
            version: Some("1974"),
            references: &[
                "Teasdale G, Jennett B. Assessment of coma and impaired consciousness. A practical scale. Lancet. 1974;2(7872):81-4.",
            ],
        }
    }

    fn example() -> GlasgowComaScaleRequest {
        GlasgowComaScaleRequest { eye_opening: 3, verbal_response: 4, motor_response: 6 }
    }

    fn calculate(params: &GlasgowComaScaleRequest) -> Result<ScoreResult, CalcError> {
        let total = i64::from(params.eye_opening) + i64::from(params.verbal_response) + i64::from(params.motor_response);
        let band = classify(total as f64, &SEVERITY)?;

        let interpretation = format!(
            "GCS {} (E{} V{} M{}). {}. Eye: {}; verbal: {}; motor: {}.",
            total,
            params.eye_opening,
            params.verbal_response,
            params.motor_response,
            band.description,
            eye_label(params.eye_opening).to_lowercase(),
            verbal_label(params.verbal_response).to_lowercase(),
            motor_label(params.motor_response).to_lowercase(),
        );

        Ok(ScoreResult::new(total, "points", interpretation, band.stage, band.description).with(
            "components",
            json!({
                "eye_opening": { "score": params.eye_opening, "description": eye_label(params.eye_opening) },
                "verbal_response": { "score": params.verbal_response, "description": verbal_label(params.verbal_response) },
                "motor_response": { "score": params.motor_response, "description": motor_label(params.motor_response) },
            }),
        ))
    }
}
