//! Critical-Care Pain Observation Tool (CPOT)
//!
//! Four behaviours scored 0-2. The fourth item depends on airway status:
//! intubated patients are rated on ventilator compliance, extubated patients
//! on vocalization. Sending the item that does not apply is rejected.

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::{Validate, ValidationError};

use crate::core::Calculator;
use crate::error::CalcError;
use crate::models::{ScoreMetadata, ScoreResult};

const PAIN_THRESHOLD: i64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacialExpression {
    RelaxedNeutral,
    Tense,
    Grimacing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyMovements {
    AbsenceOfMovements,
    Protection,
    Restlessness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuscleTension {
    Relaxed,
    TenseRigid,
    VeryTenseRigid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientStatus {
    Intubated,
    Extubated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VentilatorCompliance {
    Tolerating,
    CoughingTolerating,
    FightingVentilator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vocalization {
    NormalToneNoSound,
    SighingMoaning,
    CryingSobbing,
}

impl FacialExpression {
    fn points(self) -> i64 {
        match self {
            FacialExpression::RelaxedNeutral => 0,
            FacialExpression::Tense => 1,
            FacialExpression::Grimacing => 2,
        }
    }
}

impl BodyMovements {
    fn points(self) -> i64 {
        match self {
            BodyMovements::AbsenceOfMovements => 0,
            BodyMovements::Protection => 1,
            BodyMovements::Restlessness => 2,
        }
    }
}

impl MuscleTension {
    fn points(self) -> i64 {
        match self {
            MuscleTension::Relaxed => 0,
            MuscleTension::TenseRigid => 1,
            MuscleTension::VeryTenseRigid => 2,
        }
    }
}

impl VentilatorCompliance {
    fn points(self) -> i64 {
        match self {
            VentilatorCompliance::Tolerating => 0,
            VentilatorCompliance::CoughingTolerating => 1,
            VentilatorCompliance::FightingVentilator => 2,
        }
    }
}

impl Vocalization {
    fn points(self) -> i64 {
        match self {
            Vocalization::NormalToneNoSound => 0,
            Vocalization::SighingMoaning => 1,
            Vocalization::CryingSobbing => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_airway_item"))]
pub struct CpotPainObservationRequest {
    pub facial_expression: FacialExpression,
    pub body_movements: BodyMovements,
    pub muscle_tension: MuscleTension,
    pub patient_status: PatientStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ventilator_compliance: Option<VentilatorCompliance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocalization: Option<Vocalization>,
}

fn airway_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn validate_airway_item(req: &CpotPainObservationRequest) -> Result<(), ValidationError> {
    match req.patient_status {
        PatientStatus::Intubated => {
            if req.ventilator_compliance.is_none() {
                return Err(airway_error(
                    "ventilator_compliance_required",
                    "ventilator_compliance is required for intubated patients",
                ));
            }
            if req.vocalization.is_some() {
                return Err(airway_error(
                    "vocalization_not_applicable",
                    "vocalization must not be provided for intubated patients",
                ));
            }
        }
        PatientStatus::Extubated => {
            if req.vocalization.is_none() {
                return Err(airway_error(
                    "vocalization_required",
                    "vocalization is required for extubated patients",
                ));
            }
            if req.ventilator_compliance.is_some() {
                return Err(airway_error(
                    "ventilator_compliance_not_applicable",
                    "ventilator_compliance must not be provided for extubated patients",
                ));
            }
        }
    }
    Ok(())
}

pub struct CpotPainObservation;

impl Calculator for CpotPainObservation {
    const ID: &'static str = "cpot_pain_observation";
    type Params = CpotPainObservationRequest;

    fn metadata() -> ScoreMetadata {
        ScoreMetadata {
            title: "Critical-Care Pain Observation Tool (CPOT)",
            description: "Behavioural pain assessment for critically ill adults unable to self-report",
            category: "emergency",
            version: Some("2006"),
            references: &[
                "Gélinas C, Fillion L, Puntillo KA, Viens C, Fortier M. Validation of the critical-care pain observation tool in adult patients. Am J Crit Care. 2006;15(4):420-7.",
            ],
        }
    }

    fn example() -> CpotPainObservationRequest {
        CpotPainObservationRequest {
            facial_expression: FacialExpression::Tense,
            body_movements: BodyMovements::Protection,
            muscle_tension: MuscleTension::TenseRigid,
            patient_status: PatientStatus::Intubated,
            ventilator_compliance: Some(VentilatorCompliance::CoughingTolerating),
            vocalization: None,
        }
    }

    fn calculate(params: &CpotPainObservationRequest) -> Result<ScoreResult, CalcError> {
        let (airway_item, airway_points) = match (params.patient_status, params.ventilator_compliance, params.vocalization) {
            (PatientStatus::Intubated, Some(compliance), None) => ("ventilator_compliance", compliance.points()),
            (PatientStatus::Extubated, None, Some(vocalization)) => ("vocalization", vocalization.points()),
            _ => {
                return Err(CalcError::validation(
                    "exactly one of ventilator_compliance or vocalization must match patient_status",
                ))
            }
        };

        let facial = params.facial_expression.points();
        let movement = params.body_movements.points();
        let tension = params.muscle_tension.points();
        let total = facial + movement + tension + airway_points;

        let (stage, description, recommendations) = if total > PAIN_THRESHOLD {
            (
                "Unacceptable Pain",
                "Pain likely present, intervention indicated",
                vec![
                    "Administer analgesia according to unit protocol",
                    "Look for and treat reversible causes of discomfort",
                    "Reassess CPOT 15-30 minutes after intervention",
                ],
            )
        } else {
            (
                "Minimal to No Pain",
                "Acceptable pain level",
                vec![
                    "Continue current pain management",
                    "Reassess CPOT at regular intervals and with any change in condition",
                ],
            )
        };

        let mut breakdown = serde_json::Map::new();
        breakdown.insert("facial_expression".into(), json!(facial));
        breakdown.insert("body_movements".into(), json!(movement));
        breakdown.insert("muscle_tension".into(), json!(tension));
        breakdown.insert(airway_item.into(), json!(airway_points));

        Ok(ScoreResult::new(
            total,
            "points",
            format!("CPOT score {} of 8. {}.", total, description),
            stage,
            description,
        )
        .with("scoring_breakdown", serde_json::Value::Object(breakdown))
        .with("clinical_recommendations", json!(recommendations))
        .with(
            "assessment_notes",
            json!(format!(
                "Assessed as {} patient; {} used as the fourth item. A score above {} suggests pain.",
                match params.patient_status {
                    PatientStatus::Intubated => "an intubated",
                    PatientStatus::Extubated => "an extubated",
                },
                airway_item,
                PAIN_THRESHOLD
            )),
        ))
    }
}
