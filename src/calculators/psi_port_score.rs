//! PSI/PORT (Pneumonia Severity Index) score
//!
//! Class I is decided first: patients under 50 with no comorbidity and no
//! abnormal finding skip point counting entirely. Everyone else is scored on
//! age plus weighted findings and placed in classes II to V.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use validator::Validate;

use crate::core::{classify, Band, Calculator};
use crate::error::CalcError;
use crate::models::{ScoreMetadata, ScoreResult, Sex, YesNo};

const CLASS_I_AGE_LIMIT: i64 = 50;

const RISK_CLASSES: [Band; 4] = [
    Band::new(f64::NEG_INFINITY, "Class II (Low Risk)", "Low mortality risk"),
    Band::new(71.0, "Class III (Low Risk)", "Low mortality risk"),
    Band::new(91.0, "Class IV (Moderate Risk)", "Moderate mortality risk"),
    Band::new(131.0, "Class V (High Risk)", "High mortality risk"),
];

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PsiPortScoreRequest {
    #[validate(range(min = 18, max = 120))]
    pub age: i64,
    pub sex: Sex,
    pub nursing_home_resident: YesNo,
    pub neoplastic_disease: YesNo,
    pub liver_disease: YesNo,
    pub congestive_heart_failure: YesNo,
    pub cerebrovascular_disease: YesNo,
    pub renal_disease: YesNo,
    pub altered_mental_status: YesNo,
    /// breaths/min
    #[validate(range(min = 5, max = 60))]
    pub respiratory_rate: i64,
    /// mmHg
    #[validate(range(min = 50, max = 250))]
    pub systolic_blood_pressure: i64,
    /// °C
    #[validate(range(min = 30.0, max = 45.0))]
    pub temperature: f64,
    /// beats/min
    #[validate(range(min = 30, max = 200))]
    pub pulse: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 6.5, max = 8.0))]
    pub ph: Option<f64>,
    /// mg/dL
    #[validate(range(min = 1.0, max = 200.0))]
    pub bun: f64,
    /// mEq/L
    #[validate(range(min = 100.0, max = 170.0))]
    pub sodium: f64,
    /// mg/dL
    #[validate(range(min = 30.0, max = 800.0))]
    pub glucose: f64,
    /// %
    #[validate(range(min = 10.0, max = 70.0))]
    pub hematocrit: f64,
    /// mmHg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 20.0, max = 200.0))]
    pub pao2: Option<f64>,
    pub pleural_effusion: YesNo,
}

impl PsiPortScoreRequest {
    /// Points for every comorbidity and abnormal finding, age and sex excluded
    fn findings(&self) -> Vec<(&'static str, i64)> {
        let flag = |present: bool, weight: i64| if present { weight } else { 0 };

        vec![
            ("nursing_home_resident", self.nursing_home_resident.points(10)),
            ("neoplastic_disease", self.neoplastic_disease.points(30)),
            ("liver_disease", self.liver_disease.points(20)),
            ("congestive_heart_failure", self.congestive_heart_failure.points(10)),
            ("cerebrovascular_disease", self.cerebrovascular_disease.points(10)),
            ("renal_disease", self.renal_disease.points(10)),
            ("altered_mental_status", self.altered_mental_status.points(20)),
            ("respiratory_rate", flag(self.respiratory_rate >= 30, 20)),
            ("systolic_blood_pressure", flag(self.systolic_blood_pressure < 90, 20)),
            ("temperature", flag(self.temperature < 35.0 || self.temperature >= 40.0, 15)),
            ("pulse", flag(self.pulse >= 125, 10)),
            ("ph", flag(self.ph.is_some_and(|ph| ph < 7.35), 30)),
            ("bun", flag(self.bun >= 30.0, 20)),
            ("sodium", flag(self.sodium < 130.0, 20)),
            ("glucose", flag(self.glucose >= 250.0, 10)),
            ("hematocrit", flag(self.hematocrit < 30.0, 10)),
            ("pao2", flag(self.pao2.is_some_and(|pao2| pao2 < 60.0), 10)),
            ("pleural_effusion", self.pleural_effusion.points(10)),
        ]
    }
}

fn class_interpretation(stage: &str) -> &'static str {
    match stage {
        "Class II (Low Risk)" => {
            "Low risk for mortality. Outpatient treatment recommended. 30-day mortality rate <3%. \
             Consider outpatient oral antibiotics and close follow-up."
        }
        "Class III (Low Risk)" => {
            "Low risk for mortality. Outpatient treatment vs. observation admission. 30-day mortality \
             rate <3%. Consider brief hospitalization or intensive outpatient monitoring."
        }
        "Class IV (Moderate Risk)" => {
            "Moderate risk for mortality. Inpatient admission recommended. 30-day mortality rate 8-9%. \
             Requires hospitalization with standard care and monitoring."
        }
        _ => {
            "High risk for mortality. Inpatient admission with consideration for ICU care. 30-day \
             mortality rate 27-31%. Requires aggressive treatment and close monitoring."
        }
    }
}

pub struct PsiPortScore;

impl Calculator for PsiPortScore {
    const ID: &'static str = "psi_port_score";
    type Params = PsiPortScoreRequest;

    fn metadata() -> ScoreMetadata {
        ScoreMetadata {
            title: "PSI/PORT Score: Pneumonia Severity Index for CAP",
            description: "Estimates 30-day mortality in community-acquired pneumonia to guide site-of-care decisions",
            category: "emergency",
            version: Some("1997"),
            references: &[
                "Fine MJ, Auble TE, Yealy DM, et al. A prediction rule to identify low-risk patients with community-acquired pneumonia. N Engl J Med. 1997;336(4):243-50.",
            ],
        }
    }

    fn example() -> PsiPortScoreRequest {
        PsiPortScoreRequest {
            age: 72,
            sex: Sex::Male,
            nursing_home_resident: YesNo::No,
            neoplastic_disease: YesNo::No,
            liver_disease: YesNo::No,
            congestive_heart_failure: YesNo::Yes,
            cerebrovascular_disease: YesNo::No,
            renal_disease: YesNo::No,
            altered_mental_status: YesNo::No,
            respiratory_rate: 24,
            systolic_blood_pressure: 128,
            temperature: 38.4,
            pulse: 102,
            ph: Some(7.40),
            bun: 24.0,
            sodium: 136.0,
            glucose: 140.0,
            hematocrit: 38.0,
            pao2: Some(70.0),
            pleural_effusion: YesNo::No,
        }
    }

    fn calculate(params: &PsiPortScoreRequest) -> Result<ScoreResult, CalcError> {
        let findings = params.findings();
        let finding_points: i64 = findings.iter().map(|(_, points)| points).sum();

        if params.age < CLASS_I_AGE_LIMIT && finding_points == 0 {
            return Ok(ScoreResult::new(
                0_i64,
                "points",
                "Low risk for mortality. Outpatient treatment recommended. 30-day mortality rate <1%. \
                 Consider outpatient oral antibiotics and close follow-up.",
                "Class I (Low Risk)",
                "Low mortality risk",
            ));
        }

        let sex_adjustment = if params.sex == Sex::Female { -10 } else { 0 };
        let total = params.age + sex_adjustment + finding_points;
        let band = classify(total as f64, &RISK_CLASSES)?;

        let mut breakdown = Map::new();
        breakdown.insert("age".into(), json!(params.age));
        breakdown.insert("sex".into(), json!(sex_adjustment));
        for (name, points) in findings.into_iter().filter(|(_, points)| *points != 0) {
            breakdown.insert(name.into(), json!(points));
        }

        Ok(ScoreResult::new(total, "points", class_interpretation(band.stage), band.stage, band.description)
            .with("scoring_breakdown", Value::Object(breakdown)))
    }
}
