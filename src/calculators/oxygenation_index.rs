//! Oxygenation Index (OI) for hypoxemic respiratory failure
//!
//! `OI = FiO2(%) × mean airway pressure / PaO2`, rounded to one decimal.

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::core::{classify, ensure_finite, round_to, Band, Calculator};
use crate::error::CalcError;
use crate::models::{ScoreMetadata, ScoreResult};

const OUTCOME: [Band; 3] = [
    Band::new(f64::NEG_INFINITY, "Good Outcome", "Low risk respiratory failure"),
    Band::new(25.0, "High Risk", "High risk of poor outcome"),
    Band::new(40.0, "ECMO Consideration", "Very high risk, consider ECMO"),
];

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OxygenationIndexRequest {
    /// Fraction of inspired oxygen in percent
    #[validate(range(min = 21.0, max = 100.0))]
    pub fio2: f64,
    /// cmH2O
    #[validate(range(min = 1.0, max = 50.0))]
    pub mean_airway_pressure: f64,
    /// mmHg
    #[validate(range(min = 20.0, max = 600.0))]
    pub pao2: f64,
}

pub struct OxygenationIndex;

impl Calculator for OxygenationIndex {
    const ID: &'static str = "oxygenation_index";
    type Params = OxygenationIndexRequest;

    fn metadata() -> ScoreMetadata {
        ScoreMetadata {
            title: "Oxygenation Index (OI)",
            description: "Quantifies severity of hypoxemic respiratory failure in ventilated children and neonates",
            category: "pediatrics",
            version: None,
            references: &[
                "Ortiz RM, Cilley RE, Bartlett RH. Extracorporeal membrane oxygenation in pediatric respiratory failure. Pediatr Clin North Am. 1987;34(1):39-46.",
                "Pediatric Acute Lung Injury Consensus Conference Group. Pediatr Crit Care Med. 2015;16(5):428-39.",
            ],
        }
    }

    fn example() -> OxygenationIndexRequest {
        OxygenationIndexRequest { fio2: 60.0, mean_airway_pressure: 15.0, pao2: 80.0 }
    }

    fn calculate(params: &OxygenationIndexRequest) -> Result<ScoreResult, CalcError> {
        let raw = params.fio2 * params.mean_airway_pressure / params.pao2;
        let oi = round_to(ensure_finite("oxygenation index", raw)?, 1);
        let band = classify(oi, &OUTCOME)?;

        let advice = match band.stage {
            "Good Outcome" => "Continue current ventilatory management and monitor trends.",
            "High Risk" => "Optimise ventilation and consider rescue therapies such as inhaled nitric oxide or HFOV.",
            _ => "Contact an ECMO centre and evaluate candidacy for extracorporeal support.",
        };

        Ok(ScoreResult::new(
            oi,
            "index",
            format!("Oxygenation Index {:.1}. {}. {}", oi, band.description, advice),
            band.stage,
            band.description,
        )
        .with(
            "inputs",
            json!({
                "fio2": params.fio2,
                "mean_airway_pressure": params.mean_airway_pressure,
                "pao2": params.pao2,
            }),
        ))
    }
}
