//! Cerebral Perfusion Pressure, `CPP = MAP - ICP`

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::core::{classify, round_to, Band, Calculator};
use crate::error::CalcError;
use crate::models::{ScoreMetadata, ScoreResult};

const ADEQUATE_CPP: f64 = 60.0;
const CRITICAL_CPP: f64 = 50.0;
const ELEVATED_ICP: f64 = 20.0;
const LOW_MAP: f64 = 65.0;
const HIGH_MAP: f64 = 110.0;

const MONITORING: [&str; 4] = [
    "Continuous CPP monitoring preferred",
    "Monitor neurological examinations",
    "Assess cerebral autoregulation if possible",
    "Consider individual patient factors (age, comorbidities)",
];

const PERFUSION: [Band; 6] = [
    Band::new(f64::NEG_INFINITY, "Critical", "Critically low cerebral perfusion"),
    Band::new(30.0, "Severely Low", "High risk of cerebral ischemia"),
    Band::new(50.0, "Low", "Below optimal range"),
    Band::new(60.0, "Optimal", "Target range for cerebral perfusion"),
    Band::new(80.0, "Adequate", "Adequate cerebral perfusion"),
    Band::new(100.0, "High", "Elevated cerebral perfusion pressure"),
];

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CerebralPerfusionPressureRequest {
    /// mmHg
    #[validate(range(min = 30.0, max = 200.0))]
    pub mean_arterial_pressure: f64,
    /// mmHg
    #[validate(range(min = 0.0, max = 80.0))]
    pub intracranial_pressure: f64,
}

pub struct CerebralPerfusionPressure;

fn primary_interventions(stage: &str) -> &'static [&'static str] {
    match stage {
        "Critical" => &[
            "Immediate aggressive intervention required",
            "Consider emergency vasopressor support",
            "Urgent ICP reduction measures (osmotic therapy, positioning)",
            "Emergency neurosurgical consultation",
            "Consider decompressive craniectomy if indicated",
        ],
        "Severely Low" => &[
            "Urgent optimization of cerebral perfusion",
            "Consider vasopressor support if MAP low",
            "ICP-lowering interventions as appropriate",
            "Close neurological monitoring",
        ],
        "Low" => &[
            "Consider interventions to improve CPP",
            "Monitor neurological status closely",
            "Optimize MAP and ICP management",
        ],
        "Optimal" => &[
            "Maintain current management",
            "Continue monitoring CPP trends",
            "Optimize other neurological parameters",
        ],
        _ => &[
            "Monitor for complications of elevated pressures",
            "Balance perfusion needs with pressure management",
            "Consider gradual optimization if excessive",
        ],
    }
}

/// Findings on the individual MAP and ICP readings
fn component_considerations(map: f64, icp: f64) -> Vec<&'static str> {
    let mut considerations = Vec::new();
    if icp > ELEVATED_ICP {
        considerations.push("Elevated ICP (>20 mmHg) - consider ICP-lowering interventions");
    }
    if map < LOW_MAP {
        considerations.push("Low MAP (<65 mmHg) - consider vasopressor support");
    }
    if map > HIGH_MAP {
        considerations.push("High MAP (>110 mmHg) - monitor for complications");
    }
    considerations
}

impl Calculator for CerebralPerfusionPressure {
    const ID: &'static str = "cerebral_perfusion_pressure";
    type Params = CerebralPerfusionPressureRequest;

    fn metadata() -> ScoreMetadata {
        ScoreMetadata {
            title: "Cerebral Perfusion Pressure (CPP)",
            description: "Net pressure gradient driving cerebral blood flow",
            category: "neurology",
            version: None,
            references: &[
                "Brain Trauma Foundation. Guidelines for the Management of Severe Traumatic Brain Injury, 4th Edition. Neurosurgery. 2017;80(1):6-15.",
            ],
        }
    }

    fn example() -> CerebralPerfusionPressureRequest {
        CerebralPerfusionPressureRequest { mean_arterial_pressure: 85.0, intracranial_pressure: 15.0 }
    }

    fn calculate(params: &CerebralPerfusionPressureRequest) -> Result<ScoreResult, CalcError> {
        if params.intracranial_pressure >= params.mean_arterial_pressure {
            return Err(CalcError::validation("ICP cannot be greater than or equal to MAP"));
        }

        let cpp = round_to(params.mean_arterial_pressure - params.intracranial_pressure, 1);
        let band = classify(cpp, &PERFUSION)?;

        let action = match band.stage {
            "Critical" => "Immediate intervention to raise MAP and lower ICP is required; consider emergency neurosurgical consultation.",
            "Severely Low" => "Urgent optimisation of perfusion with vasopressors and ICP-lowering measures is needed.",
            "Low" => "Ischemia is possible when autoregulation is impaired; consider measures to improve perfusion.",
            "Optimal" => "Maintain current management and continue monitoring.",
            "Adequate" => "Perfusion is adequate; watch for complications of elevated pressure.",
            _ => "Balance perfusion needs against the risk of cerebral edema from high pressures.",
        };

        Ok(ScoreResult::new(
            cpp,
            "mmHg",
            format!("CPP {:.1} mmHg: {}. {}", cpp, band.description, action),
            band.stage,
            band.description,
        )
        .with("is_adequate", json!(cpp >= ADEQUATE_CPP))
        .with("is_critical", json!(cpp < CRITICAL_CPP))
        .with(
            "recommendations",
            json!({
                "primary_interventions": primary_interventions(band.stage),
                "monitoring": MONITORING,
                "considerations": component_considerations(
                    params.mean_arterial_pressure,
                    params.intracranial_pressure,
                ),
            }),
        ))
    }
}
