// Clinical score calculators
pub mod cerebral_perfusion_pressure;
pub mod chads2_score;
pub mod child_pugh_score;
pub mod clinical_frailty_scale;
pub mod cpot_pain_observation;
pub mod glasgow_coma_scale;
pub mod ldl_calculated;
pub mod news_2;
pub mod oxygenation_index;
pub mod psi_port_score;
pub mod qsofa_score;
pub mod winters_formula_metabolic_acidosis;
pub mod woman_abuse_screening_tool;

use crate::core::Registry;
use crate::error::ConfigurationError;

pub use cerebral_perfusion_pressure::CerebralPerfusionPressure;
pub use chads2_score::Chads2Score;
pub use child_pugh_score::ChildPughScore;
pub use clinical_frailty_scale::ClinicalFrailtyScale;
pub use cpot_pain_observation::CpotPainObservation;
pub use glasgow_coma_scale::GlasgowComaScale;
pub use ldl_calculated::LdlCalculated;
pub use news_2::News2;
pub use oxygenation_index::OxygenationIndex;
pub use psi_port_score::PsiPortScore;
pub use qsofa_score::QsofaScore;
pub use winters_formula_metabolic_acidosis::WintersFormula;
pub use woman_abuse_screening_tool::WomanAbuseScreeningTool;

/// Register every calculator shipped with the service
pub fn register_all(registry: &mut Registry) -> Result<(), ConfigurationError> {
    // Emergency
    registry.register::<QsofaScore>()?;
    registry.register::<PsiPortScore>()?;
    registry.register::<CpotPainObservation>()?;
    registry.register::<WomanAbuseScreeningTool>()?;
    registry.register::<News2>()?;

    // Neurology
    registry.register::<GlasgowComaScale>()?;
    registry.register::<CerebralPerfusionPressure>()?;

    // Pediatrics
    registry.register::<OxygenationIndex>()?;

    // Cardiology
    registry.register::<Chads2Score>()?;
    registry.register::<LdlCalculated>()?;

    registry.register::<ChildPughScore>()?;
    registry.register::<ClinicalFrailtyScale>()?;
    registry.register::<WintersFormula>()?;

    tracing::info!("Registered {} score calculators", registry.len());
    Ok(())
}

/// Registry with every shipped calculator
pub fn default_registry() -> Result<Registry, ConfigurationError> {
    let mut registry = Registry::new();
    register_all(&mut registry)?;
    Ok(registry)
}
