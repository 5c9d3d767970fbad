// Unit tests for Score Calc

use score_calc::calculators::{
    cpot_pain_observation::{
        BodyMovements, CpotPainObservationRequest, FacialExpression, MuscleTension, PatientStatus,
        VentilatorCompliance, Vocalization,
    },
    glasgow_coma_scale::GlasgowComaScaleRequest,
    oxygenation_index::OxygenationIndexRequest,
    qsofa_score::QsofaScoreRequest,
    woman_abuse_screening_tool::{Difficulty, Frequency, TensionLevel, WomanAbuseScreeningToolRequest},
    CpotPainObservation, GlasgowComaScale, OxygenationIndex, PsiPortScore, QsofaScore,
    WomanAbuseScreeningTool,
};
use score_calc::core::run_typed;
use score_calc::models::YesNo;
use score_calc::{default_registry, CalcError, Calculator, ConfigurationError, Registry, ScoreValue};
use serde_json::json;

fn qsofa(yes_count: usize) -> QsofaScoreRequest {
    let answer = |i: usize| if i < yes_count { YesNo::Yes } else { YesNo::No };
    QsofaScoreRequest {
        respiratory_rate_22_or_higher: answer(0),
        altered_mental_status: answer(1),
        systolic_bp_100_or_lower: answer(2),
    }
}

fn cpot(status: PatientStatus) -> CpotPainObservationRequest {
    CpotPainObservationRequest {
        facial_expression: FacialExpression::RelaxedNeutral,
        body_movements: BodyMovements::AbsenceOfMovements,
        muscle_tension: MuscleTension::Relaxed,
        patient_status: status,
        ventilator_compliance: None,
        vocalization: None,
    }
}

#[test]
fn test_every_example_yields_required_fields() {
    let registry = default_registry().unwrap();
    for entry in registry.entries() {
        let result = registry
            .invoke(entry.id(), entry.example())
            .unwrap()
            .unwrap_or_else(|e| panic!("{} example rejected: {}", entry.id(), e));

        let body = serde_json::to_value(&result).unwrap();
        for field in ["result", "unit", "interpretation", "stage", "stage_description"] {
            assert!(!body[field].is_null(), "{} missing {}", entry.id(), field);
        }
        assert!(!result.interpretation.is_empty());
        assert!(!result.stage.is_empty());
    }
}

#[test]
fn test_identical_input_serializes_identically() {
    let registry = default_registry().unwrap();
    for entry in registry.entries() {
        let first = registry.invoke(entry.id(), entry.example()).unwrap().unwrap();
        let second = registry.invoke(entry.id(), entry.example()).unwrap().unwrap();
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap(),
            "{} is not deterministic",
            entry.id()
        );
    }
}

#[test]
fn test_typed_and_untyped_paths_agree() {
    let registry = default_registry().unwrap();
    let params = QsofaScore::example();
    let typed = registry.dispatch::<QsofaScore>(&params).unwrap().unwrap();
    let untyped = registry
        .invoke(QsofaScore::ID, &serde_json::to_value(&params).unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(typed, untyped);
}

#[test]
fn test_unknown_score_is_none() {
    let registry = default_registry().unwrap();
    assert!(registry.invoke("not_a_real_score", &json!({})).is_none());
    assert!(registry.get("not_a_real_score").is_none());
}

#[test]
fn test_duplicate_registration_rejected() {
    let mut registry = Registry::new();
    registry.register::<GlasgowComaScale>().unwrap();
    assert_eq!(
        registry.register::<GlasgowComaScale>(),
        Err(ConfigurationError::DuplicateScore("glasgow_coma_scale".to_string()))
    );
}

#[test]
fn test_untyped_bad_enum_is_validation() {
    let registry = default_registry().unwrap();
    let outcome = registry
        .invoke(
            "qsofa_score",
            &json!({
                "respiratory_rate_22_or_higher": "maybe",
                "altered_mental_status": "no",
                "systolic_bp_100_or_lower": "no"
            }),
        )
        .unwrap();
    assert!(matches!(outcome, Err(CalcError::Validation(_))));
}

#[test]
fn test_untyped_missing_field_is_validation() {
    let registry = default_registry().unwrap();
    let outcome = registry
        .invoke("glasgow_coma_scale", &json!({"eye_opening": 4, "verbal_response": 5}))
        .unwrap();
    assert!(matches!(outcome, Err(CalcError::Validation(_))));
}

#[test]
fn test_categories_sorted_and_unique() {
    let registry = default_registry().unwrap();
    assert_eq!(
        registry.categories(),
        vec![
            "cardiology",
            "emergency",
            "gastroenterology",
            "geriatrics",
            "neurology",
            "pediatrics",
            "pulmonology"
        ]
    );
}

#[test]
fn test_qsofa_one_criterion() {
    let result = run_typed::<QsofaScore>(&qsofa(1)).unwrap();
    assert_eq!(result.result, ScoreValue::Integer(1));
    assert_eq!(result.stage, "Low Risk");
}

#[test]
fn test_qsofa_three_criteria() {
    let result = run_typed::<QsofaScore>(&qsofa(3)).unwrap();
    assert_eq!(result.result, ScoreValue::Integer(3));
    assert_eq!(result.stage, "High Risk");
}

#[test]
fn test_gcs_full_marks() {
    let params = GlasgowComaScaleRequest { eye_opening: 4, verbal_response: 5, motor_response: 6 };
    let result = run_typed::<GlasgowComaScale>(&params).unwrap();
    assert_eq!(result.result, ScoreValue::Integer(15));
    assert_eq!(result.stage, "Mild Brain Injury");
}

#[test]
fn test_oxygenation_index_good_outcome() {
    let params = OxygenationIndexRequest { fio2: 80.0, mean_airway_pressure: 15.0, pao2: 60.0 };
    let result = run_typed::<OxygenationIndex>(&params).unwrap();
    assert_eq!(result.result, ScoreValue::Decimal(20.0));
    assert_eq!(result.stage, "Good Outcome");
}

#[test]
fn test_oxygenation_index_band_edges() {
    let at = |pao2: f64| {
        run_typed::<OxygenationIndex>(&OxygenationIndexRequest { fio2: 100.0, mean_airway_pressure: 10.0, pao2 })
            .unwrap()
            .stage
    };
    assert_eq!(at(40.0), "High Risk");
    assert_eq!(at(25.0), "ECMO Consideration");
}

#[test]
fn test_wast_all_lowest_risk() {
    let params = WomanAbuseScreeningToolRequest {
        tension_arguments_relationship: TensionLevel::NoTension,
        partner_jealousy_possessiveness: Difficulty::NoDifficulty,
        arguments_resolution: Frequency::Never,
        arguments_feeling_bad: Frequency::Never,
        physical_violence_frequency: Frequency::Never,
        feel_frightened: Frequency::Never,
        physical_abuse_history: Frequency::Never,
        emotional_abuse_history: Frequency::Never,
    };
    let result = run_typed::<WomanAbuseScreeningTool>(&params).unwrap();
    assert_eq!(result.result, ScoreValue::Integer(24));
    assert_eq!(result.stage, "Low Risk");
}

#[test]
fn test_cpot_conditional_fields() {
    let cases = [
        (PatientStatus::Intubated, None, None),
        (PatientStatus::Extubated, None, None),
        (
            PatientStatus::Intubated,
            Some(VentilatorCompliance::Tolerating),
            Some(Vocalization::NormalToneNoSound),
        ),
        (PatientStatus::Extubated, Some(VentilatorCompliance::Tolerating), None),
        (PatientStatus::Intubated, None, Some(Vocalization::SighingMoaning)),
    ];

    for (status, compliance, vocalization) in cases {
        let params = CpotPainObservationRequest {
            ventilator_compliance: compliance,
            vocalization,
            ..cpot(status)
        };
        assert!(
            matches!(run_typed::<CpotPainObservation>(&params), Err(CalcError::Validation(_))),
            "accepted {:?}",
            params
        );
    }
}

#[test]
fn test_cpot_two_versus_three() {
    let mut params = CpotPainObservationRequest {
        ventilator_compliance: Some(VentilatorCompliance::FightingVentilator),
        ..cpot(PatientStatus::Intubated)
    };
    assert_eq!(run_typed::<CpotPainObservation>(&params).unwrap().stage, "Minimal to No Pain");

    params.body_movements = BodyMovements::Protection;
    let result = run_typed::<CpotPainObservation>(&params).unwrap();
    assert_eq!(result.result, ScoreValue::Integer(3));
    assert_eq!(result.stage, "Unacceptable Pain");
}

#[test]
fn test_psi_class_two_three_boundary() {
    let registry = default_registry().unwrap();
    let mut body = serde_json::to_value(PsiPortScore::example()).unwrap();
    body["congestive_heart_failure"] = json!("no");

    body["age"] = json!(70);
    let result = registry.invoke("psi_port_score", &body).unwrap().unwrap();
    assert_eq!(result.stage, "Class II (Low Risk)");

    body["age"] = json!(71);
    let result = registry.invoke("psi_port_score", &body).unwrap().unwrap();
    assert_eq!(result.stage, "Class III (Low Risk)");
}
