use actix_web::web;
use serde_json::Value;
use std::collections::btree_map::{BTreeMap, Entry};

use crate::core::calculator::{run_typed, run_untyped, Calculator};
use crate::error::{CalcError, ConfigurationError};
use crate::models::{ScoreMetadata, ScoreResult};
use crate::routes::scores::mount;

type InvokeFn = fn(&Value) -> Result<ScoreResult, CalcError>;
type MountFn = fn(&mut web::ServiceConfig);

/// A registered calculator together with its catalogue data
#[derive(Clone)]
pub struct ScoreEntry {
    id: &'static str,
    metadata: ScoreMetadata,
    example: Value,
    invoke: InvokeFn,
    mount: MountFn,
}

impl std::fmt::Debug for ScoreEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreEntry")
            .field("id", &self.id)
            .field("category", &self.metadata.category)
            .finish_non_exhaustive()
    }
}

impl ScoreEntry {
    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn metadata(&self) -> &ScoreMetadata {
        &self.metadata
    }

    pub fn example(&self) -> &Value {
        &self.example
    }

    /// Endpoint path of the per-score route
    pub fn endpoint(&self) -> String {
        format!("/{}", self.id)
    }

    /// Install this score's POST endpoint
    pub fn mount(&self, cfg: &mut web::ServiceConfig) {
        (self.mount)(cfg)
    }
}

/// Score identifier → calculator lookup
///
/// Built once at startup with [`Registry::register`], then frozen behind an
/// `Arc` and only read. Entries are kept sorted by identifier.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: BTreeMap<&'static str, ScoreEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a calculator under its `ID`
    ///
    /// Fails if another calculator already claimed the identifier, or if the
    /// calculator rejects its own example request.
    pub fn register<C: Calculator>(&mut self) -> Result<(), ConfigurationError> {
        let invalid_example = |reason: String| ConfigurationError::InvalidExample {
            score_id: C::ID.to_string(),
            reason,
        };

        let params = C::example();
        run_typed::<C>(&params).map_err(|e| invalid_example(e.to_string()))?;
        let example = serde_json::to_value(&params).map_err(|e| invalid_example(e.to_string()))?;

        match self.entries.entry(C::ID) {
            Entry::Occupied(_) => Err(ConfigurationError::DuplicateScore(C::ID.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(ScoreEntry {
                    id: C::ID,
                    metadata: C::metadata(),
                    example,
                    invoke: run_untyped::<C>,
                    mount: mount::<C>,
                });
                Ok(())
            }
        }
    }

    /// Run the calculator registered as `name` on an untyped JSON object
    ///
    /// Returns `None` when no calculator is registered under `name`.
    pub fn invoke(&self, name: &str, params: &Value) -> Option<Result<ScoreResult, CalcError>> {
        let entry = self.entries.get(name)?;
        tracing::debug!("Dispatching {} (untyped)", name);
        Some((entry.invoke)(params))
    }

    /// Run calculator `C` on already-decoded parameters
    ///
    /// Same lookup semantics as [`Registry::invoke`]: `None` unless `C` was
    /// registered in this registry.
    pub fn dispatch<C: Calculator>(&self, params: &C::Params) -> Option<Result<ScoreResult, CalcError>> {
        if !self.entries.contains_key(C::ID) {
            return None;
        }
        tracing::debug!("Dispatching {}", C::ID);
        Some(run_typed::<C>(params))
    }

    pub fn get(&self, name: &str) -> Option<&ScoreEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn entries(&self) -> impl Iterator<Item = &ScoreEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted, de-duplicated medical categories
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .entries
            .values()
            .map(|entry| entry.metadata.category.to_string())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculators::{glasgow_coma_scale::GlasgowComaScale, qsofa_score::QsofaScore};
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use validator::Validate;

    #[derive(Debug, Serialize, Deserialize, Validate)]
    struct PercentRequest {
        #[validate(range(min = 0.0, max = 100.0))]
        value: f64,
    }

    struct BrokenExample;

    impl Calculator for BrokenExample {
        const ID: &'static str = "broken_example";
        type Params = PercentRequest;

        fn metadata() -> ScoreMetadata {
            ScoreMetadata {
                title: "Broken example",
                description: "Example request is out of range",
                category: "testing",
                version: None,
                references: &[],
            }
        }

        fn example() -> PercentRequest {
            PercentRequest { value: 150.0 }
        }

        fn calculate(params: &PercentRequest) -> Result<ScoreResult, CalcError> {
            Ok(ScoreResult::new(params.value, "%", "", "", ""))
        }
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.register::<QsofaScore>().unwrap();
        registry.register::<GlasgowComaScale>().unwrap();
        registry
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = registry();
        let err = registry.register::<QsofaScore>().unwrap_err();
        assert_eq!(err, ConfigurationError::DuplicateScore("qsofa_score".to_string()));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_rejects_failing_example() {
        let mut registry = registry();
        let err = registry.register::<BrokenExample>().unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidExample { ref score_id, .. } if score_id == "broken_example"
        ));
        assert!(!registry.contains("broken_example"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_invoke_unknown_returns_none() {
        let registry = registry();
        assert!(registry.invoke("not_a_real_score", &json!({})).is_none());
    }

    #[test]
    fn test_invoke_decodes_params() {
        let registry = registry();
        let result = registry
            .invoke(
                "glasgow_coma_scale",
                &json!({"eye_opening": 4, "verbal_response": 5, "motor_response": 6}),
            )
            .unwrap()
            .unwrap();
        assert_eq!(result.stage, "Mild Brain Injury");
    }

    #[test]
    fn test_invoke_out_of_range_is_validation_error() {
        let registry = registry();
        let outcome = registry
            .invoke(
                "glasgow_coma_scale",
                &json!({"eye_opening": 5, "verbal_response": 5, "motor_response": 6}),
            )
            .unwrap();
        assert!(matches!(outcome, Err(CalcError::Validation(_))));
    }

    #[test]
    fn test_dispatch_requires_registration() {
        let registry = Registry::new();
        let params = QsofaScore::example();
        assert!(registry.dispatch::<QsofaScore>(&params).is_none());
    }

    #[test]
    fn test_entries_sorted_and_categories_deduped() {
        let registry = registry();
        let ids: Vec<_> = registry.entries().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["glasgow_coma_scale", "qsofa_score"]);
        assert_eq!(registry.categories(), vec!["emergency", "neurology"]);
    }
}
