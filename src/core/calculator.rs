use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::CalcError;
use crate::models::{ScoreMetadata, ScoreResult};

/// Contract every clinical score implements
///
/// `Params` is the score's request schema: serde rejects wrong shapes and
/// unknown enum values, `Validate` rejects out-of-range numbers. By the time
/// `calculate` runs only cross-field rules remain to be checked.
pub trait Calculator: 'static {
    /// Stable identifier, also the endpoint path
    const ID: &'static str;

    type Params: DeserializeOwned + Serialize + Validate + Send + 'static;

    fn metadata() -> ScoreMetadata;

    /// A request that passes validation, shown in the catalogue
    fn example() -> Self::Params;

    /// Pure, deterministic transformation of validated inputs
    fn calculate(params: &Self::Params) -> Result<ScoreResult, CalcError>;
}

/// Validate typed parameters and run the calculator
pub fn run_typed<C: Calculator>(params: &C::Params) -> Result<ScoreResult, CalcError> {
    params.validate()?;
    C::calculate(params)
}

/// Decode an untyped JSON object into the calculator's parameters, then run it
pub fn run_untyped<C: Calculator>(params: &Value) -> Result<ScoreResult, CalcError> {
    let typed = C::Params::deserialize(params)?;
    run_typed::<C>(&typed)
}
