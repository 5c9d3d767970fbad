use crate::error::CalcError;

/// One interpretation band of a score
///
/// A band covers `[lower, next band's lower)`. Tables are sorted ascending
/// and the first band normally starts at `f64::NEG_INFINITY`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lower: f64,
    pub stage: &'static str,
    pub description: &'static str,
}

impl Band {
    pub const fn new(lower: f64, stage: &'static str, description: &'static str) -> Self {
        Self { lower, stage, description }
    }
}

/// Find the band containing `value`
pub fn classify(value: f64, bands: &[Band]) -> Result<&Band, CalcError> {
    ensure_finite("value", value)?;
    bands
        .iter()
        .rev()
        .find(|band| value >= band.lower)
        .ok_or_else(|| CalcError::internal(format!("no interpretation band covers {}", value)))
}

/// Round half away from zero to `places` decimals
#[inline]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10_f64.powi(places);
    (value * factor).round() / factor
}

/// Reject NaN and infinities coming out of a formula
#[inline]
pub fn ensure_finite(name: &str, value: f64) -> Result<f64, CalcError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::internal(format!("{} is not a finite number", name)))
    }
}
