// Core dispatch exports
pub mod bands;
pub mod calculator;
pub mod registry;

pub use bands::{classify, ensure_finite, round_to, Band};
pub use calculator::{run_typed, run_untyped, Calculator};
pub use registry::{Registry, ScoreEntry};
