//! Score Calc - REST service for deterministic clinical risk scores
//!
//! Every score is a [`Calculator`]: a typed, validated request schema plus a
//! pure function producing a [`ScoreResult`]. Calculators are collected in a
//! [`Registry`] at startup and exposed over HTTP by [`routes`].

pub mod calculators;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use calculators::{default_registry, register_all};
pub use crate::core::{Calculator, Registry, ScoreEntry};
pub use error::{CalcError, ConfigurationError};
pub use models::{ScoreMetadata, ScoreResult, ScoreValue};
pub use routes::{configure_routes, AppState};
