//! Lume Compat - Compatibility scoring service for Lume dating app
//!
//! This library scores how well two users fit together and persists the
//! result as a report per directional user pair, computed once and served
//! from storage afterwards.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_compatibility, ReportError, ReportStore, Scorer};
pub use crate::models::{CompatibilityReport, CompatibilityResponse, PersonalityTrait, ProfileSnapshot, ScoreBreakdown, ScoringWeights};
