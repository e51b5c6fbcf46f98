// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    CompatibilityReport, LifestyleFrequency, PersonalityTrait, ProfileSnapshot, ScoreBreakdown,
    ScoringWeights,
};
pub use requests::CompatibilityRequest;
pub use responses::{CompatibilityResponse, ErrorResponse, HealthResponse};
