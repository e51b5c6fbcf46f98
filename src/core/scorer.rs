use crate::models::{ProfileSnapshot, ScoreBreakdown, ScoringWeights};
use crate::core::scoring::calculate_compatibility;

/// Compatibility scorer
///
/// Stateless apart from its weights; cheap to copy and safe to share across
/// threads.
#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score `target` from `subject`'s point of view
    ///
    /// Never fails; missing fields only drop their term.
    pub fn score(&self, subject: &ProfileSnapshot, target: &ProfileSnapshot) -> ScoreBreakdown {
        calculate_compatibility(subject, target, &self.weights)
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
