use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Closed personality trait vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonalityTrait {
    Introvert,
    Extrovert,
    Adventurous,
    Cautious,
    Spontaneous,
    Planned,
    Analytical,
    Creative,
    Traditional,
    Modern,
}

impl PersonalityTrait {
    pub const ALL: [PersonalityTrait; 10] = [
        PersonalityTrait::Introvert,
        PersonalityTrait::Extrovert,
        PersonalityTrait::Adventurous,
        PersonalityTrait::Cautious,
        PersonalityTrait::Spontaneous,
        PersonalityTrait::Planned,
        PersonalityTrait::Analytical,
        PersonalityTrait::Creative,
        PersonalityTrait::Traditional,
        PersonalityTrait::Modern,
    ];

    /// The opposite-but-compatible trait that earns partial credit
    pub const fn complement(self) -> PersonalityTrait {
        match self {
            PersonalityTrait::Introvert => PersonalityTrait::Extrovert,
            PersonalityTrait::Extrovert => PersonalityTrait::Introvert,
            PersonalityTrait::Adventurous => PersonalityTrait::Cautious,
            PersonalityTrait::Cautious => PersonalityTrait::Adventurous,
            PersonalityTrait::Spontaneous => PersonalityTrait::Planned,
            PersonalityTrait::Planned => PersonalityTrait::Spontaneous,
            PersonalityTrait::Analytical => PersonalityTrait::Creative,
            PersonalityTrait::Creative => PersonalityTrait::Analytical,
            PersonalityTrait::Traditional => PersonalityTrait::Modern,
            PersonalityTrait::Modern => PersonalityTrait::Traditional,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonalityTrait::Introvert => "introvert",
            PersonalityTrait::Extrovert => "extrovert",
            PersonalityTrait::Adventurous => "adventurous",
            PersonalityTrait::Cautious => "cautious",
            PersonalityTrait::Spontaneous => "spontaneous",
            PersonalityTrait::Planned => "planned",
            PersonalityTrait::Analytical => "analytical",
            PersonalityTrait::Creative => "creative",
            PersonalityTrait::Traditional => "traditional",
            PersonalityTrait::Modern => "modern",
        }
    }
}

/// How often a user smokes or drinks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifestyleFrequency {
    Never,
    Sometimes,
    Regularly,
}

/// Read-only view of the profile fields that feed compatibility scoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    #[serde(rename = "userId", default)]
    pub user_id: String,
    #[serde(default)]
    pub interests: Option<BTreeSet<String>>,
    #[serde(rename = "personalityTraits", default)]
    pub personality_traits: Option<Vec<PersonalityTrait>>,
    #[serde(rename = "relationshipGoal", alias = "relationshipGoals", default)]
    pub relationship_goal: Option<String>,
    #[serde(rename = "wantsChildren", default)]
    pub wants_children: Option<bool>,
    #[serde(default)]
    pub smoking: Option<LifestyleFrequency>,
    #[serde(default)]
    pub drinking: Option<LifestyleFrequency>,
    #[serde(default)]
    pub education: Option<String>,
    #[serde(default)]
    pub languages: Option<BTreeSet<String>>,
}

impl ProfileSnapshot {
    /// Interests, or `None` when absent or empty
    pub fn interests(&self) -> Option<&BTreeSet<String>> {
        self.interests.as_ref().filter(|set| !set.is_empty())
    }

    /// Personality traits, or `None` when absent or empty
    pub fn traits(&self) -> Option<&[PersonalityTrait]> {
        self.personality_traits
            .as_deref()
            .filter(|traits| !traits.is_empty())
    }

    /// Relationship goal, treating an empty string as unknown
    pub fn relationship_goal(&self) -> Option<&str> {
        self.relationship_goal.as_deref().filter(|goal| !goal.is_empty())
    }

    /// Education, treating an empty string as unknown
    pub fn education(&self) -> Option<&str> {
        self.education.as_deref().filter(|edu| !edu.is_empty())
    }

    /// Languages, or `None` when absent or empty
    pub fn languages(&self) -> Option<&BTreeSet<String>> {
        self.languages.as_ref().filter(|set| !set.is_empty())
    }
}

/// Output of a single scoring run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub score: f64,
    #[serde(rename = "commonInterests")]
    pub common_interests: BTreeSet<String>,
    #[serde(rename = "personalityMatch")]
    pub personality_match: BTreeMap<PersonalityTrait, f64>,
    #[serde(rename = "potentialIssues")]
    pub potential_issues: Vec<String>,
}

/// Persisted compatibility report for a directional (subject, target) pair
///
/// Reports are written once and never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityReport {
    pub id: uuid::Uuid,
    #[serde(rename = "subjectUserId")]
    pub subject_user_id: String,
    #[serde(rename = "targetUserId")]
    pub target_user_id: String,
    pub score: f64,
    #[serde(rename = "commonInterests")]
    pub common_interests: BTreeSet<String>,
    #[serde(rename = "personalityMatch")]
    pub personality_match: BTreeMap<PersonalityTrait, f64>,
    #[serde(rename = "potentialIssues")]
    pub potential_issues: Vec<String>,
    #[serde(rename = "computedAt")]
    pub computed_at: chrono::NaiveDate,
}

impl CompatibilityReport {
    /// Build a fresh report from a score breakdown
    pub fn new(
        subject_user_id: impl Into<String>,
        target_user_id: impl Into<String>,
        breakdown: ScoreBreakdown,
        computed_at: chrono::NaiveDate,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            subject_user_id: subject_user_id.into(),
            target_user_id: target_user_id.into(),
            score: breakdown.score,
            common_interests: breakdown.common_interests,
            personality_match: breakdown.personality_match,
            potential_issues: breakdown.potential_issues,
            computed_at,
        }
    }
}

/// Per-term scoring weights
///
/// The defaults sum to 100, so a perfect match scores exactly 100.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub interests: f64,
    pub personality: f64,
    pub relationship_goal: f64,
    /// Awarded for the casual/friendship goal pairing
    pub compatible_goal: f64,
    pub children: f64,
    pub smoking: f64,
    pub drinking: f64,
    /// Awarded for never/sometimes smoking or drinking pairings
    pub lifestyle_partial: f64,
    pub education: f64,
    pub languages: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            interests: 30.0,
            personality: 25.0,
            relationship_goal: 15.0,
            compatible_goal: 10.0,
            children: 10.0,
            smoking: 3.0,
            drinking: 3.0,
            lifestyle_partial: 1.0,
            education: 4.0,
            languages: 10.0,
        }
    }
}
