use std::collections::{BTreeMap, BTreeSet};
use crate::models::{LifestyleFrequency, PersonalityTrait, ProfileSnapshot, ScoreBreakdown, ScoringWeights};

/// Trait weight when both users share the trait
pub const SHARED_TRAIT: f64 = 1.0;
/// Trait weight when the target has the complementary trait
pub const COMPLEMENTARY_TRAIT: f64 = 0.8;
/// Trait weight for anything else
pub const DIFFERENT_TRAIT: f64 = 0.3;

pub const ISSUE_RELATIONSHIP_GOALS: &str = "Different relationship goals";
pub const ISSUE_CHILDREN: &str = "Different views on having children";
pub const ISSUE_SMOKING: &str = "Different smoking habits";
pub const ISSUE_DRINKING: &str = "Different drinking habits";
pub const ISSUE_EDUCATION: &str = "Different education levels";
pub const ISSUE_LANGUAGES: &str = "No common languages";

/// Calculate a compatibility score (0-100) of `target` from `subject`'s side
///
/// Scoring formula (default weights):
/// score = (
///     interest_overlap * 30 +      # shared / larger interest set
///     personality_fit * 25 +       # mean per-trait weight over subject's traits
///     relationship_goal (0|10|15) +
///     children (0|10) +
///     smoking (0|1|3) + drinking (0|1|3) + education (0|4) +
///     languages (0|10)             # any shared language
/// )
///
/// A term contributes nothing when either side lacks the field.
pub fn calculate_compatibility(
    subject: &ProfileSnapshot,
    target: &ProfileSnapshot,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let mut issues = Vec::new();

    let (interest_score, common_interests) = calculate_interest_score(subject, target);
    let (personality_score, personality_match) = calculate_personality_score(subject, target);

    let goal_points = calculate_goal_points(subject, target, weights, &mut issues);
    let children_points = calculate_children_points(subject, target, weights, &mut issues);
    let lifestyle_points = calculate_lifestyle_points(subject, target, weights, &mut issues);
    let language_points = calculate_language_points(subject, target, weights, &mut issues);

    let total_score = interest_score * weights.interests
        + personality_score * weights.personality
        + goal_points
        + children_points
        + lifestyle_points
        + language_points;

    ScoreBreakdown {
        score: total_score.min(100.0).max(0.0),
        common_interests,
        personality_match,
        potential_issues: issues,
    }
}

/// Interest overlap (0-1) and the shared interests
#[inline]
fn calculate_interest_score(
    subject: &ProfileSnapshot,
    target: &ProfileSnapshot,
) -> (f64, BTreeSet<String>) {
    let (Some(mine), Some(theirs)) = (subject.interests(), target.interests()) else {
        return (0.0, BTreeSet::new());
    };

    let common: BTreeSet<String> = mine.intersection(theirs).cloned().collect();
    let larger = mine.len().max(theirs.len()) as f64;

    (common.len() as f64 / larger, common)
}

/// Personality fit (0-1) and the per-trait weights keyed by subject's traits
///
/// Iterates the subject's list only, so swapping the users changes the keys.
/// The divisor is the subject's list length including duplicates.
#[inline]
fn calculate_personality_score(
    subject: &ProfileSnapshot,
    target: &ProfileSnapshot,
) -> (f64, BTreeMap<PersonalityTrait, f64>) {
    let (Some(mine), Some(theirs)) = (subject.traits(), target.traits()) else {
        return (0.0, BTreeMap::new());
    };

    let mut matches = BTreeMap::new();
    for &personality in mine {
        let weight = if theirs.contains(&personality) {
            SHARED_TRAIT
        } else if theirs.contains(&personality.complement()) {
            COMPLEMENTARY_TRAIT
        } else {
            DIFFERENT_TRAIT
        };
        matches.insert(personality, weight);
    }

    let total: f64 = matches.values().sum();
    (total / mine.len() as f64, matches)
}

#[inline]
fn calculate_goal_points(
    subject: &ProfileSnapshot,
    target: &ProfileSnapshot,
    weights: &ScoringWeights,
    issues: &mut Vec<String>,
) -> f64 {
    match (subject.relationship_goal(), target.relationship_goal()) {
        (Some(a), Some(b)) if a == b => weights.relationship_goal,
        (Some("casual"), Some("friendship")) | (Some("friendship"), Some("casual")) => {
            weights.compatible_goal
        }
        (Some(_), Some(_)) => {
            issues.push(ISSUE_RELATIONSHIP_GOALS.to_string());
            0.0
        }
        _ => 0.0,
    }
}

#[inline]
fn calculate_children_points(
    subject: &ProfileSnapshot,
    target: &ProfileSnapshot,
    weights: &ScoringWeights,
    issues: &mut Vec<String>,
) -> f64 {
    match (subject.wants_children, target.wants_children) {
        (Some(a), Some(b)) if a == b => weights.children,
        (Some(_), Some(_)) => {
            issues.push(ISSUE_CHILDREN.to_string());
            0.0
        }
        _ => 0.0,
    }
}

/// Smoking, drinking and education checks summed without a cap
#[inline]
fn calculate_lifestyle_points(
    subject: &ProfileSnapshot,
    target: &ProfileSnapshot,
    weights: &ScoringWeights,
    issues: &mut Vec<String>,
) -> f64 {
    let mut points = 0.0;

    points += calculate_habit_points(
        subject.smoking,
        target.smoking,
        weights.smoking,
        weights.lifestyle_partial,
        ISSUE_SMOKING,
        issues,
    );
    points += calculate_habit_points(
        subject.drinking,
        target.drinking,
        weights.drinking,
        weights.lifestyle_partial,
        ISSUE_DRINKING,
        issues,
    );

    match (subject.education(), target.education()) {
        (Some(a), Some(b)) if a == b => points += weights.education,
        (Some(_), Some(_)) => issues.push(ISSUE_EDUCATION.to_string()),
        _ => {}
    }

    points
}

#[inline]
fn calculate_habit_points(
    mine: Option<LifestyleFrequency>,
    theirs: Option<LifestyleFrequency>,
    full: f64,
    partial: f64,
    issue: &str,
    issues: &mut Vec<String>,
) -> f64 {
    use LifestyleFrequency::{Never, Sometimes};

    match (mine, theirs) {
        (Some(a), Some(b)) if a == b => full,
        (Some(Never), Some(Sometimes)) | (Some(Sometimes), Some(Never)) => partial,
        (Some(_), Some(_)) => {
            issues.push(issue.to_string());
            0.0
        }
        _ => 0.0,
    }
}

#[inline]
fn calculate_language_points(
    subject: &ProfileSnapshot,
    target: &ProfileSnapshot,
    weights: &ScoringWeights,
    issues: &mut Vec<String>,
) -> f64 {
    let (Some(mine), Some(theirs)) = (subject.languages(), target.languages()) else {
        return 0.0;
    };

    if mine.intersection(theirs).next().is_some() {
        weights.languages
    } else {
        issues.push(ISSUE_LANGUAGES.to_string());
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> Option<BTreeSet<String>> {
        Some(items.iter().map(|s| s.to_string()).collect())
    }

    fn create_test_profile() -> ProfileSnapshot {
        ProfileSnapshot {
            user_id: "test_user".to_string(),
            interests: set(&["hiking", "music", "cooking"]),
            personality_traits: Some(vec![PersonalityTrait::Analytical, PersonalityTrait::Modern]),
            relationship_goal: Some("serious".to_string()),
            wants_children: Some(true),
            smoking: Some(LifestyleFrequency::Never),
            drinking: Some(LifestyleFrequency::Sometimes),
            education: Some("master".to_string()),
            languages: set(&["en", "de"]),
        }
    }

    #[test]
    fn test_identical_profiles_score_100() {
        let profile = create_test_profile();
        let result = calculate_compatibility(&profile, &profile, &ScoringWeights::default());

        assert!((result.score - 100.0).abs() < 1e-9);
        assert_eq!(result.common_interests.len(), 3);
        assert!(result.personality_match.values().all(|w| *w == SHARED_TRAIT));
        assert!(result.potential_issues.is_empty());
    }

    #[test]
    fn test_interest_score() {
        let a = ProfileSnapshot { interests: set(&["x", "y"]), ..Default::default() };
        let b = ProfileSnapshot { interests: set(&["y", "z"]), ..Default::default() };

        let (score, common) = calculate_interest_score(&a, &b);
        assert_eq!(score, 0.5);
        assert_eq!(common, set(&["y"]).unwrap());

        let none = ProfileSnapshot::default();
        let (score, common) = calculate_interest_score(&a, &none);
        assert_eq!(score, 0.0);
        assert!(common.is_empty());
    }

    #[test]
    fn test_interest_score_divides_by_larger_set() {
        let a = ProfileSnapshot { interests: set(&["x"]), ..Default::default() };
        let b = ProfileSnapshot { interests: set(&["x", "y", "z", "w"]), ..Default::default() };

        let (score, _) = calculate_interest_score(&a, &b);
        assert_eq!(score, 0.25);
    }

    #[test]
    fn test_personality_weights() {
        let a = ProfileSnapshot {
            personality_traits: Some(vec![
                PersonalityTrait::Creative,
                PersonalityTrait::Introvert,
                PersonalityTrait::Traditional,
            ]),
            ..Default::default()
        };
        let b = ProfileSnapshot {
            personality_traits: Some(vec![PersonalityTrait::Creative, PersonalityTrait::Extrovert]),
            ..Default::default()
        };

        let (score, matches) = calculate_personality_score(&a, &b);

        assert_eq!(matches[&PersonalityTrait::Creative], SHARED_TRAIT);
        assert_eq!(matches[&PersonalityTrait::Introvert], COMPLEMENTARY_TRAIT);
        assert_eq!(matches[&PersonalityTrait::Traditional], DIFFERENT_TRAIT);
        assert!((score - (1.0 + 0.8 + 0.3) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_subject_traits_count_in_divisor() {
        let a = ProfileSnapshot {
            personality_traits: Some(vec![PersonalityTrait::Modern, PersonalityTrait::Modern]),
            ..Default::default()
        };
        let b = ProfileSnapshot {
            personality_traits: Some(vec![PersonalityTrait::Modern]),
            ..Default::default()
        };

        let (score, matches) = calculate_personality_score(&a, &b);

        assert_eq!(matches.len(), 1);
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_goal_points() {
        let weights = ScoringWeights::default();
        let goal = |g: &str| ProfileSnapshot {
            relationship_goal: Some(g.to_string()),
            ..Default::default()
        };

        let mut issues = Vec::new();
        assert_eq!(calculate_goal_points(&goal("serious"), &goal("serious"), &weights, &mut issues), 15.0);
        assert_eq!(calculate_goal_points(&goal("friendship"), &goal("casual"), &weights, &mut issues), 10.0);
        assert!(issues.is_empty());

        assert_eq!(calculate_goal_points(&goal("casual"), &goal("serious"), &weights, &mut issues), 0.0);
        assert_eq!(issues, vec![ISSUE_RELATIONSHIP_GOALS]);

        let mut issues = Vec::new();
        assert_eq!(
            calculate_goal_points(&goal("casual"), &ProfileSnapshot::default(), &weights, &mut issues),
            0.0
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_children_points() {
        let weights = ScoringWeights::default();
        let wants = |w: Option<bool>| ProfileSnapshot { wants_children: w, ..Default::default() };

        let mut issues = Vec::new();
        assert_eq!(calculate_children_points(&wants(Some(false)), &wants(Some(false)), &weights, &mut issues), 10.0);
        assert_eq!(calculate_children_points(&wants(Some(true)), &wants(None), &weights, &mut issues), 0.0);
        assert!(issues.is_empty());

        assert_eq!(calculate_children_points(&wants(Some(true)), &wants(Some(false)), &weights, &mut issues), 0.0);
        assert_eq!(issues, vec![ISSUE_CHILDREN]);
    }

    #[test]
    fn test_habit_points() {
        use LifestyleFrequency::*;

        let mut issues = Vec::new();
        assert_eq!(calculate_habit_points(Some(Regularly), Some(Regularly), 3.0, 1.0, ISSUE_SMOKING, &mut issues), 3.0);
        assert_eq!(calculate_habit_points(Some(Sometimes), Some(Never), 3.0, 1.0, ISSUE_SMOKING, &mut issues), 1.0);
        assert_eq!(calculate_habit_points(None, Some(Never), 3.0, 1.0, ISSUE_SMOKING, &mut issues), 0.0);
        assert!(issues.is_empty());

        assert_eq!(calculate_habit_points(Some(Never), Some(Regularly), 3.0, 1.0, ISSUE_SMOKING, &mut issues), 0.0);
        assert_eq!(calculate_habit_points(Some(Regularly), Some(Sometimes), 3.0, 1.0, ISSUE_SMOKING, &mut issues), 0.0);
        assert_eq!(issues, vec![ISSUE_SMOKING, ISSUE_SMOKING]);
    }

    #[test]
    fn test_lifestyle_points_and_issue_order() {
        let a = ProfileSnapshot {
            smoking: Some(LifestyleFrequency::Never),
            drinking: Some(LifestyleFrequency::Regularly),
            education: Some("bachelor".to_string()),
            ..Default::default()
        };
        let b = ProfileSnapshot {
            smoking: Some(LifestyleFrequency::Regularly),
            drinking: Some(LifestyleFrequency::Never),
            education: Some("phd".to_string()),
            ..Default::default()
        };

        let mut issues = Vec::new();
        let points = calculate_lifestyle_points(&a, &b, &ScoringWeights::default(), &mut issues);

        assert_eq!(points, 0.0);
        assert_eq!(issues, vec![ISSUE_SMOKING, ISSUE_DRINKING, ISSUE_EDUCATION]);
    }

    #[test]
    fn test_language_points() {
        let weights = ScoringWeights::default();
        let speaks = |l: &[&str]| ProfileSnapshot { languages: set(l), ..Default::default() };

        let mut issues = Vec::new();
        assert_eq!(calculate_language_points(&speaks(&["en", "fr"]), &speaks(&["fr"]), &weights, &mut issues), 10.0);
        assert!(issues.is_empty());

        assert_eq!(calculate_language_points(&speaks(&["en"]), &speaks(&["es"]), &weights, &mut issues), 0.0);
        assert_eq!(issues, vec![ISSUE_LANGUAGES]);
    }

    #[test]
    fn test_score_clamped_with_oversized_weights() {
        let weights = ScoringWeights {
            interests: 80.0,
            personality: 80.0,
            ..ScoringWeights::default()
        };
        let profile = create_test_profile();

        let result = calculate_compatibility(&profile, &profile, &weights);
        assert_eq!(result.score, 100.0);
    }
}
