use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::models::domain::CompatibilityReport;

/// Compatibility result as seen by API callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResponse {
    /// The target user's id
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "compatibilityScore")]
    pub compatibility_score: f64,
    #[serde(rename = "commonInterests")]
    pub common_interests: Vec<String>,
    #[serde(rename = "personalityMatch")]
    pub personality_match: BTreeMap<String, f64>,
    #[serde(rename = "potentialIssues")]
    pub potential_issues: Vec<String>,
}

impl From<&CompatibilityReport> for CompatibilityResponse {
    fn from(report: &CompatibilityReport) -> Self {
        Self {
            user_id: report.target_user_id.clone(),
            compatibility_score: report.score,
            common_interests: report.common_interests.iter().cloned().collect(),
            personality_match: report
                .personality_match
                .iter()
                .map(|(t, w)| (t.as_str().to_string(), *w))
                .collect(),
            potential_issues: report.potential_issues.clone(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PersonalityTrait, ScoreBreakdown};

    #[test]
    fn test_response_from_report() {
        let mut breakdown = ScoreBreakdown {
            score: 42.5,
            potential_issues: vec!["No common languages".to_string()],
            ..Default::default()
        };
        breakdown.common_interests.insert("hiking".to_string());
        breakdown.personality_match.insert(PersonalityTrait::Creative, 1.0);

        let today = chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let report = CompatibilityReport::new("alice", "bob", breakdown, today);
        let response = CompatibilityResponse::from(&report);

        assert_eq!(response.user_id, "bob");
        assert_eq!(response.compatibility_score, 42.5);
        assert_eq!(response.common_interests, vec!["hiking"]);
        assert_eq!(response.personality_match.get("creative"), Some(&1.0));
        assert_eq!(response.potential_issues, vec!["No common languages"]);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("compatibilityScore").is_some());
        assert!(json.get("computedAt").is_none());
    }
}
