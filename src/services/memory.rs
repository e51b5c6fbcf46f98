use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::core::{ProfileProvider, ReportRepository, StorageError};
use crate::models::{CompatibilityReport, ProfileSnapshot};

/// In-process profile source, used for tests and local tooling
#[derive(Debug, Default)]
pub struct InMemoryProfileProvider {
    profiles: RwLock<HashMap<String, ProfileSnapshot>>,
}

impl InMemoryProfileProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a profile, keyed by its `user_id`
    pub async fn upsert(&self, profile: ProfileSnapshot) {
        self.profiles
            .write()
            .await
            .insert(profile.user_id.clone(), profile);
    }
}

#[async_trait]
impl ProfileProvider for InMemoryProfileProvider {
    async fn get_profile(&self, user_id: &str) -> Result<Option<ProfileSnapshot>, StorageError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }
}

/// In-process report store with the same uniqueness rule as the database
#[derive(Debug, Default)]
pub struct InMemoryReportRepository {
    reports: RwLock<HashMap<(String, String), CompatibilityReport>>,
}

impl InMemoryReportRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.reports.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reports.read().await.is_empty()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn find(
        &self,
        subject_user_id: &str,
        target_user_id: &str,
    ) -> Result<Option<CompatibilityReport>, StorageError> {
        let key = (subject_user_id.to_string(), target_user_id.to_string());
        Ok(self.reports.read().await.get(&key).cloned())
    }

    async fn insert(&self, report: CompatibilityReport) -> Result<CompatibilityReport, StorageError> {
        let key = (report.subject_user_id.clone(), report.target_user_id.clone());
        let mut reports = self.reports.write().await;

        if reports.contains_key(&key) {
            return Err(StorageError::DuplicateKey {
                subject: key.0,
                target: key.1,
            });
        }

        reports.insert(key, report.clone());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScoreBreakdown;

    fn report(subject: &str, target: &str) -> CompatibilityReport {
        let today = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        CompatibilityReport::new(subject, target, ScoreBreakdown::default(), today)
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_pair() {
        let repo = InMemoryReportRepository::new();

        repo.insert(report("a", "b")).await.unwrap();
        let err = repo.insert(report("a", "b")).await.unwrap_err();

        assert!(matches!(err, StorageError::DuplicateKey { .. }));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_pairs_are_directional() {
        let repo = InMemoryReportRepository::new();

        repo.insert(report("a", "b")).await.unwrap();
        repo.insert(report("b", "a")).await.unwrap();

        assert_eq!(repo.len().await, 2);
        assert!(repo.find("a", "b").await.unwrap().is_some());
        assert!(repo.find("a", "c").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_profile_provider_lookup() {
        let provider = InMemoryProfileProvider::new();
        provider
            .upsert(ProfileSnapshot {
                user_id: "a".to_string(),
                ..Default::default()
            })
            .await;

        assert!(provider.get_profile("a").await.unwrap().is_some());
        assert!(provider.get_profile("missing").await.unwrap().is_none());
    }
}
