use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::core::Scorer;
use crate::models::{CompatibilityReport, ProfileSnapshot};

/// Errors raised by profile and report collaborators
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Report already exists: {subject} -> {target}")]
    DuplicateKey { subject: String, target: String },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Errors returned by [`ReportStore`]
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Source of profile snapshots
#[async_trait]
pub trait ProfileProvider: Send + Sync {
    /// Fetch a user's profile, `None` when the user does not exist
    async fn get_profile(&self, user_id: &str) -> Result<Option<ProfileSnapshot>, StorageError>;
}

/// Keyed store of compatibility reports
///
/// Implementations must reject a second report for the same
/// `(subject, target)` pair with [`StorageError::DuplicateKey`].
#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn find(
        &self,
        subject_user_id: &str,
        target_user_id: &str,
    ) -> Result<Option<CompatibilityReport>, StorageError>;

    async fn insert(&self, report: CompatibilityReport) -> Result<CompatibilityReport, StorageError>;
}

/// Computes compatibility reports once per directional pair and serves the
/// stored copy afterwards
#[derive(Clone)]
pub struct ReportStore {
    profiles: Arc<dyn ProfileProvider>,
    reports: Arc<dyn ReportRepository>,
    scorer: Scorer,
}

impl ReportStore {
    pub fn new(
        profiles: Arc<dyn ProfileProvider>,
        reports: Arc<dyn ReportRepository>,
        scorer: Scorer,
    ) -> Self {
        Self {
            profiles,
            reports,
            scorer,
        }
    }

    /// Return the stored report for `(subject, target)`, creating it on first
    /// request
    ///
    /// A stored report is returned as-is even if either profile has changed
    /// since it was computed.
    pub async fn get_or_create(
        &self,
        subject_user_id: &str,
        target_user_id: &str,
    ) -> Result<CompatibilityReport, ReportError> {
        if let Some(report) = self.reports.find(subject_user_id, target_user_id).await? {
            tracing::debug!("Report hit: {} -> {}", subject_user_id, target_user_id);
            return Ok(report);
        }

        let subject = self.load_profile(subject_user_id).await?;
        let target = self.load_profile(target_user_id).await?;

        let breakdown = self.scorer.score(&subject, &target);
        let today = chrono::Utc::now().date_naive();
        let report = CompatibilityReport::new(subject_user_id, target_user_id, breakdown, today);

        match self.reports.insert(report).await {
            Ok(stored) => {
                tracing::info!(
                    "Created compatibility report {} -> {} (score {:.2})",
                    subject_user_id,
                    target_user_id,
                    stored.score
                );
                Ok(stored)
            }
            Err(StorageError::DuplicateKey { .. }) => {
                // Lost a concurrent insert; the winner's report is authoritative
                tracing::debug!(
                    "Concurrent report insert for {} -> {}, re-reading",
                    subject_user_id,
                    target_user_id
                );
                self.reports
                    .find(subject_user_id, target_user_id)
                    .await?
                    .ok_or_else(|| {
                        StorageError::Backend(format!(
                            "Report {} -> {} conflicted on insert but could not be read back",
                            subject_user_id, target_user_id
                        ))
                        .into()
                    })
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn load_profile(&self, user_id: &str) -> Result<ProfileSnapshot, ReportError> {
        self.profiles
            .get_profile(user_id)
            .await?
            .ok_or_else(|| ReportError::NotFound(user_id.to_string()))
    }
}
