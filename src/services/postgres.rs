use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;
use thiserror::Error;

use crate::core::{ReportRepository, StorageError};
use crate::models::{CompatibilityReport, PersonalityTrait};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

impl From<PostgresError> for StorageError {
    fn from(err: PostgresError) -> Self {
        StorageError::Backend(err.to_string())
    }
}

/// PostgreSQL client for persisted compatibility reports
///
/// The `compatibility_reports` table carries a unique constraint on
/// `(subject_user_id, target_user_id)`, so at most one report exists per
/// directional pair no matter how many instances race to create it.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Look up the report for a directional pair
    pub async fn find_report(
        &self,
        subject_user_id: &str,
        target_user_id: &str,
    ) -> Result<Option<CompatibilityReport>, PostgresError> {
        let query = r#"
            SELECT id, subject_user_id, target_user_id, score,
                   common_interests, personality_match, potential_issues, computed_at
            FROM compatibility_reports
            WHERE subject_user_id = $1 AND target_user_id = $2
        "#;

        let row = sqlx::query(query)
            .bind(subject_user_id)
            .bind(target_user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(report_from_row).transpose()
    }

    /// Insert a report unless one already exists for its pair
    ///
    /// Uses INSERT ... ON CONFLICT DO NOTHING; `None` means another writer
    /// got there first and the existing row was left untouched.
    pub async fn insert_report(
        &self,
        report: &CompatibilityReport,
    ) -> Result<Option<CompatibilityReport>, PostgresError> {
        let query = r#"
            INSERT INTO compatibility_reports (
                id, subject_user_id, target_user_id, score,
                common_interests, personality_match, potential_issues, computed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (subject_user_id, target_user_id) DO NOTHING
            RETURNING id, subject_user_id, target_user_id, score,
                      common_interests, personality_match, potential_issues, computed_at
        "#;

        let row = sqlx::query(query)
            .bind(report.id)
            .bind(&report.subject_user_id)
            .bind(&report.target_user_id)
            .bind(report.score)
            .bind(Json(&report.common_interests))
            .bind(Json(&report.personality_match))
            .bind(Json(&report.potential_issues))
            .bind(report.computed_at)
            .fetch_optional(&self.pool)
            .await?;

        tracing::debug!(
            "Inserted report {} -> {}: {}",
            report.subject_user_id,
            report.target_user_id,
            if row.is_some() { "created" } else { "conflict" }
        );

        row.as_ref().map(report_from_row).transpose()
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn report_from_row(row: &PgRow) -> Result<CompatibilityReport, PostgresError> {
    let common_interests: Json<BTreeSet<String>> = row.try_get("common_interests")?;
    let personality_match: Json<BTreeMap<PersonalityTrait, f64>> = row.try_get("personality_match")?;
    let potential_issues: Json<Vec<String>> = row.try_get("potential_issues")?;

    Ok(CompatibilityReport {
        id: row.try_get("id")?,
        subject_user_id: row.try_get("subject_user_id")?,
        target_user_id: row.try_get("target_user_id")?,
        score: row.try_get("score")?,
        common_interests: common_interests.0,
        personality_match: personality_match.0,
        potential_issues: potential_issues.0,
        computed_at: row.try_get("computed_at")?,
    })
}

#[async_trait]
impl ReportRepository for PostgresClient {
    async fn find(
        &self,
        subject_user_id: &str,
        target_user_id: &str,
    ) -> Result<Option<CompatibilityReport>, StorageError> {
        Ok(self.find_report(subject_user_id, target_user_id).await?)
    }

    async fn insert(&self, report: CompatibilityReport) -> Result<CompatibilityReport, StorageError> {
        let stored = self.insert_report(&report).await?;

        stored.ok_or(StorageError::DuplicateKey {
            subject: report.subject_user_id,
            target: report.target_user_id,
        })
    }
}
