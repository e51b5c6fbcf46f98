use redis::aio::ConnectionManager;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::CompatibilityReport;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Read-through cache for compatibility reports
///
/// L1 is an in-process moka cache; L2 is Redis, shared across instances
/// when configured. Reports are immutable once stored, so entries are never
/// invalidated and only age out after the TTL.
pub struct ReportCache {
    redis: Option<Mutex<ConnectionManager>>,
    local: moka::future::Cache<String, Arc<CompatibilityReport>>,
    ttl_secs: u64,
}

impl ReportCache {
    /// Create a cache backed by Redis
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        Ok(Self {
            redis: Some(Mutex::new(redis)),
            ..Self::in_memory(l1_size, ttl_secs)
        })
    }

    /// Create a cache local to this process
    pub fn in_memory(l1_size: u64, ttl_secs: u64) -> Self {
        let local = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            redis: None,
            local,
            ttl_secs,
        }
    }

    /// Look up the cached report of a directional pair
    pub async fn get(
        &self,
        subject_user_id: &str,
        target_user_id: &str,
    ) -> Result<Option<CompatibilityReport>, CacheError> {
        let key = CacheKey::report(subject_user_id, target_user_id);

        if let Some(report) = self.local.get(&key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(Some(report.as_ref().clone()));
        }

        let Some(redis) = &self.redis else {
            return Ok(None);
        };

        let value: Option<String> = {
            let mut conn = redis.lock().await;
            redis::cmd("GET").arg(&key).query_async(&mut *conn).await?
        };

        match value {
            Some(json) => {
                tracing::trace!("L2 cache hit: {}", key);
                let report: CompatibilityReport = serde_json::from_str(&json)?;
                self.local.insert(key, Arc::new(report.clone())).await;
                Ok(Some(report))
            }
            None => {
                tracing::trace!("Cache miss: {}", key);
                Ok(None)
            }
        }
    }

    /// Store a report under its pair in both tiers
    pub async fn put(&self, report: &CompatibilityReport) -> Result<(), CacheError> {
        let key = CacheKey::report(&report.subject_user_id, &report.target_user_id);

        self.local.insert(key.clone(), Arc::new(report.clone())).await;

        if let Some(redis) = &self.redis {
            let json = serde_json::to_string(report)?;
            let mut conn = redis.lock().await;
            redis::cmd("SETEX")
                .arg(&key)
                .arg(self.ttl_secs)
                .arg(json)
                .query_async::<()>(&mut *conn)
                .await?;
        }

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for the report of a directional user pair
    pub fn report(subject_user_id: &str, target_user_id: &str) -> String {
        format!("compat:{}:{}", subject_user_id, target_user_id)
    }
}
