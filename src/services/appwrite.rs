use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::core::{ProfileProvider, StorageError};
use crate::models::ProfileSnapshot;

/// Errors that can occur when interacting with Appwrite
#[derive(Debug, Error)]
pub enum AppwriteError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key or token")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl From<AppwriteError> for StorageError {
    fn from(err: AppwriteError) -> Self {
        StorageError::Backend(err.to_string())
    }
}

/// Appwrite API client
///
/// Reads user profile documents; profiles are owned by the main Lume
/// backend and never written from here.
pub struct AppwriteClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: AppwriteCollections,
}

/// Collection IDs in Appwrite
#[derive(Debug, Clone)]
pub struct AppwriteCollections {
    pub user_profiles: String,
}

impl AppwriteClient {
    /// Create a new Appwrite client
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: AppwriteCollections,
    ) -> Result<Self, AppwriteError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        })
    }

    /// Get a single profile by user ID
    ///
    /// Only a document whose `userId` equals `user_id` is accepted; a page
    /// holding other users' documents is treated as not found.
    pub async fn get_profile(&self, user_id: &str) -> Result<ProfileSnapshot, AppwriteError> {
        let url = format!(
            "{}/databases/{}/collections/{}/documents?{}={}",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.user_profiles,
            urlencoding::encode("queries[]"),
            urlencoding::encode(&user_id_query(user_id))
        );

        tracing::debug!("Fetching profile for user: {}", user_id);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppwriteError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Failed to fetch profile for {}: {} - {}", user_id, status, body);
            return Err(AppwriteError::ApiError(format!(
                "Failed to fetch profile: {}",
                status
            )));
        }

        let json: Value = response.json().await?;

        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| AppwriteError::InvalidResponse("Missing documents array".into()))?;

        let data = documents
            .iter()
            .map(|doc| doc.get("data").unwrap_or(doc))
            .find(|data| data.get("userId").and_then(Value::as_str) == Some(user_id));

        let Some(data) = data else {
            if !documents.is_empty() {
                tracing::warn!(
                    "Appwrite returned {} profile(s) for user {}, none with a matching userId",
                    documents.len(),
                    user_id
                );
            }
            return Err(AppwriteError::NotFound(format!("Profile not found for user {}", user_id)));
        };

        serde_json::from_value(data.clone())
            .map_err(|e| AppwriteError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }
}

/// Appwrite `equal` query on the `userId` attribute
///
/// Built with serde_json so quotes and backslashes in the id stay inside
/// the string value.
fn user_id_query(user_id: &str) -> String {
    serde_json::json!({
        "method": "equal",
        "attribute": "userId",
        "values": [user_id],
    })
    .to_string()
}

#[async_trait]
impl ProfileProvider for AppwriteClient {
    async fn get_profile(&self, user_id: &str) -> Result<Option<ProfileSnapshot>, StorageError> {
        match AppwriteClient::get_profile(self, user_id).await {
            Ok(profile) => Ok(Some(profile)),
            Err(AppwriteError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
