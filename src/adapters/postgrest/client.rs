//! PostgREST client implementing `ProspectStore` and `ActivityStore`.
//!
//! # Configuration
//!
//! ```ignore
//! let config = PostgrestConfig::new("https://abc.supabase.co", api_key)
//!     .with_timeout(Duration::from_secs(15));
//!
//! let client = PostgrestClient::new(config)?;
//! let prospects = ProspectStore::list_all(&client).await?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::domain::activity::{Activity, NewActivity};
use crate::domain::foundation::{ActivityId, ProspectId};
use crate::domain::prospect::{NewProspect, Prospect};
use crate::ports::{ActivityStore, ProspectStore, StoreError};

/// Configuration for the PostgREST client.
#[derive(Debug, Clone)]
pub struct PostgrestConfig {
    /// Project URL, e.g. `https://abc.supabase.co`.
    pub base_url: String,
    /// Anonymous or service key, sent as `apikey` and bearer token.
    api_key: Secret<String>,
    /// Path of the REST endpoint under the project URL.
    pub rest_path: String,
    pub prospects_table: String,
    pub activities_table: String,
    pub timeout: Duration,
}

impl PostgrestConfig {
    /// Creates a configuration with the default REST path and table names.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: Secret::new(api_key.into()),
            rest_path: "rest/v1".to_string(),
            prospects_table: "prospects".to_string(),
            activities_table: "activities".to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    pub fn with_rest_path(mut self, rest_path: impl Into<String>) -> Self {
        self.rest_path = rest_path.into();
        self
    }

    pub fn with_tables(
        mut self,
        prospects: impl Into<String>,
        activities: impl Into<String>,
    ) -> Self {
        self.prospects_table = prospects.into();
        self.activities_table = activities.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Record store client for a PostgREST endpoint.
pub struct PostgrestClient {
    config: PostgrestConfig,
    client: Client,
}

impl PostgrestClient {
    /// # Errors
    ///
    /// `StoreError::Transport` if the HTTP client cannot be built.
    pub fn new(config: PostgrestConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the endpoint URL for a table.
    fn table_url(&self, table: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.rest_path.trim_matches('/'),
            table
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", self.config.api_key())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = self.authorized(request).send().await.map_err(|e| {
            if e.is_timeout() {
                StoreError::transport(format!(
                    "Request timed out after {} seconds",
                    self.config.timeout.as_secs()
                ))
            } else if e.is_connect() {
                StoreError::transport(format!("Connection failed: {}", e))
            } else {
                StoreError::transport(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!("Record store returned {}: {}", status, body);
        Err(StoreError::rejected(status.as_u16(), Self::error_message(&body)))
    }

    /// Pulls `message` out of a PostgREST error body, or returns the raw body.
    fn error_message(body: &str) -> String {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or_else(|| body.to_string())
    }

    async fn select_all<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, StoreError> {
        tracing::debug!("Selecting all rows from {}", table);
        let request = self
            .client
            .get(self.table_url(table))
            .query(&[("select", "*")]);

        self.send(request)
            .await?
            .json::<Vec<T>>()
            .await
            .map_err(|e| StoreError::decode(format!("Failed to parse rows of {}: {}", table, e)))
    }

    async fn insert_one<B, T>(&self, table: &str, row: &B) -> Result<T, StoreError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let request = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(&[row]);

        let mut rows = self
            .send(request)
            .await?
            .json::<Vec<T>>()
            .await
            .map_err(|e| StoreError::decode(format!("Failed to parse inserted row: {}", e)))?;

        if rows.is_empty() {
            return Err(StoreError::EmptyResponse(table.to_string()));
        }
        Ok(rows.swap_remove(0))
    }

    /// Deletes by id and returns how many rows the store reports removed.
    ///
    /// PostgREST answers 2xx even when the filter matched nothing, so the
    /// deleted rows are requested back and counted.
    async fn delete_by_id(&self, table: &str, id: String) -> Result<usize, StoreError> {
        let request = self
            .client
            .delete(self.table_url(table))
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{}", id)), ("select", "id".to_string())]);

        let rows = self
            .send(request)
            .await?
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| StoreError::decode(format!("Failed to parse deleted rows: {}", e)))?;

        tracing::debug!("Deleted {} row(s) with id {} from {}", rows.len(), id, table);
        Ok(rows.len())
    }
}

#[async_trait]
impl ProspectStore for PostgrestClient {
    async fn list_all(&self) -> Result<Vec<Prospect>, StoreError> {
        self.select_all(&self.config.prospects_table).await
    }

    async fn insert(&self, prospect: &NewProspect) -> Result<Prospect, StoreError> {
        self.insert_one(&self.config.prospects_table, prospect).await
    }

    async fn delete(&self, id: ProspectId) -> Result<usize, StoreError> {
        self.delete_by_id(&self.config.prospects_table, id.to_string())
            .await
    }
}

#[async_trait]
impl ActivityStore for PostgrestClient {
    async fn list_all(&self) -> Result<Vec<Activity>, StoreError> {
        self.select_all(&self.config.activities_table).await
    }

    async fn insert(&self, activity: &NewActivity) -> Result<Activity, StoreError> {
        self.insert_one(&self.config.activities_table, activity).await
    }

    async fn delete(&self, id: ActivityId) -> Result<usize, StoreError> {
        self.delete_by_id(&self.config.activities_table, id.to_string())
            .await
    }
}
