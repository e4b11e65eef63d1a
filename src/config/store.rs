//! Record store configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Which record store adapter to run against
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Hosted PostgREST table API
    #[default]
    Postgrest,
    /// Process-local store, empty at start
    Memory,
}

/// Record store configuration (PostgREST endpoint and table names)
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Project URL, e.g. `https://abc.supabase.co`
    #[serde(default)]
    pub url: String,

    /// API key sent as `apikey` and bearer token
    pub api_key: Option<Secret<String>>,

    #[serde(default = "default_rest_path")]
    pub rest_path: String,

    #[serde(default = "default_prospects_table")]
    pub prospects_table: String,

    #[serde(default = "default_activities_table")]
    pub activities_table: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl StoreConfig {
    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate record store configuration
    ///
    /// URL and API key are only required for the PostgREST backend.
    /// In production the URL must use HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.prospects_table.is_empty()
            || self.activities_table.is_empty()
            || self.prospects_table == self.activities_table
        {
            return Err(ValidationError::InvalidTableNames);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidStoreTimeout);
        }

        if self.backend == StoreBackend::Memory {
            return Ok(());
        }

        if self.url.is_empty() {
            return Err(ValidationError::MissingRequired("STORE__URL"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ValidationError::InvalidStoreUrl);
        }
        if *environment == Environment::Production && !self.url.starts_with("https://") {
            return Err(ValidationError::StoreUrlMustBeHttps);
        }
        match &self.api_key {
            Some(key) if !key.expose_secret().is_empty() => Ok(()),
            _ => Err(ValidationError::MissingRequired("STORE__API_KEY")),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: String::new(),
            api_key: None,
            rest_path: default_rest_path(),
            prospects_table: default_prospects_table(),
            activities_table: default_activities_table(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_rest_path() -> String {
    "rest/v1".to_string()
}

fn default_prospects_table() -> String {
    "prospects".to_string()
}

fn default_activities_table() -> String {
    "activities".to_string()
}

fn default_timeout() -> u64 {
    15
}
