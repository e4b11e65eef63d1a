//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("Invalid record store URL format")]
    InvalidStoreUrl,

    #[error("Record store URL must use HTTPS in production")]
    StoreUrlMustBeHttps,

    #[error("Record store table names must be non-empty and distinct")]
    InvalidTableNames,

    #[error("Invalid record store timeout")]
    InvalidStoreTimeout,

    #[error("Export output directory must not be empty")]
    InvalidOutputDir,
}
