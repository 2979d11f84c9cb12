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

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Request timeout of {request_secs}s must exceed transcription plus model timeouts ({needed_secs}s)")]
    RequestTimeoutTooShort { request_secs: u64, needed_secs: u64 },

    #[error("Public base URL must be an http(s) URL")]
    InvalidPublicUrl,

    #[error("Public base URL must use HTTPS in production")]
    PublicUrlMustBeHttps,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("Outbound calls need a voice number when an API key is set")]
    MissingVoiceNumber,

    #[error("Recording length must be between 1 and 3600 seconds")]
    InvalidRecordLength,

    #[error("History window must be at least 1")]
    InvalidHistoryWindow,
}
