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

    #[error("Invalid host address")]
    InvalidHost,

    #[error("Invalid timeout")]
    InvalidTimeout,

    #[error("Invalid Resend API key format")]
    InvalidResendKey,

    #[error("Invalid from email address")]
    InvalidFromEmail,

    #[error("Invalid notification recipient address")]
    InvalidRecipient,

    #[error("Email API base URL must be http(s)")]
    InvalidApiUrl,

    #[error("Email timeout of {timeout_secs}s does not cover retries ({required_secs}s needed)")]
    RetryBudgetExceeded { timeout_secs: u64, required_secs: u64 },

    #[error("Request timeout of {request_timeout_secs}s must exceed the email timeout of {email_timeout_secs}s")]
    RequestTimeoutTooShort {
        request_timeout_secs: u64,
        email_timeout_secs: u64,
    },
}
