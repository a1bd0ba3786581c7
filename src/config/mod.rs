//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PAIRWISE_SURVEY_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use pairwise_survey::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Responses are written to {}", config.storage.output_dir.display());
//! ```

mod email;
mod error;
mod features;
mod server;
mod survey;

pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::{Environment, ServerConfig};
pub use survey::{StorageConfig, SurveyConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults; only the Resend credentials and recipient
/// must be supplied, and only while email notifications are enabled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Question bank location
    #[serde(default)]
    pub survey: SurveyConfig,

    /// Response file location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Email configuration (Resend)
    #[serde(default)]
    pub email: EmailConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PAIRWISE_SURVEY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PAIRWISE_SURVEY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PAIRWISE_SURVEY__EMAIL__RESEND_API_KEY=re_...` -> `email.resend_api_key`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PAIRWISE_SURVEY")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.survey.validate()?;
        self.storage.validate()?;
        self.email.validate(self.features.email_notifications)?;

        // The submit request must outlive the notification step, or the
        // response file lands on disk while the session stays collecting.
        if self.features.email_notifications
            && self.server.request_timeout_secs <= self.email.timeout_secs
        {
            return Err(ValidationError::RequestTimeoutTooShort {
                request_timeout_secs: self.server.request_timeout_secs,
                email_timeout_secs: self.email.timeout_secs,
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
