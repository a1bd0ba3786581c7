//! Email configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Email configuration (Resend)
///
/// Credentials come only from the environment; nothing here has a literal
/// secret default.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Resend API key
    #[serde(default)]
    pub resend_api_key: Option<Secret<String>>,

    /// Resend API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Address that receives every submission
    #[serde(default)]
    pub recipient: String,

    /// Upper bound for the whole notification step, retries included
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Upper bound for a single request to the email API
    #[serde(default = "default_attempt_timeout_secs")]
    pub attempt_timeout_secs: u64,

    /// Retries after a transient failure
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Exposes the API key, empty when unset.
    pub fn api_key(&self) -> &str {
        self.resend_api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .unwrap_or("")
    }

    /// Worst-case duration of every attempt plus the backoff between them.
    ///
    /// `timeout_secs` must exceed this, or the last retries never run.
    pub fn retry_budget_secs(&self) -> u64 {
        let attempts = u64::from(self.max_retries) + 1;
        let backoff = 1u64
            .checked_shl(self.max_retries)
            .map_or(u64::MAX, |total| total - 1);
        self.attempt_timeout_secs
            .saturating_mul(attempts)
            .saturating_add(backoff)
    }

    /// Validate email configuration
    ///
    /// Credentials and recipient are only required when notifications are enabled.
    pub fn validate(&self, notifications_enabled: bool) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.attempt_timeout_secs == 0 || self.attempt_timeout_secs > self.timeout_secs {
            return Err(ValidationError::InvalidTimeout);
        }
        if !notifications_enabled {
            return Ok(());
        }
        if self.timeout_secs <= self.retry_budget_secs() {
            return Err(ValidationError::RetryBudgetExceeded {
                timeout_secs: self.timeout_secs,
                required_secs: self.retry_budget_secs(),
            });
        }
        if self.api_key().is_empty() {
            return Err(ValidationError::MissingRequired("RESEND_API_KEY"));
        }
        if !self.api_key().starts_with("re_") {
            return Err(ValidationError::InvalidResendKey);
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        if !self.recipient.contains('@') {
            return Err(ValidationError::InvalidRecipient);
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(ValidationError::InvalidApiUrl);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            resend_api_key: None,
            api_base_url: default_api_base_url(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            recipient: String::new(),
            timeout_secs: default_timeout_secs(),
            attempt_timeout_secs: default_attempt_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.resend.com".to_string()
}

fn default_from_email() -> String {
    "survey@example.org".to_string()
}

fn default_from_name() -> String {
    "Expert Survey".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_attempt_timeout_secs() -> u64 {
    3
}

fn default_max_retries() -> u32 {
    2
}
