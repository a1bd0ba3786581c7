//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Email every persisted submission to the configured recipient
    #[serde(default = "default_email_notifications")]
    pub email_notifications: bool,

    /// Include storage diagnostics in error responses (disable in production!)
    #[serde(default)]
    pub verbose_errors: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            email_notifications: default_email_notifications(),
            verbose_errors: false,
        }
    }
}

fn default_email_notifications() -> bool {
    true
}
