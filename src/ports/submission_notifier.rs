//! Submission Notifier Port - best-effort delivery of persisted bundles.
//!
//! Runs only after a bundle was persisted. A failure here never undoes the
//! submission; the caller downgrades it to a warning.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use super::response_store::PersistedBundle;

/// Port for announcing a new submission to an external recipient.
#[async_trait]
pub trait SubmissionNotifier: Send + Sync {
    /// Deliver the persisted bundle (as an attachment) to the configured recipient.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` on transport, auth or network failure.
    async fn notify(&self, bundle: &PersistedBundle) -> Result<NotificationReceipt, NotificationError>;
}

/// Acknowledgement returned by a notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationReceipt {
    /// The transport accepted the message.
    Delivered { message_id: Option<String> },
    /// Notifications are switched off; nothing was sent.
    Skipped,
}

/// How the notification step ended, as reported to the respondent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Sent,
    Skipped,
    Failed,
}

impl From<&NotificationReceipt> for NotificationStatus {
    fn from(receipt: &NotificationReceipt) -> Self {
        match receipt {
            NotificationReceipt::Delivered { .. } => NotificationStatus::Sent,
            NotificationReceipt::Skipped => NotificationStatus::Skipped,
        }
    }
}

/// Errors that can occur while sending a notification.
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    /// The attachment could not be read.
    #[error("Failed to read attachment {path}: {message}")]
    Attachment { path: String, message: String },

    /// Could not reach the transport.
    #[error("Network error: {0}")]
    Network(String),

    /// Credentials were rejected.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// The transport answered with an error.
    #[error("Transport rejected message ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The notification did not finish in time.
    #[error("Notification timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },
}

impl NotificationError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Whether retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            NotificationError::Network(_) | NotificationError::Timeout { .. } => true,
            NotificationError::Rejected { status, .. } => *status == 429 || *status >= 500,
            NotificationError::Attachment { .. } | NotificationError::Unauthorized(_) => false,
        }
    }
}
