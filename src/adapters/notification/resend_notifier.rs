//! Resend email notifier.
//!
//! Sends every persisted bundle as a CSV attachment to a single research
//! inbox through the Resend HTTP API (`POST /emails`).

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::EmailConfig;
use crate::ports::{NotificationError, NotificationReceipt, PersistedBundle, SubmissionNotifier};

/// Email notifier backed by Resend.
pub struct ResendNotifier {
    config: EmailConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ResendEmail {
    from: String,
    to: Vec<String>,
    subject: String,
    text: String,
    attachments: Vec<ResendAttachment>,
}

#[derive(Debug, Serialize)]
struct ResendAttachment {
    filename: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: Option<String>,
}

impl ResendNotifier {
    /// Creates a notifier from email configuration.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::Network` if the HTTP client cannot be built.
    pub fn new(config: EmailConfig) -> Result<Self, NotificationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.attempt_timeout_secs))
            .build()
            .map_err(|e| NotificationError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.config.api_base_url.trim_end_matches('/'))
    }

    fn subject(file_name: &str) -> String {
        format!("New Survey Response: {}", file_name)
    }

    fn body(file_name: &str) -> String {
        format!("A new response has been submitted. See attached: {}", file_name)
    }

    async fn build_email(&self, bundle: &PersistedBundle) -> Result<ResendEmail, NotificationError> {
        let content = tokio::fs::read(bundle.path.as_path())
            .await
            .map_err(|e| NotificationError::Attachment {
                path: bundle.path.to_string(),
                message: e.to_string(),
            })?;

        Ok(ResendEmail {
            from: self.config.from_header(),
            to: vec![self.config.recipient.clone()],
            subject: Self::subject(&bundle.file_name),
            text: Self::body(&bundle.file_name),
            attachments: vec![ResendAttachment {
                filename: bundle.file_name.clone(),
                content: BASE64.encode(content),
            }],
        })
    }

    async fn send(&self, email: &ResendEmail) -> Result<Response, NotificationError> {
        self.client
            .post(self.emails_url())
            .bearer_auth(self.config.api_key())
            .header("Content-Type", "application/json")
            .json(email)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NotificationError::Timeout {
                        timeout_secs: self.config.attempt_timeout_secs,
                    }
                } else if e.is_connect() {
                    NotificationError::network(format!("Connection failed: {}", e))
                } else {
                    NotificationError::network(e.to_string())
                }
            })
    }

    async fn handle_response(&self, response: Response) -> Result<NotificationReceipt, NotificationError> {
        let status = response.status();

        if status.is_success() {
            let message_id = response
                .json::<ResendResponse>()
                .await
                .ok()
                .and_then(|r| r.id);
            return Ok(NotificationReceipt::Delivered { message_id });
        }

        let error_body = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(NotificationError::Unauthorized(error_body)),
            code => Err(NotificationError::Rejected {
                status: code,
                message: error_body,
            }),
        }
    }

    async fn attempt(&self, email: &ResendEmail) -> Result<NotificationReceipt, NotificationError> {
        let response = self.send(email).await?;
        self.handle_response(response).await
    }
}

#[async_trait]
impl SubmissionNotifier for ResendNotifier {
    async fn notify(&self, bundle: &PersistedBundle) -> Result<NotificationReceipt, NotificationError> {
        let email = self.build_email(bundle).await?;

        let mut last_error = NotificationError::network("No attempts made");
        let mut retry_count = 0;

        while retry_count <= self.config.max_retries {
            match self.attempt(&email).await {
                Ok(receipt) => {
                    tracing::info!(file = %bundle.file_name, "Submission email sent");
                    return Ok(receipt);
                }
                Err(err) => {
                    if !err.is_transient() || retry_count >= self.config.max_retries {
                        return Err(err);
                    }
                    tracing::warn!(
                        file = %bundle.file_name,
                        attempt = retry_count + 1,
                        error = %err,
                        "Submission email failed, retrying"
                    );
                    last_error = err;
                }
            }

            // Exponential backoff: 1s, 2s, 4s, ...
            let delay = Duration::from_secs(1 << retry_count);
            sleep(delay).await;
            retry_count += 1;
        }

        Err(last_error)
    }
}

/// Notifier used when email notifications are switched off.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledNotifier;

#[async_trait]
impl SubmissionNotifier for DisabledNotifier {
    async fn notify(&self, bundle: &PersistedBundle) -> Result<NotificationReceipt, NotificationError> {
        tracing::debug!(file = %bundle.file_name, "Email notifications disabled, skipping");
        Ok(NotificationReceipt::Skipped)
    }
}
