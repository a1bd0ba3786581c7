//! Survey-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, ValidationError};

use super::catalog::QuestionKey;

/// Shown when submission is attempted without a profession.
pub const PROFESSION_REQUIRED_MESSAGE: &str =
    "Please select or specify your profession before submitting.";

/// Shown when submission is attempted without the confirmation checkbox.
pub const CONFIRMATION_REQUIRED_MESSAGE: &str =
    "Please confirm that you've answered all questions before submitting.";

/// Shown when responses were saved but the notification could not be sent.
pub const NOTIFICATION_FAILED_WARNING: &str =
    "Responses saved locally, but email failed to send.";

/// Survey-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurveyError {
    /// Session was not found.
    NotFound(SessionId),
    /// Submission attempted without a profession.
    ProfessionRequired,
    /// Submission attempted without explicit confirmation.
    ConfirmationRequired,
    /// Judgment value is not on the scale.
    InvalidJudgment(ValidationError),
    /// Judgment refers to a question that is not in the catalog.
    UnknownQuestion(QuestionKey),
    /// Session has already been submitted.
    AlreadySubmitted,
    /// Invalid state for operation.
    InvalidState(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Response file could not be written.
    PersistenceFailed(String),
    /// Infrastructure error.
    Infrastructure(String),
}

impl SurveyError {
    pub fn not_found(id: SessionId) -> Self {
        SurveyError::NotFound(id)
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        SurveyError::InvalidState(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        SurveyError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn persistence(message: impl Into<String>) -> Self {
        SurveyError::PersistenceFailed(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        SurveyError::Infrastructure(message.into())
    }

    /// True for the errors a respondent fixes by editing their answers.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SurveyError::ProfessionRequired
                | SurveyError::ConfirmationRequired
                | SurveyError::InvalidJudgment(_)
                | SurveyError::UnknownQuestion(_)
                | SurveyError::ValidationFailed { .. }
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SurveyError::NotFound(_) => ErrorCode::SessionNotFound,
            SurveyError::ProfessionRequired => ErrorCode::ProfessionRequired,
            SurveyError::ConfirmationRequired => ErrorCode::ConfirmationRequired,
            SurveyError::InvalidJudgment(_) => ErrorCode::InvalidJudgment,
            SurveyError::UnknownQuestion(_) => ErrorCode::UnknownQuestion,
            SurveyError::AlreadySubmitted => ErrorCode::AlreadySubmitted,
            SurveyError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SurveyError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            SurveyError::PersistenceFailed(_) => ErrorCode::PersistenceFailed,
            SurveyError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }

    /// User-facing message; every cause gets its own wording.
    pub fn message(&self) -> String {
        match self {
            SurveyError::NotFound(id) => format!("Survey session not found: {}", id),
            SurveyError::ProfessionRequired => PROFESSION_REQUIRED_MESSAGE.to_string(),
            SurveyError::ConfirmationRequired => CONFIRMATION_REQUIRED_MESSAGE.to_string(),
            SurveyError::InvalidJudgment(err) => format!("Invalid judgment: {}", err),
            SurveyError::UnknownQuestion(key) => format!("Unknown question: {}", key),
            SurveyError::AlreadySubmitted => {
                "This survey has already been submitted".to_string()
            }
            SurveyError::InvalidState(msg) => format!("Invalid state: {}", msg),
            SurveyError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            SurveyError::PersistenceFailed(msg) => {
                format!("Failed to save your responses. Error: {}", msg)
            }
            SurveyError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SurveyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SurveyError {}

impl From<ValidationError> for SurveyError {
    fn from(err: ValidationError) -> Self {
        SurveyError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for SurveyError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::AlreadySubmitted => SurveyError::AlreadySubmitted,
            ErrorCode::InvalidStateTransition => SurveyError::InvalidState(err.message),
            ErrorCode::ValidationFailed => SurveyError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => SurveyError::Infrastructure(err.to_string()),
        }
    }
}
