//! HTTP DTOs for survey endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::survey::{RecordJudgmentResult, SubmitSurveyResult};
use crate::domain::foundation::SurveyStatus;
use crate::domain::survey::{
    scale_options, Direction, QuestionCatalog, ScaleOption, SurveyError, SurveySession,
    SUGGESTED_PROFESSIONS,
};
use crate::ports::NotificationStatus;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to set the profession. Blank clears it.
#[derive(Debug, Clone, Deserialize)]
pub struct SetProfessionRequest {
    pub profession: String,
}

/// Request to record one judgment.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordJudgmentRequest {
    pub group: String,
    pub index: u32,
    pub value: i64,
}

/// Request to submit the survey.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitSurveyRequest {
    #[serde(default)]
    pub confirmed: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One question as shown to the respondent.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub index: u32,
    pub text: String,
}

/// A titled section of questions.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionGroupResponse {
    pub name: String,
    pub questions: Vec<QuestionResponse>,
}

/// Everything the front end needs to render the form.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionnaireResponse {
    pub groups: Vec<QuestionGroupResponse>,
    pub total_questions: usize,
    pub scale: Vec<ScaleOption>,
    pub suggested_professions: Vec<String>,
}

impl From<&QuestionCatalog> for QuestionnaireResponse {
    fn from(catalog: &QuestionCatalog) -> Self {
        Self {
            groups: catalog
                .groups()
                .iter()
                .map(|g| QuestionGroupResponse {
                    name: g.name.clone(),
                    questions: g
                        .questions
                        .iter()
                        .map(|q| QuestionResponse {
                            index: q.index(),
                            text: q.text.clone(),
                        })
                        .collect(),
                })
                .collect(),
            total_questions: catalog.len(),
            scale: scale_options(),
            suggested_professions: SUGGESTED_PROFESSIONS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Current rating for one question.
#[derive(Debug, Clone, Serialize)]
pub struct JudgmentResponse {
    pub group: String,
    pub index: u32,
    pub value: i8,
    pub answer: String,
    pub direction: Direction,
    pub answered: bool,
}

/// Full session state.
#[derive(Debug, Clone, Serialize)]
pub struct SurveySessionResponse {
    pub id: String,
    pub respondent_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profession: Option<String>,
    pub status: SurveyStatus,
    pub session_start: String,
    pub updated_at: String,
    pub answered_count: usize,
    pub total_questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_file: Option<String>,
    pub judgments: Vec<JudgmentResponse>,
}

impl SurveySessionResponse {
    /// Renders a session with one judgment per catalog question, in catalog order.
    pub fn from_session(session: &SurveySession, catalog: &QuestionCatalog) -> Self {
        let judgments = catalog
            .questions()
            .map(|q| {
                let judgment = session.judgment(&q.key);
                JudgmentResponse {
                    group: q.key.group.clone(),
                    index: q.key.index,
                    value: judgment.value.value(),
                    answer: judgment.value.answer_label(),
                    direction: judgment.value.direction(),
                    answered: judgment.answered,
                }
            })
            .collect();

        Self {
            id: session.id().to_string(),
            respondent_id: session.respondent().id().to_string(),
            profession: session.respondent().profession().map(str::to_string),
            status: session.status(),
            session_start: session.respondent().session_start().as_datetime().to_rfc3339(),
            updated_at: session.updated_at().as_datetime().to_rfc3339(),
            answered_count: session.answered_count(),
            total_questions: catalog.len(),
            submitted_file: session.submitted_file().map(str::to_string),
            judgments,
        }
    }
}

/// Response after recording a judgment.
#[derive(Debug, Clone, Serialize)]
pub struct RecordJudgmentResponse {
    pub group: String,
    pub index: u32,
    pub value: i8,
    pub answer: String,
    pub direction: Direction,
    pub meaning: String,
    pub answered_count: usize,
    pub total_questions: usize,
}

impl From<RecordJudgmentResult> for RecordJudgmentResponse {
    fn from(result: RecordJudgmentResult) -> Self {
        let value = result.judgment.value;
        Self {
            group: result.judgment.key.group,
            index: result.judgment.key.index,
            value: value.value(),
            answer: value.answer_label(),
            direction: value.direction(),
            meaning: value.meaning().to_string(),
            answered_count: result.answered_count,
            total_questions: result.total_questions,
        }
    }
}

/// Response after a successful submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitSurveyResponse {
    pub session_id: String,
    pub respondent_id: String,
    pub file_name: String,
    pub path: String,
    pub record_count: usize,
    pub checksum: String,
    pub notification: NotificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub message: String,
}

impl From<SubmitSurveyResult> for SubmitSurveyResponse {
    fn from(result: SubmitSurveyResult) -> Self {
        Self {
            session_id: result.session.id().to_string(),
            respondent_id: result.session.respondent().id().to_string(),
            message: format!("Thank you! Responses saved to {}", result.persisted.path),
            file_name: result.persisted.file_name,
            path: result.persisted.path.to_string(),
            record_count: result.persisted.record_count,
            checksum: result.persisted.checksum,
            notification: result.notification,
            warning: result.warning,
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub questions: usize,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }

    /// Builds a response from a survey error, keeping its own code and wording.
    pub fn from_survey_error(error: &SurveyError) -> Self {
        let details = match error {
            SurveyError::InvalidJudgment(e) => Some(serde_json::json!({ "field": e.field() })),
            SurveyError::ValidationFailed { field, .. } => {
                Some(serde_json::json!({ "field": field }))
            }
            SurveyError::UnknownQuestion(key) => Some(serde_json::json!({
                "group": key.group,
                "index": key.index,
            })),
            _ => None,
        };
        Self {
            code: error.code().to_string(),
            message: error.message(),
            details,
        }
    }
}
