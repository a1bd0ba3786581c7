//! HTTP handlers for survey endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::survey::{
    GetSurveySessionHandler, GetSurveySessionQuery, RecordJudgmentCommand, RecordJudgmentHandler,
    ResetSessionCommand, ResetSessionHandler, SetProfessionCommand, SetProfessionHandler,
    StartSessionHandler, SubmitSurveyCommand, SubmitSurveyHandler,
};
use crate::domain::foundation::SessionId;
use crate::domain::survey::{QuestionCatalog, SurveyError};

use super::dto::{
    ErrorResponse, HealthResponse, QuestionnaireResponse, RecordJudgmentRequest,
    RecordJudgmentResponse, SetProfessionRequest, SubmitSurveyRequest, SubmitSurveyResponse,
    SurveySessionResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SurveyHandlers {
    catalog: Arc<QuestionCatalog>,
    start_handler: Arc<StartSessionHandler>,
    get_handler: Arc<GetSurveySessionHandler>,
    profession_handler: Arc<SetProfessionHandler>,
    judgment_handler: Arc<RecordJudgmentHandler>,
    submit_handler: Arc<SubmitSurveyHandler>,
    reset_handler: Arc<ResetSessionHandler>,
    verbose_errors: bool,
}

impl SurveyHandlers {
    pub fn new(
        catalog: Arc<QuestionCatalog>,
        start_handler: Arc<StartSessionHandler>,
        get_handler: Arc<GetSurveySessionHandler>,
        profession_handler: Arc<SetProfessionHandler>,
        judgment_handler: Arc<RecordJudgmentHandler>,
        submit_handler: Arc<SubmitSurveyHandler>,
        reset_handler: Arc<ResetSessionHandler>,
    ) -> Self {
        Self {
            catalog,
            start_handler,
            get_handler,
            profession_handler,
            judgment_handler,
            submit_handler,
            reset_handler,
            verbose_errors: false,
        }
    }

    /// Expose infrastructure error text in responses.
    pub fn with_verbose_errors(mut self, verbose: bool) -> Self {
        self.verbose_errors = verbose;
        self
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/survey/health - Liveness probe
pub async fn health(State(handlers): State<SurveyHandlers>) -> Response {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        questions: handlers.catalog.len(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /api/survey/questions - Catalog, scale and suggested professions
pub async fn get_questions(State(handlers): State<SurveyHandlers>) -> Response {
    let response = QuestionnaireResponse::from(handlers.catalog.as_ref());
    (StatusCode::OK, Json(response)).into_response()
}

/// POST /api/survey/sessions - Start a new session
pub async fn start_session(State(handlers): State<SurveyHandlers>) -> Response {
    match handlers.start_handler.handle().await {
        Ok(result) => {
            let response = SurveySessionResponse::from_session(&result.session, &handlers.catalog);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_survey_error(e, handlers.verbose_errors),
    }
}

/// GET /api/survey/sessions/:id - Current session state
pub async fn get_session(
    State(handlers): State<SurveyHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .get_handler
        .handle(GetSurveySessionQuery { session_id })
        .await
    {
        Ok(session) => {
            let response = SurveySessionResponse::from_session(&session, &handlers.catalog);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_survey_error(e, handlers.verbose_errors),
    }
}

/// PUT /api/survey/sessions/:id/profession - Set or clear the profession
pub async fn set_profession(
    State(handlers): State<SurveyHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<SetProfessionRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = SetProfessionCommand {
        session_id,
        profession: req.profession,
    };

    match handlers.profession_handler.handle(cmd).await {
        Ok(session) => {
            let response = SurveySessionResponse::from_session(&session, &handlers.catalog);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_survey_error(e, handlers.verbose_errors),
    }
}

/// PUT /api/survey/sessions/:id/judgments - Record one judgment
pub async fn record_judgment(
    State(handlers): State<SurveyHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<RecordJudgmentRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = RecordJudgmentCommand {
        session_id,
        group: req.group,
        index: req.index,
        value: req.value,
    };

    match handlers.judgment_handler.handle(cmd).await {
        Ok(result) => {
            let response: RecordJudgmentResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_survey_error(e, handlers.verbose_errors),
    }
}

/// POST /api/survey/sessions/:id/submit - Compile, persist and notify
pub async fn submit_survey(
    State(handlers): State<SurveyHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<SubmitSurveyRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = SubmitSurveyCommand {
        session_id,
        confirmed: req.confirmed,
    };

    match handlers.submit_handler.handle(cmd).await {
        Ok(result) => {
            let response: SubmitSurveyResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_survey_error(e, handlers.verbose_errors),
    }
}

/// POST /api/survey/sessions/:id/reset - Start over after submitting
pub async fn reset_session(
    State(handlers): State<SurveyHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .reset_handler
        .handle(ResetSessionCommand { session_id })
        .await
    {
        Ok(session) => {
            let response = SurveySessionResponse::from_session(&session, &handlers.catalog);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_survey_error(e, handlers.verbose_errors),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

fn handle_survey_error(error: SurveyError, verbose: bool) -> Response {
    let status = match &error {
        SurveyError::NotFound(_) => StatusCode::NOT_FOUND,
        SurveyError::AlreadySubmitted | SurveyError::InvalidState(_) => StatusCode::CONFLICT,
        SurveyError::PersistenceFailed(_) | SurveyError::Infrastructure(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        SurveyError::ProfessionRequired
        | SurveyError::ConfirmationRequired
        | SurveyError::InvalidJudgment(_)
        | SurveyError::UnknownQuestion(_)
        | SurveyError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
    };

    if let SurveyError::Infrastructure(msg) = &error {
        tracing::error!(error = %msg, "Survey request failed");
        if !verbose {
            return (status, Json(ErrorResponse::internal("Internal server error"))).into_response();
        }
    }

    (status, Json(ErrorResponse::from_survey_error(&error))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::survey::QuestionKey;

    #[test]
    fn validation_errors_map_to_bad_request() {
        for error in [
            SurveyError::ProfessionRequired,
            SurveyError::ConfirmationRequired,
            SurveyError::UnknownQuestion(QuestionKey::new("G", 9)),
        ] {
            assert_eq!(handle_survey_error(error, false).status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn state_errors_map_to_conflict() {
        assert_eq!(
            handle_survey_error(SurveyError::AlreadySubmitted, false).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            handle_survey_error(SurveyError::invalid_state("x"), false).status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn not_found_and_persistence_statuses() {
        assert_eq!(
            handle_survey_error(SurveyError::not_found(SessionId::new()), false).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            handle_survey_error(SurveyError::persistence("disk full"), false).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn invalid_session_id_is_bad_request() {
        let response = parse_session_id("not-a-uuid").unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
