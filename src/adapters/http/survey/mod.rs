//! HTTP adapter for survey endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ErrorResponse, HealthResponse, JudgmentResponse, QuestionnaireResponse, RecordJudgmentRequest,
    RecordJudgmentResponse, SetProfessionRequest, SubmitSurveyRequest, SubmitSurveyResponse,
    SurveySessionResponse,
};
pub use handlers::SurveyHandlers;
pub use routes::survey_routes;
