//! HTTP routes for survey endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    get_questions, get_session, health, record_judgment, reset_session, set_profession,
    start_session, submit_survey, SurveyHandlers,
};

/// Creates the survey router with all endpoints.
pub fn survey_routes(handlers: SurveyHandlers) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/questions", get(get_questions))
        .route("/sessions", post(start_session))
        .route("/sessions/:id", get(get_session))
        .route("/sessions/:id/profession", put(set_profession))
        .route("/sessions/:id/judgments", put(record_judgment))
        .route("/sessions/:id/submit", post(submit_survey))
        .route("/sessions/:id/reset", post(reset_session))
        .with_state(handlers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::notification::DisabledNotifier;
    use crate::adapters::session::InMemorySurveySessionRepository;
    use crate::adapters::storage::CsvResponseStore;
    use crate::application::handlers::survey::{
        GetSurveySessionHandler, RecordJudgmentHandler, ResetSessionHandler, SetProfessionHandler,
        StartSessionHandler, SubmitSurveyHandler,
    };
    use crate::domain::survey::QuestionCatalog;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use std::path::Path;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn router(output_dir: &Path) -> Router {
        let catalog = Arc::new(
            QuestionCatalog::from_rows(vec![
                ("Gestalt Laws", "Closure vs Continuity"),
                ("Wickens", "Legibility vs Redundancy"),
            ])
            .unwrap(),
        );
        let repo = Arc::new(InMemorySurveySessionRepository::new());
        let handlers = SurveyHandlers::new(
            catalog.clone(),
            Arc::new(StartSessionHandler::new(repo.clone())),
            Arc::new(GetSurveySessionHandler::new(repo.clone())),
            Arc::new(SetProfessionHandler::new(repo.clone())),
            Arc::new(RecordJudgmentHandler::new(repo.clone(), catalog.clone())),
            Arc::new(SubmitSurveyHandler::new(
                repo.clone(),
                catalog,
                Arc::new(CsvResponseStore::new(output_dir)),
                Arc::new(DisabledNotifier),
                Duration::from_secs(1),
            )),
            Arc::new(ResetSessionHandler::new(repo)),
        );
        survey_routes(handlers)
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header("content-type", "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_reports_question_count() {
        let dir = TempDir::new().unwrap();
        let app = router(dir.path());
        let (status, body) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["questions"], 2);
    }

    #[tokio::test]
    async fn questions_endpoint_lists_groups() {
        let dir = TempDir::new().unwrap();
        let app = router(dir.path());
        let (status, body) = call(&app, Method::GET, "/questions", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["groups"][0]["name"], "Gestalt Laws");
        assert_eq!(body["groups"][1]["questions"][0]["text"], "Legibility vs Redundancy");
    }

    #[tokio::test]
    async fn full_survey_flow() {
        let dir = TempDir::new().unwrap();
        let app = router(dir.path());

        let (status, session) = call(&app, Method::POST, "/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = session["id"].as_str().unwrap().to_string();

        let (status, _) = call(
            &app,
            Method::PUT,
            &format!("/sessions/{}/judgments", id),
            Some(json!({ "group": "Gestalt Laws", "index": 0, "value": 5 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/sessions/{}/submit", id),
            Some(json!({ "confirmed": true })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "PROFESSION_REQUIRED");

        let (status, _) = call(
            &app,
            Method::PUT,
            &format!("/sessions/{}/profession", id),
            Some(json!({ "profession": "Pilot" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = call(
            &app,
            Method::POST,
            &format!("/sessions/{}/submit", id),
            Some(json!({ "confirmed": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["notification"], "skipped");
        assert_eq!(body["record_count"], 3);
        let file_name = body["file_name"].as_str().unwrap();
        assert!(dir.path().join(file_name).exists());

        let (status, body) = call(
            &app,
            Method::PUT,
            &format!("/sessions/{}/judgments", id),
            Some(json!({ "group": "Wickens", "index": 0, "value": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "ALREADY_SUBMITTED");

        let (status, body) = call(&app, Method::POST, &format!("/sessions/{}/reset", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "collecting");
        assert_eq!(body["answered_count"], 0);
    }

    #[tokio::test]
    async fn off_scale_value_is_rejected() {
        let dir = TempDir::new().unwrap();
        let app = router(dir.path());
        let (_, session) = call(&app, Method::POST, "/sessions", None).await;
        let id = session["id"].as_str().unwrap();

        let (status, body) = call(
            &app,
            Method::PUT,
            &format!("/sessions/{}/judgments", id),
            Some(json!({ "group": "Wickens", "index": 0, "value": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_JUDGMENT");
    }

    #[tokio::test]
    async fn bare_other_profession_is_rejected() {
        let dir = TempDir::new().unwrap();
        let app = router(dir.path());
        let (_, session) = call(&app, Method::POST, "/sessions", None).await;
        let id = session["id"].as_str().unwrap();

        let (status, body) = call(
            &app,
            Method::PUT,
            &format!("/sessions/{}/profession", id),
            Some(json!({ "profession": "Other" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_FAILED");
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let dir = TempDir::new().unwrap();
        let app = router(dir.path());
        let uri = format!("/sessions/{}", uuid::Uuid::new_v4());
        let (status, body) = call(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "SESSION_NOT_FOUND");
    }
}
