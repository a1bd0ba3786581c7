//! Pairwise Survey server entry point.
//!
//! Wires configuration, the question catalog, storage and notification
//! adapters into the survey HTTP API.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use pairwise_survey::adapters::http::{survey_routes, SurveyHandlers};
use pairwise_survey::adapters::{
    CsvQuestionCatalogSource, CsvResponseStore, DisabledNotifier, InMemorySurveySessionRepository,
    ResendNotifier,
};
use pairwise_survey::application::{
    GetSurveySessionHandler, RecordJudgmentHandler, ResetSessionHandler, SetProfessionHandler,
    StartSessionHandler, SubmitSurveyHandler,
};
use pairwise_survey::config::{AppConfig, ServerConfig};
use pairwise_survey::ports::{QuestionCatalogSource, SubmissionNotifier, SurveySessionRepository};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "Starting pairwise survey server"
    );

    let catalog = Arc::new(
        CsvQuestionCatalogSource::new(&config.survey.catalog_path)
            .load()
            .await?,
    );

    let notifier: Arc<dyn SubmissionNotifier> = if config.features.email_notifications {
        tracing::info!(recipient = %config.email.recipient, "Email notifications enabled");
        Arc::new(ResendNotifier::new(config.email.clone())?)
    } else {
        tracing::warn!("Email notifications disabled");
        Arc::new(DisabledNotifier)
    };

    tracing::info!(output_dir = %config.storage.output_dir.display(), "Response storage ready");
    let store = Arc::new(CsvResponseStore::new(&config.storage.output_dir));
    let repository: Arc<dyn SurveySessionRepository> = Arc::new(InMemorySurveySessionRepository::new());

    let handlers = SurveyHandlers::new(
        catalog.clone(),
        Arc::new(StartSessionHandler::new(repository.clone())),
        Arc::new(GetSurveySessionHandler::new(repository.clone())),
        Arc::new(SetProfessionHandler::new(repository.clone())),
        Arc::new(RecordJudgmentHandler::new(repository.clone(), catalog.clone())),
        Arc::new(SubmitSurveyHandler::new(
            repository.clone(),
            catalog,
            store,
            notifier,
            Duration::from_secs(config.email.timeout_secs),
        )),
        Arc::new(ResetSessionHandler::new(repository)),
    )
    .with_verbose_errors(config.features.verbose_errors);

    let app = Router::new()
        .nest("/api/survey", survey_routes(handlers))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config.server))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        if server.is_production() {
            return CorsLayer::new();
        }
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
