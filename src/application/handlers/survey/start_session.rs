//! StartSessionHandler - Command handler for opening a new survey session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::survey::{SurveyError, SurveySession};
use crate::ports::SurveySessionRepository;

/// Result of starting a session.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session: SurveySession,
}

/// Handler for starting survey sessions.
///
/// Each session gets a fresh respondent identity and start time.
pub struct StartSessionHandler {
    repository: Arc<dyn SurveySessionRepository>,
}

impl StartSessionHandler {
    pub fn new(repository: Arc<dyn SurveySessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<StartSessionResult, SurveyError> {
        let session = SurveySession::new(SessionId::new());
        self.repository.save(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            respondent_id = %session.respondent().id(),
            "Survey session started"
        );

        Ok(StartSessionResult { session })
    }
}
