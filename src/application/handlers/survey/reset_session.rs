//! ResetSessionHandler - Command handler for "Start Over" after submission.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::survey::{SurveyError, SurveySession};
use crate::ports::SurveySessionRepository;

/// Command to reset a submitted session.
#[derive(Debug, Clone)]
pub struct ResetSessionCommand {
    pub session_id: SessionId,
}

/// Handler for resetting sessions.
///
/// The session id is kept; the respondent identity, start time, profession
/// and judgments are all replaced.
pub struct ResetSessionHandler {
    repository: Arc<dyn SurveySessionRepository>,
}

impl ResetSessionHandler {
    pub fn new(repository: Arc<dyn SurveySessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: ResetSessionCommand) -> Result<SurveySession, SurveyError> {
        let mut session = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SurveyError::not_found(cmd.session_id))?;

        let previous = session.respondent().id().clone();
        session.reset()?;
        self.repository.save(&session).await?;

        tracing::info!(
            session_id = %cmd.session_id,
            previous_respondent = %previous,
            respondent_id = %session.respondent().id(),
            "Survey session reset"
        );

        Ok(session)
    }
}
