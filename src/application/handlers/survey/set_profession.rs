//! SetProfessionHandler - Command handler for the respondent's profession.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::survey::{SurveyError, SurveySession};
use crate::ports::SurveySessionRepository;

/// Command to set or clear the profession.
///
/// A blank profession clears it; submission then fails until it is set again.
#[derive(Debug, Clone)]
pub struct SetProfessionCommand {
    pub session_id: SessionId,
    pub profession: String,
}

/// Handler for setting the profession.
pub struct SetProfessionHandler {
    repository: Arc<dyn SurveySessionRepository>,
}

impl SetProfessionHandler {
    pub fn new(repository: Arc<dyn SurveySessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: SetProfessionCommand) -> Result<SurveySession, SurveyError> {
        let mut session = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SurveyError::not_found(cmd.session_id))?;

        session.set_profession(&cmd.profession)?;
        self.repository.save(&session).await?;

        Ok(session)
    }
}
