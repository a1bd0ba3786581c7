//! GetSurveySessionHandler - Query handler for reading a session.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::survey::{SurveyError, SurveySession};
use crate::ports::SurveySessionRepository;

/// Query to get a session by ID.
#[derive(Debug, Clone)]
pub struct GetSurveySessionQuery {
    pub session_id: SessionId,
}

/// Handler for retrieving session state.
pub struct GetSurveySessionHandler {
    repository: Arc<dyn SurveySessionRepository>,
}

impl GetSurveySessionHandler {
    pub fn new(repository: Arc<dyn SurveySessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetSurveySessionQuery) -> Result<SurveySession, SurveyError> {
        self.repository
            .find_by_id(&query.session_id)
            .await?
            .ok_or_else(|| SurveyError::not_found(query.session_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::session::InMemorySurveySessionRepository;

    #[tokio::test]
    async fn returns_saved_session() {
        let repo = Arc::new(InMemorySurveySessionRepository::new());
        let session = SurveySession::new(SessionId::new());
        repo.save(&session).await.unwrap();

        let handler = GetSurveySessionHandler::new(repo);
        let found = handler
            .handle(GetSurveySessionQuery {
                session_id: *session.id(),
            })
            .await
            .unwrap();

        assert_eq!(found, session);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let handler = GetSurveySessionHandler::new(Arc::new(InMemorySurveySessionRepository::new()));
        let id = SessionId::new();

        let err = handler
            .handle(GetSurveySessionQuery { session_id: id })
            .await
            .unwrap_err();

        assert_eq!(err, SurveyError::NotFound(id));
    }
}
