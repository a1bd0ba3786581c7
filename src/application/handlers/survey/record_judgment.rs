//! RecordJudgmentHandler - Command handler for answering one question.

use std::sync::Arc;

use crate::domain::foundation::SessionId;
use crate::domain::survey::{Judgment, QuestionCatalog, QuestionKey, SurveyError};
use crate::ports::SurveySessionRepository;

/// Command to record a judgment.
///
/// `value` is the raw number the respondent picked; anything off the scale
/// is rejected rather than clamped.
#[derive(Debug, Clone)]
pub struct RecordJudgmentCommand {
    pub session_id: SessionId,
    pub group: String,
    pub index: u32,
    pub value: i64,
}

/// Result of recording a judgment.
#[derive(Debug, Clone)]
pub struct RecordJudgmentResult {
    pub judgment: Judgment,
    pub answered_count: usize,
    pub total_questions: usize,
}

/// Handler for recording judgments against the loaded catalog.
pub struct RecordJudgmentHandler {
    repository: Arc<dyn SurveySessionRepository>,
    catalog: Arc<QuestionCatalog>,
}

impl RecordJudgmentHandler {
    pub fn new(repository: Arc<dyn SurveySessionRepository>, catalog: Arc<QuestionCatalog>) -> Self {
        Self {
            repository,
            catalog,
        }
    }

    pub async fn handle(&self, cmd: RecordJudgmentCommand) -> Result<RecordJudgmentResult, SurveyError> {
        let mut session = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SurveyError::not_found(cmd.session_id))?;

        let key = QuestionKey::new(cmd.group, cmd.index);
        let judgment = session.record_judgment(&self.catalog, key, cmd.value)?;
        self.repository.save(&session).await?;

        Ok(RecordJudgmentResult {
            judgment,
            answered_count: session.answered_count(),
            total_questions: self.catalog.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::session::InMemorySurveySessionRepository;
    use crate::domain::survey::{Direction, SurveySession};

    async fn setup() -> (RecordJudgmentHandler, Arc<InMemorySurveySessionRepository>, SessionId) {
        let catalog = QuestionCatalog::from_rows(vec![
            ("Gestalt Laws", "Closure vs Continuity"),
            ("Gestalt Laws", "Proximity vs Similarity"),
        ])
        .unwrap();
        let repo = Arc::new(InMemorySurveySessionRepository::new());
        let session = SurveySession::new(SessionId::new());
        repo.save(&session).await.unwrap();
        (
            RecordJudgmentHandler::new(repo.clone(), Arc::new(catalog)),
            repo,
            *session.id(),
        )
    }

    fn cmd(session_id: SessionId, index: u32, value: i64) -> RecordJudgmentCommand {
        RecordJudgmentCommand {
            session_id,
            group: "Gestalt Laws".to_string(),
            index,
            value,
        }
    }

    #[tokio::test]
    async fn records_and_persists_judgment() {
        let (handler, repo, id) = setup().await;

        let result = handler.handle(cmd(id, 1, -6)).await.unwrap();

        assert_eq!(result.judgment.value.value(), -6);
        assert_eq!(result.judgment.value.direction(), Direction::B);
        assert_eq!(result.answered_count, 1);
        assert_eq!(result.total_questions, 2);

        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert!(stored.judgment(&QuestionKey::new("Gestalt Laws", 1)).answered);
    }

    #[tokio::test]
    async fn later_judgment_replaces_earlier() {
        let (handler, repo, id) = setup().await;
        handler.handle(cmd(id, 0, 3)).await.unwrap();
        let result = handler.handle(cmd(id, 0, 9)).await.unwrap();

        assert_eq!(result.answered_count, 1);
        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.judgment(&QuestionKey::new("Gestalt Laws", 0)).value.value(), 9);
    }

    #[tokio::test]
    async fn rejects_off_scale_values() {
        let (handler, repo, id) = setup().await;
        for value in [0, -1, 10, -10, 1000] {
            let err = handler.handle(cmd(id, 0, value)).await.unwrap_err();
            assert!(matches!(err, SurveyError::InvalidJudgment(_)), "value {}", value);
        }
        let stored = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.answered_count(), 0);
    }

    #[tokio::test]
    async fn rejects_unknown_question() {
        let (handler, _repo, id) = setup().await;
        let err = handler.handle(cmd(id, 7, 3)).await.unwrap_err();
        assert!(matches!(err, SurveyError::UnknownQuestion(_)));
    }
}
