//! SubmitSurveyHandler - Command handler for finishing a survey.
//!
//! Order matters:
//!
//! 1. Check profession and confirmation (nothing is compiled before this)
//! 2. Compile the bundle against the catalog
//! 3. Persist it; on failure the session stays open so the respondent can retry
//! 4. Notify, bounded by a timeout; failure only adds a warning
//! 5. Freeze the session as submitted

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::survey::{
    QuestionCatalog, ResponseCompiler, SurveyError, SurveySession, NOTIFICATION_FAILED_WARNING,
};
use crate::ports::{
    NotificationStatus, PersistedBundle, ResponseStore, SubmissionNotifier, SurveySessionRepository,
};

/// Command to submit a session.
#[derive(Debug, Clone)]
pub struct SubmitSurveyCommand {
    pub session_id: SessionId,
    /// The respondent ticked "I have answered all questions".
    pub confirmed: bool,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitSurveyResult {
    pub session: SurveySession,
    pub persisted: PersistedBundle,
    pub notification: NotificationStatus,
    /// Set when the bundle was saved but the notification failed.
    pub warning: Option<String>,
}

/// Handler for submitting surveys.
pub struct SubmitSurveyHandler {
    repository: Arc<dyn SurveySessionRepository>,
    catalog: Arc<QuestionCatalog>,
    store: Arc<dyn ResponseStore>,
    notifier: Arc<dyn SubmissionNotifier>,
    notification_timeout: Duration,
}

impl SubmitSurveyHandler {
    pub fn new(
        repository: Arc<dyn SurveySessionRepository>,
        catalog: Arc<QuestionCatalog>,
        store: Arc<dyn ResponseStore>,
        notifier: Arc<dyn SubmissionNotifier>,
        notification_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            catalog,
            store,
            notifier,
            notification_timeout,
        }
    }

    pub async fn handle(&self, cmd: SubmitSurveyCommand) -> Result<SubmitSurveyResult, SurveyError> {
        // 1. Load and check preconditions
        let mut session = self
            .repository
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| SurveyError::not_found(cmd.session_id))?;

        session.ensure_submittable(cmd.confirmed)?;

        // 2. Compile
        let bundle = ResponseCompiler::compile_session(&session, &self.catalog, Timestamp::now());

        // 3. Persist
        let persisted = self.store.persist(&bundle).await.map_err(|e| {
            tracing::error!(
                session_id = %cmd.session_id,
                file = %bundle.file_name(),
                error = %e,
                "Failed to persist submission"
            );
            SurveyError::persistence(e.to_string())
        })?;

        tracing::info!(
            session_id = %cmd.session_id,
            respondent_id = %bundle.respondent_id(),
            file = %persisted.file_name,
            records = persisted.record_count,
            unanswered = bundle.unanswered_count(),
            checksum = %persisted.checksum,
            "Submission persisted"
        );

        // 4. Notify
        let (notification, warning) = self.notify(&persisted).await;

        // 5. Freeze
        session.mark_submitted(persisted.file_name.clone())?;
        self.repository.save(&session).await?;

        Ok(SubmitSurveyResult {
            session,
            persisted,
            notification,
            warning,
        })
    }

    async fn notify(&self, persisted: &PersistedBundle) -> (NotificationStatus, Option<String>) {
        let outcome = tokio::time::timeout(self.notification_timeout, self.notifier.notify(persisted)).await;

        match outcome {
            Ok(Ok(receipt)) => (NotificationStatus::from(&receipt), None),
            Ok(Err(err)) => {
                tracing::warn!(file = %persisted.file_name, error = %err, "Submission notification failed");
                (
                    NotificationStatus::Failed,
                    Some(NOTIFICATION_FAILED_WARNING.to_string()),
                )
            }
            Err(_) => {
                tracing::warn!(
                    file = %persisted.file_name,
                    timeout_secs = self.notification_timeout.as_secs(),
                    "Submission notification timed out"
                );
                (
                    NotificationStatus::Failed,
                    Some(NOTIFICATION_FAILED_WARNING.to_string()),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::session::InMemorySurveySessionRepository;
    use crate::domain::foundation::SurveyStatus;
    use crate::domain::survey::{QuestionKey, SubmissionBundle};
    use crate::ports::{FilePath, NotificationError, NotificationReceipt, StorageError};
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════
    // Mocks
    // ════════════════════════════════════════════════════════════════════════

    struct MockStore {
        persisted: Mutex<Vec<SubmissionBundle>>,
        fail: bool,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                persisted: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                persisted: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn count(&self) -> usize {
            self.persisted.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ResponseStore for MockStore {
        async fn persist(&self, bundle: &SubmissionBundle) -> Result<PersistedBundle, StorageError> {
            if self.fail {
                return Err(StorageError::permission_denied("/readonly/responses"));
            }
            self.persisted.lock().unwrap().push(bundle.clone());
            Ok(PersistedBundle {
                path: FilePath::new(format!("/responses/{}", bundle.file_name())),
                file_name: bundle.file_name(),
                checksum: "0".repeat(64),
                size_bytes: 1,
                record_count: bundle.len(),
            })
        }

        async fn load(&self, path: &FilePath) -> Result<SubmissionBundle, StorageError> {
            Err(StorageError::not_found(path.to_string()))
        }
    }

    enum NotifierBehavior {
        Deliver,
        Fail,
        Hang,
    }

    struct MockNotifier {
        behavior: NotifierBehavior,
        calls: Mutex<Vec<String>>,
    }

    impl MockNotifier {
        fn new(behavior: NotifierBehavior) -> Self {
            Self {
                behavior,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SubmissionNotifier for MockNotifier {
        async fn notify(&self, bundle: &PersistedBundle) -> Result<NotificationReceipt, NotificationError> {
            self.calls.lock().unwrap().push(bundle.file_name.clone());
            match self.behavior {
                NotifierBehavior::Deliver => Ok(NotificationReceipt::Delivered {
                    message_id: Some("msg_1".to_string()),
                }),
                NotifierBehavior::Fail => Err(NotificationError::Unauthorized("bad key".to_string())),
                NotifierBehavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(NotificationReceipt::Skipped)
                }
            }
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Helpers
    // ════════════════════════════════════════════════════════════════════════

    fn catalog() -> Arc<QuestionCatalog> {
        Arc::new(
            QuestionCatalog::from_rows(vec![
                ("G1", "Closure vs Continuity"),
                ("G1", "Proximity vs Similarity"),
            ])
            .unwrap(),
        )
    }

    struct Fixture {
        handler: SubmitSurveyHandler,
        repo: Arc<InMemorySurveySessionRepository>,
        store: Arc<MockStore>,
        notifier: Arc<MockNotifier>,
    }

    fn fixture(store: MockStore, notifier: MockNotifier) -> Fixture {
        let repo = Arc::new(InMemorySurveySessionRepository::new());
        let store = Arc::new(store);
        let notifier = Arc::new(notifier);
        let handler = SubmitSurveyHandler::new(
            repo.clone(),
            catalog(),
            store.clone(),
            notifier.clone(),
            Duration::from_millis(200),
        );
        Fixture {
            handler,
            repo,
            store,
            notifier,
        }
    }

    async fn seed(repo: &InMemorySurveySessionRepository, profession: Option<&str>) -> SessionId {
        let mut session = SurveySession::new(SessionId::new());
        if let Some(p) = profession {
            session.set_profession(p).unwrap();
        }
        session
            .record_judgment(&catalog(), QuestionKey::new("G1", 0), 5)
            .unwrap();
        repo.save(&session).await.unwrap();
        *session.id()
    }

    fn submit(session_id: SessionId, confirmed: bool) -> SubmitSurveyCommand {
        SubmitSurveyCommand {
            session_id,
            confirmed,
        }
    }

    // ════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn submits_persists_and_notifies() {
        let f = fixture(MockStore::new(), MockNotifier::new(NotifierBehavior::Deliver));
        let id = seed(&f.repo, Some("Pilot")).await;

        let result = f.handler.handle(submit(id, true)).await.unwrap();

        assert_eq!(result.notification, NotificationStatus::Sent);
        assert!(result.warning.is_none());
        assert_eq!(result.persisted.record_count, 3);
        assert_eq!(result.session.status(), SurveyStatus::Submitted);
        assert_eq!(result.session.submitted_file(), Some(result.persisted.file_name.as_str()));
        assert_eq!(f.notifier.calls(), vec![result.persisted.file_name.clone()]);

        let stored = f.repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.status(), SurveyStatus::Submitted);
    }

    #[tokio::test]
    async fn missing_profession_blocks_before_compiling() {
        let f = fixture(MockStore::new(), MockNotifier::new(NotifierBehavior::Deliver));
        let id = seed(&f.repo, None).await;

        let err = f.handler.handle(submit(id, true)).await.unwrap_err();

        assert_eq!(err, SurveyError::ProfessionRequired);
        assert_eq!(f.store.count(), 0);
        assert!(f.notifier.calls().is_empty());
    }

    #[tokio::test]
    async fn profession_is_checked_before_confirmation() {
        let f = fixture(MockStore::new(), MockNotifier::new(NotifierBehavior::Deliver));
        let id = seed(&f.repo, None).await;

        let err = f.handler.handle(submit(id, false)).await.unwrap_err();
        assert_eq!(err, SurveyError::ProfessionRequired);
    }

    #[tokio::test]
    async fn missing_confirmation_blocks() {
        let f = fixture(MockStore::new(), MockNotifier::new(NotifierBehavior::Deliver));
        let id = seed(&f.repo, Some("Pilot")).await;

        let err = f.handler.handle(submit(id, false)).await.unwrap_err();

        assert_eq!(err, SurveyError::ConfirmationRequired);
        assert_eq!(f.store.count(), 0);
    }

    #[tokio::test]
    async fn persistence_failure_keeps_session_open_and_skips_notification() {
        let f = fixture(MockStore::failing(), MockNotifier::new(NotifierBehavior::Deliver));
        let id = seed(&f.repo, Some("Pilot")).await;

        let err = f.handler.handle(submit(id, true)).await.unwrap_err();

        assert!(matches!(err, SurveyError::PersistenceFailed(_)));
        assert!(err.message().starts_with("Failed to save your responses. Error: "));
        assert!(f.notifier.calls().is_empty());

        let stored = f.repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(stored.status(), SurveyStatus::Collecting);
        assert_eq!(stored.answered_count(), 1);
    }

    #[tokio::test]
    async fn notification_failure_is_a_warning() {
        let f = fixture(MockStore::new(), MockNotifier::new(NotifierBehavior::Fail));
        let id = seed(&f.repo, Some("Pilot")).await;

        let result = f.handler.handle(submit(id, true)).await.unwrap();

        assert_eq!(result.notification, NotificationStatus::Failed);
        assert_eq!(result.warning.as_deref(), Some(NOTIFICATION_FAILED_WARNING));
        assert_eq!(result.session.status(), SurveyStatus::Submitted);
        assert_eq!(f.store.count(), 1);
    }

    #[tokio::test]
    async fn hanging_notifier_times_out() {
        let f = fixture(MockStore::new(), MockNotifier::new(NotifierBehavior::Hang));
        let id = seed(&f.repo, Some("Pilot")).await;

        let result = f.handler.handle(submit(id, true)).await.unwrap();

        assert_eq!(result.notification, NotificationStatus::Failed);
        assert!(result.warning.is_some());
    }

    #[tokio::test]
    async fn second_submit_is_rejected() {
        let f = fixture(MockStore::new(), MockNotifier::new(NotifierBehavior::Deliver));
        let id = seed(&f.repo, Some("Pilot")).await;

        f.handler.handle(submit(id, true)).await.unwrap();
        let err = f.handler.handle(submit(id, true)).await.unwrap_err();

        assert_eq!(err, SurveyError::AlreadySubmitted);
        assert_eq!(f.store.count(), 1);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let f = fixture(MockStore::new(), MockNotifier::new(NotifierBehavior::Deliver));
        let err = f.handler.handle(submit(SessionId::new(), true)).await.unwrap_err();
        assert!(matches!(err, SurveyError::NotFound(_)));
    }
}
