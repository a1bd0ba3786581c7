//! In-Memory Survey Session Repository
//!
//! Keeps active survey sessions in process memory. Sessions are short-lived
//! and carry nothing that must outlive the process; persisted bundles do.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::survey::SurveySession;
use crate::ports::SurveySessionRepository;

/// In-memory storage for survey sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySurveySessionRepository {
    sessions: Arc<RwLock<HashMap<SessionId, SurveySession>>>,
}

impl InMemorySurveySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SurveySessionRepository for InMemorySurveySessionRepository {
    async fn save(&self, session: &SurveySession) -> Result<(), DomainError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<SurveySession>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(id).cloned())
    }
}
