//! Survey session repository port.
//!
//! Holds the per-respondent `SurveySession` context objects between
//! interactions. Handlers load a session, mutate their copy and save it back.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId};
use crate::domain::survey::SurveySession;

/// Repository port for SurveySession aggregates.
#[async_trait]
pub trait SurveySessionRepository: Send + Sync {
    /// Insert or replace a session.
    ///
    /// # Errors
    ///
    /// - `InternalError` on storage failure
    async fn save(&self, session: &SurveySession) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<SurveySession>, DomainError>;
}
