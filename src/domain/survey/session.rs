//! Survey session aggregate.
//!
//! One session is the full mutable context of one respondent: identity,
//! start time, profession, judgments and submission status. Every operation
//! receives the session explicitly; nothing lives in process-wide state.
//!
//! # Lifecycle
//!
//! ```text
//! Collecting --submit (profession + confirmation + persisted)--> Submitted
//! Submitted  --reset (new respondent identity)-----------------> Collecting
//! ```

use std::collections::HashMap;

use crate::domain::foundation::{SessionId, StateMachine, SurveyStatus, Timestamp};

use super::catalog::{QuestionCatalog, QuestionKey};
use super::errors::SurveyError;
use super::judgment::Judgment;
use super::respondent::Respondent;
use super::scale::JudgmentValue;

/// Survey session aggregate.
///
/// # Invariants
///
/// - `judgments` only holds keys present in the catalog they were recorded against
/// - judgments and profession are frozen once `status` is `Submitted`
/// - `submitted_file` is set exactly when `status` is `Submitted`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveySession {
    id: SessionId,
    respondent: Respondent,
    judgments: HashMap<QuestionKey, JudgmentValue>,
    status: SurveyStatus,
    submitted_file: Option<String>,
    updated_at: Timestamp,
}

impl SurveySession {
    /// Starts a new collecting session with a fresh respondent.
    pub fn new(id: SessionId) -> Self {
        Self::started_at(id, Timestamp::now())
    }

    /// Starts a new session with an explicit start time.
    pub fn started_at(id: SessionId, start: Timestamp) -> Self {
        Self {
            id,
            respondent: Respondent::start_at(start),
            judgments: HashMap::new(),
            status: SurveyStatus::Collecting,
            submitted_file: None,
            updated_at: start,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn respondent(&self) -> &Respondent {
        &self.respondent
    }

    pub fn status(&self) -> SurveyStatus {
        self.status
    }

    /// Judgments the respondent explicitly recorded.
    pub fn judgments(&self) -> &HashMap<QuestionKey, JudgmentValue> {
        &self.judgments
    }

    pub fn answered_count(&self) -> usize {
        self.judgments.len()
    }

    /// File name of the persisted bundle, once submitted.
    pub fn submitted_file(&self) -> Option<&str> {
        self.submitted_file.as_deref()
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns the judgment for a question, neutral and unanswered if never set.
    pub fn judgment(&self, key: &QuestionKey) -> Judgment {
        match self.judgments.get(key) {
            Some(value) => Judgment::answered(key.clone(), *value),
            None => Judgment::unanswered(key.clone()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Sets (or clears, when blank) the respondent's profession.
    ///
    /// # Errors
    ///
    /// - `AlreadySubmitted` if the session is submitted
    /// - `ValidationFailed` if the profession is too long
    pub fn set_profession(&mut self, profession: &str) -> Result<(), SurveyError> {
        self.ensure_mutable()?;
        self.respondent.set_profession(profession)?;
        self.touch();
        Ok(())
    }

    /// Records a judgment for a catalog question, replacing any earlier value.
    ///
    /// # Errors
    ///
    /// - `AlreadySubmitted` if the session is submitted
    /// - `UnknownQuestion` if the key is not in the catalog
    /// - `InvalidJudgment` if the value is not on the scale
    pub fn record_judgment(
        &mut self,
        catalog: &QuestionCatalog,
        key: QuestionKey,
        raw_value: i64,
    ) -> Result<Judgment, SurveyError> {
        self.ensure_mutable()?;
        if !catalog.contains(&key) {
            return Err(SurveyError::UnknownQuestion(key));
        }
        let value = JudgmentValue::try_from_i64(raw_value).map_err(SurveyError::InvalidJudgment)?;

        self.judgments.insert(key.clone(), value);
        self.touch();
        Ok(Judgment::answered(key, value))
    }

    /// Checks the preconditions a submission needs before anything is compiled.
    ///
    /// Profession is checked before confirmation.
    ///
    /// # Errors
    ///
    /// - `AlreadySubmitted` if the session is submitted
    /// - `ProfessionRequired` if no profession is set
    /// - `ConfirmationRequired` if `confirmed` is false
    pub fn ensure_submittable(&self, confirmed: bool) -> Result<(), SurveyError> {
        self.ensure_mutable()?;
        if self.respondent.profession().is_none() {
            return Err(SurveyError::ProfessionRequired);
        }
        if !confirmed {
            return Err(SurveyError::ConfirmationRequired);
        }
        Ok(())
    }

    /// Marks the session submitted after its bundle has been persisted.
    ///
    /// # Errors
    ///
    /// - `AlreadySubmitted` if the session is submitted
    pub fn mark_submitted(&mut self, file_name: impl Into<String>) -> Result<(), SurveyError> {
        self.ensure_mutable()?;
        self.status = self
            .status
            .transition_to(SurveyStatus::Submitted)
            .map_err(|e| SurveyError::invalid_state(e.to_string()))?;
        self.submitted_file = Some(file_name.into());
        self.touch();
        Ok(())
    }

    /// Clears everything and starts over with a new respondent identity.
    ///
    /// # Errors
    ///
    /// - `InvalidState` unless the session is submitted
    pub fn reset(&mut self) -> Result<(), SurveyError> {
        self.status = self
            .status
            .transition_to(SurveyStatus::Collecting)
            .map_err(|_| SurveyError::invalid_state("Only a submitted survey can be reset"))?;
        let now = Timestamp::now();
        self.respondent = Respondent::start_at(now);
        self.judgments.clear();
        self.submitted_file = None;
        self.updated_at = now;
        Ok(())
    }

    fn ensure_mutable(&self) -> Result<(), SurveyError> {
        if self.status.is_mutable() {
            Ok(())
        } else {
            Err(SurveyError::AlreadySubmitted)
        }
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
