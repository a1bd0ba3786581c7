//! SurveyStatus enum for tracking the lifecycle of a survey session.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of a survey session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SurveyStatus {
    /// Respondent is still answering; judgments may change.
    #[default]
    Collecting,
    /// Responses were persisted; only a reset is allowed.
    Submitted,
}

impl SurveyStatus {
    /// Returns true if judgments and profession can still be edited.
    pub fn is_mutable(&self) -> bool {
        matches!(self, SurveyStatus::Collecting)
    }
}

impl StateMachine for SurveyStatus {
    /// Valid transitions:
    /// - Collecting -> Submitted (successful submission)
    /// - Submitted -> Collecting (reset for a new respondent)
    fn can_transition_to(&self, target: &Self) -> bool {
        use SurveyStatus::*;
        matches!((self, target), (Collecting, Submitted) | (Submitted, Collecting))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            SurveyStatus::Collecting => vec![SurveyStatus::Submitted],
            SurveyStatus::Submitted => vec![SurveyStatus::Collecting],
        }
    }
}

impl fmt::Display for SurveyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SurveyStatus::Collecting => "collecting",
            SurveyStatus::Submitted => "submitted",
        };
        write!(f, "{}", s)
    }
}
