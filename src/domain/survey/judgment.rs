//! Judgment value object: one respondent rating for one question.

use serde::{Deserialize, Serialize};

use super::catalog::QuestionKey;
use super::scale::JudgmentValue;

/// A rating for a single question.
///
/// `answered` separates "the respondent chose equal" from "the respondent
/// never touched this question"; both carry the neutral value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgment {
    pub key: QuestionKey,
    pub value: JudgmentValue,
    pub answered: bool,
}

impl Judgment {
    /// A judgment the respondent explicitly recorded.
    pub fn answered(key: QuestionKey, value: JudgmentValue) -> Self {
        Self {
            key,
            value,
            answered: true,
        }
    }

    /// The neutral stand-in for a question left untouched.
    pub fn unanswered(key: QuestionKey) -> Self {
        Self {
            key,
            value: JudgmentValue::NEUTRAL,
            answered: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::survey::Direction;

    #[test]
    fn unanswered_is_neutral_and_flagged() {
        let judgment = Judgment::unanswered(QuestionKey::new("G1", 0));
        assert_eq!(judgment.value.value(), 1);
        assert_eq!(judgment.value.direction(), Direction::Equal);
        assert!(!judgment.answered);
    }

    #[test]
    fn explicit_equal_is_still_answered() {
        let judgment = Judgment::answered(QuestionKey::new("G1", 0), JudgmentValue::NEUTRAL);
        assert!(judgment.answered);
        assert_ne!(judgment, Judgment::unanswered(QuestionKey::new("G1", 0)));
    }
}
