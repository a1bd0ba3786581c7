//! Respondent entity: the anonymous participant behind one session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{RespondentId, Timestamp, ValidationError};

/// Maximum length of the free-text profession.
pub const MAX_PROFESSION_LENGTH: usize = 200;

/// Suggestion that only opens the free-text field; never stored as a profession.
pub const OTHER_PROFESSION: &str = "Other";

/// Professions offered by the presentation layer; free text is also accepted.
pub const SUGGESTED_PROFESSIONS: [&str; 8] = [
    "Pilot",
    "Operators",
    "Aerospace Engineer",
    "UI/UX Designer",
    "Human Factors Engineers",
    "Researcher",
    "Student",
    OTHER_PROFESSION,
];

/// One anonymous survey participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Respondent {
    id: RespondentId,
    profession: Option<String>,
    session_start: Timestamp,
}

impl Respondent {
    /// Creates a respondent with a fresh identity, starting now.
    pub fn start() -> Self {
        Self::start_at(Timestamp::now())
    }

    /// Creates a respondent with a fresh identity and an explicit start time.
    pub fn start_at(session_start: Timestamp) -> Self {
        Self {
            id: RespondentId::generate(),
            profession: None,
            session_start,
        }
    }

    pub fn id(&self) -> &RespondentId {
        &self.id
    }

    /// Returns the profession, if one has been given.
    pub fn profession(&self) -> Option<&str> {
        self.profession.as_deref()
    }

    pub fn session_start(&self) -> &Timestamp {
        &self.session_start
    }

    /// Sets the profession. Blank input clears it.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if the trimmed text exceeds `MAX_PROFESSION_LENGTH`
    /// - `InvalidFormat` if the text is the bare "Other" suggestion
    pub(crate) fn set_profession(&mut self, profession: &str) -> Result<(), ValidationError> {
        let trimmed = profession.trim();
        if trimmed.eq_ignore_ascii_case(OTHER_PROFESSION) {
            return Err(ValidationError::invalid_format(
                "profession",
                "describe the profession instead of choosing \"Other\"",
            ));
        }
        let len = trimmed.chars().count();
        if len > MAX_PROFESSION_LENGTH {
            return Err(ValidationError::out_of_range(
                "profession",
                1,
                MAX_PROFESSION_LENGTH as i32,
                len as i32,
            ));
        }
        self.profession = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_respondents_get_distinct_ids() {
        assert_ne!(Respondent::start().id(), Respondent::start().id());
    }

    #[test]
    fn profession_is_trimmed() {
        let mut respondent = Respondent::start();
        respondent.set_profession("  Aerospace Engineer ").unwrap();
        assert_eq!(respondent.profession(), Some("Aerospace Engineer"));
    }

    #[test]
    fn blank_profession_clears_it() {
        let mut respondent = Respondent::start();
        respondent.set_profession("Pilot").unwrap();
        respondent.set_profession("   ").unwrap();
        assert_eq!(respondent.profession(), None);
    }

    #[test]
    fn bare_other_is_rejected_and_keeps_previous_value() {
        let mut respondent = Respondent::start();
        respondent.set_profession("Pilot").unwrap();

        for input in ["Other", " other "] {
            let err = respondent.set_profession(input).unwrap_err();
            assert!(matches!(err, ValidationError::InvalidFormat { .. }));
        }
        assert_eq!(respondent.profession(), Some("Pilot"));

        respondent.set_profession("Other: Air Traffic Controller").unwrap();
        assert_eq!(respondent.profession(), Some("Other: Air Traffic Controller"));
    }

    #[test]
    fn overly_long_profession_is_rejected() {
        let mut respondent = Respondent::start();
        let long = "x".repeat(MAX_PROFESSION_LENGTH + 1);
        assert!(respondent.set_profession(&long).is_err());
        assert_eq!(respondent.profession(), None);
    }
}
