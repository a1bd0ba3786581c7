//! Response compiler - turns a session into an ordered submission bundle.
//!
//! The bundle always starts with a synthetic "Profession" record followed by
//! one record per catalog question, in catalog order. Questions the respondent
//! never touched are filled with the neutral value and flagged `answered = false`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::{RespondentId, Timestamp};

use super::catalog::{QuestionCatalog, QuestionKey};
use super::filename::bundle_file_name;
use super::respondent::Respondent;
use super::scale::{Direction, JudgmentValue};
use super::session::SurveySession;

/// Group of the synthetic first record.
pub const PARTICIPANT_INFO_GROUP: &str = "Participant Info";

/// Question text of the synthetic first record.
pub const PROFESSION_QUESTION: &str = "Profession";

/// Column headers in file order.
pub const RECORD_COLUMNS: [&str; 10] = [
    "RespondentID",
    "Timestamp",
    "Career",
    "DurationSeconds",
    "Group",
    "Question",
    "Answer",
    "NumericValue",
    "Direction",
    "Answered",
];

/// One row of a submission bundle.
///
/// Field order is the column order of the persisted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    #[serde(rename = "RespondentID")]
    pub respondent_id: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Career")]
    pub profession: String,
    #[serde(rename = "DurationSeconds")]
    pub duration_seconds: u64,
    #[serde(rename = "Group")]
    pub group: String,
    #[serde(rename = "Question")]
    pub question: String,
    #[serde(rename = "Answer")]
    pub answer: String,
    #[serde(rename = "NumericValue")]
    pub numeric_value: Option<i8>,
    #[serde(rename = "Direction")]
    pub direction: Option<Direction>,
    #[serde(rename = "Answered")]
    pub answered: bool,
}

impl ResponseRecord {
    /// True for the synthetic profession row.
    pub fn is_profession(&self) -> bool {
        self.group == PARTICIPANT_INFO_GROUP && self.question == PROFESSION_QUESTION
    }
}

/// Ordered, write-once set of records from one completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionBundle {
    respondent_id: RespondentId,
    profession: String,
    compiled_at: Timestamp,
    records: Vec<ResponseRecord>,
}

impl SubmissionBundle {
    /// Reassembles a bundle from records read back from storage.
    pub fn from_records(
        respondent_id: RespondentId,
        profession: String,
        compiled_at: Timestamp,
        records: Vec<ResponseRecord>,
    ) -> Self {
        Self {
            respondent_id,
            profession,
            compiled_at,
            records,
        }
    }

    pub fn respondent_id(&self) -> &RespondentId {
        &self.respondent_id
    }

    pub fn profession(&self) -> &str {
        &self.profession
    }

    pub fn compiled_at(&self) -> &Timestamp {
        &self.compiled_at
    }

    pub fn records(&self) -> &[ResponseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of question records whose value was filled in by default.
    pub fn unanswered_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| !r.is_profession() && !r.answered)
            .count()
    }

    /// File name this bundle is persisted under.
    pub fn file_name(&self) -> String {
        bundle_file_name(&self.profession, &self.respondent_id, &self.compiled_at)
    }

    /// `(group, question, numeric_value)` for each question record.
    pub fn judgment_triples(&self) -> Vec<(String, String, i8)> {
        self.records
            .iter()
            .filter(|r| !r.is_profession())
            .filter_map(|r| {
                r.numeric_value
                    .map(|v| (r.group.clone(), r.question.clone(), v))
            })
            .collect()
    }
}

/// Compiles sessions into submission bundles.
pub struct ResponseCompiler;

impl ResponseCompiler {
    /// Compiles a session against the catalog at the given instant.
    pub fn compile_session(
        session: &SurveySession,
        catalog: &QuestionCatalog,
        compiled_at: Timestamp,
    ) -> SubmissionBundle {
        Self::compile(session.respondent(), catalog, session.judgments(), compiled_at)
    }

    /// Compiles a respondent's judgments against the catalog.
    ///
    /// Never fails: missing judgments become neutral, unanswered records, and a
    /// missing profession is written as empty text (callers validate first).
    pub fn compile(
        respondent: &Respondent,
        catalog: &QuestionCatalog,
        judgments: &HashMap<QuestionKey, JudgmentValue>,
        compiled_at: Timestamp,
    ) -> SubmissionBundle {
        let respondent_id = respondent.id().to_string();
        let profession = respondent.profession().unwrap_or_default().to_string();
        let timestamp = compiled_at.to_file_stamp();
        let duration_seconds = compiled_at.whole_seconds_since(respondent.session_start());

        let mut records = Vec::with_capacity(catalog.len() + 1);
        records.push(ResponseRecord {
            respondent_id: respondent_id.clone(),
            timestamp: timestamp.clone(),
            profession: profession.clone(),
            duration_seconds,
            group: PARTICIPANT_INFO_GROUP.to_string(),
            question: PROFESSION_QUESTION.to_string(),
            answer: profession.clone(),
            numeric_value: None,
            direction: None,
            answered: true,
        });

        for question in catalog.questions() {
            let (value, answered) = match judgments.get(&question.key) {
                Some(value) => (*value, true),
                None => (JudgmentValue::NEUTRAL, false),
            };
            records.push(ResponseRecord {
                respondent_id: respondent_id.clone(),
                timestamp: timestamp.clone(),
                profession: profession.clone(),
                duration_seconds,
                group: question.key.group.clone(),
                question: question.text.clone(),
                answer: value.answer_label(),
                numeric_value: Some(value.value()),
                direction: Some(value.direction()),
                answered,
            });
        }

        SubmissionBundle {
            respondent_id: respondent.id().clone(),
            profession,
            compiled_at,
            records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;

    fn two_question_catalog() -> QuestionCatalog {
        QuestionCatalog::from_rows(vec![
            ("G1", "Closure vs Continuity"),
            ("G1", "Proximity vs Similarity"),
        ])
        .unwrap()
    }

    fn session_with_profession(profession: &str) -> SurveySession {
        let mut session = SurveySession::new(SessionId::new());
        session.set_profession(profession).unwrap();
        session
    }

    #[test]
    fn first_answer_a_second_untouched() {
        let catalog = two_question_catalog();
        let mut session = session_with_profession("Pilot");
        session
            .record_judgment(&catalog, QuestionKey::new("G1", 0), 5)
            .unwrap();

        let bundle = ResponseCompiler::compile_session(&session, &catalog, Timestamp::now());
        let records = bundle.records();

        assert_eq!(records.len(), 3);
        assert!(records[0].is_profession());
        assert_eq!(records[0].answer, "Pilot");
        assert_eq!(records[0].numeric_value, None);
        assert_eq!(records[0].direction, None);

        assert_eq!(records[1].answer, "Option A 5x");
        assert_eq!(records[1].direction, Some(Direction::A));
        assert!(records[1].answered);

        assert_eq!(records[2].answer, "Equal (1)");
        assert_eq!(records[2].direction, Some(Direction::Equal));
        assert_eq!(records[2].numeric_value, Some(1));
        assert!(!records[2].answered);
        assert_eq!(bundle.unanswered_count(), 1);
    }

    #[test]
    fn option_b_label_uses_magnitude() {
        let catalog = two_question_catalog();
        let mut session = session_with_profession("Pilot");
        session
            .record_judgment(&catalog, QuestionKey::new("G1", 1), -8)
            .unwrap();

        let bundle = ResponseCompiler::compile_session(&session, &catalog, Timestamp::now());
        assert_eq!(bundle.records()[2].answer, "Option B 8x");
        assert_eq!(bundle.records()[2].direction, Some(Direction::B));
        assert_eq!(bundle.records()[2].numeric_value, Some(-8));
    }

    #[test]
    fn bundle_length_is_catalog_plus_one() {
        let catalog = QuestionCatalog::from_rows(vec![
            ("Gestalt", "a"),
            ("Wickens", "b"),
            ("Gestalt", "c"),
            ("Ergonomics", "d"),
        ])
        .unwrap();
        let session = session_with_profession("Researcher");
        let bundle = ResponseCompiler::compile_session(&session, &catalog, Timestamp::now());
        assert_eq!(bundle.len(), catalog.len() + 1);
    }

    #[test]
    fn records_follow_group_then_index_order() {
        let catalog = QuestionCatalog::from_rows(vec![
            ("Gestalt", "a"),
            ("Wickens", "b"),
            ("Gestalt", "c"),
        ])
        .unwrap();
        let session = session_with_profession("Researcher");
        let bundle = ResponseCompiler::compile_session(&session, &catalog, Timestamp::now());
        let questions: Vec<_> = bundle.records()[1..]
            .iter()
            .map(|r| r.question.as_str())
            .collect();
        assert_eq!(questions, vec!["a", "c", "b"]);
    }

    #[test]
    fn compiling_twice_at_same_instant_is_identical() {
        let catalog = two_question_catalog();
        let mut session = session_with_profession("Student");
        session
            .record_judgment(&catalog, QuestionKey::new("G1", 0), -4)
            .unwrap();
        let at = Timestamp::now();

        let first = ResponseCompiler::compile_session(&session, &catalog, at);
        let second = ResponseCompiler::compile_session(&session, &catalog, at);
        assert_eq!(first, second);
    }

    #[test]
    fn duration_is_measured_from_session_start() {
        let start = Timestamp::now();
        let mut session = SurveySession::started_at(SessionId::new(), start);
        session.set_profession("Pilot").unwrap();
        let bundle =
            ResponseCompiler::compile_session(&session, &two_question_catalog(), start.plus_secs(125));
        assert!(bundle.records().iter().all(|r| r.duration_seconds == 125));
    }

    #[test]
    fn every_record_carries_identity_and_timestamp() {
        let session = session_with_profession("Pilot");
        let at = Timestamp::now();
        let bundle = ResponseCompiler::compile_session(&session, &two_question_catalog(), at);
        for record in bundle.records() {
            assert_eq!(record.respondent_id, session.respondent().id().to_string());
            assert_eq!(record.timestamp, at.to_file_stamp());
            assert_eq!(record.profession, "Pilot");
        }
    }

    #[test]
    fn judgment_triples_skip_profession_row() {
        let catalog = two_question_catalog();
        let mut session = session_with_profession("Pilot");
        session
            .record_judgment(&catalog, QuestionKey::new("G1", 0), 3)
            .unwrap();
        let bundle = ResponseCompiler::compile_session(&session, &catalog, Timestamp::now());
        assert_eq!(
            bundle.judgment_triples(),
            vec![
                ("G1".to_string(), "Closure vs Continuity".to_string(), 3),
                ("G1".to_string(), "Proximity vs Similarity".to_string(), 1),
            ]
        );
    }

    #[test]
    fn file_name_uses_sanitized_profession() {
        let session = session_with_profession("UI/UX Designer");
        let bundle =
            ResponseCompiler::compile_session(&session, &two_question_catalog(), Timestamp::now());
        let name = bundle.file_name();
        assert!(name.starts_with("UI_UX_Designer_"));
        assert!(name.contains(session.respondent().id().as_str()));
        assert!(name.ends_with(".csv"));
    }
}
