//! Survey domain module.
//!
//! Pairwise-comparison survey: an ordered question catalog, the signed 1-9
//! judgment scale, the per-respondent session aggregate and the compiler that
//! turns a finished session into a submission bundle.

mod catalog;
mod compiler;
mod errors;
mod filename;
mod judgment;
mod respondent;
mod scale;
mod session;

pub use catalog::{Question, QuestionCatalog, QuestionGroup, QuestionKey};
pub use compiler::{
    ResponseCompiler, ResponseRecord, SubmissionBundle, PARTICIPANT_INFO_GROUP,
    PROFESSION_QUESTION, RECORD_COLUMNS,
};
pub use errors::{
    SurveyError, CONFIRMATION_REQUIRED_MESSAGE, NOTIFICATION_FAILED_WARNING,
    PROFESSION_REQUIRED_MESSAGE,
};
pub use filename::{bundle_file_name, sanitize_profession, BUNDLE_EXTENSION};
pub use judgment::Judgment;
pub use respondent::{Respondent, MAX_PROFESSION_LENGTH, OTHER_PROFESSION, SUGGESTED_PROFESSIONS};
pub use scale::{scale_options, Direction, JudgmentValue, ScaleOption, NEUTRAL_VALUE, PERMITTED_VALUES};
pub use session::SurveySession;
