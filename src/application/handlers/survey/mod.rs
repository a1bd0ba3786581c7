//! Survey command and query handlers.

mod get_session;
mod record_judgment;
mod reset_session;
mod set_profession;
mod start_session;
mod submit_survey;

pub use get_session::{GetSurveySessionHandler, GetSurveySessionQuery};
pub use record_judgment::{RecordJudgmentCommand, RecordJudgmentHandler, RecordJudgmentResult};
pub use reset_session::{ResetSessionCommand, ResetSessionHandler};
pub use set_profession::{SetProfessionCommand, SetProfessionHandler};
pub use start_session::{StartSessionHandler, StartSessionResult};
pub use submit_survey::{SubmitSurveyCommand, SubmitSurveyHandler, SubmitSurveyResult};
