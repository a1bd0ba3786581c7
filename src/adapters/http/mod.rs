//! HTTP adapters - REST API implementations.

pub mod survey;

pub use survey::{survey_routes, SurveyHandlers};
