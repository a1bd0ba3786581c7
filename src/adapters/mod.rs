//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `catalog` - Question bank loaded from CSV
//! - `storage` - Write-once CSV response files
//! - `notification` - Email delivery through Resend
//! - `session` - In-memory survey session repository
//! - `http` - REST API for the survey front end

pub mod catalog;
pub mod http;
pub mod notification;
pub mod session;
pub mod storage;

pub use catalog::CsvQuestionCatalogSource;
pub use notification::{DisabledNotifier, ResendNotifier};
pub use session::InMemorySurveySessionRepository;
pub use storage::CsvResponseStore;
