//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `QuestionCatalogSource` - Loads the ordered question bank
//! - `SurveySessionRepository` - Holds per-respondent session state
//! - `ResponseStore` - Durable, write-once storage for submission bundles
//! - `SubmissionNotifier` - Best-effort notification after persistence

mod question_catalog_source;
mod response_store;
mod submission_notifier;
mod survey_session_repository;

pub use question_catalog_source::{CatalogError, QuestionCatalogSource};
pub use response_store::{FilePath, PersistedBundle, ResponseStore, StorageError};
pub use submission_notifier::{
    NotificationError, NotificationReceipt, NotificationStatus, SubmissionNotifier,
};
pub use survey_session_repository::SurveySessionRepository;
