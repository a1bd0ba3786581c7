//! Question Catalog Source Port - where the question bank comes from.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::survey::QuestionCatalog;

/// Port for loading the question catalog once at startup.
#[async_trait]
pub trait QuestionCatalogSource: Send + Sync {
    /// Load the full, ordered catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the source is unreadable, malformed or empty.
    async fn load(&self) -> Result<QuestionCatalog, CatalogError>;
}

/// Errors that can occur while loading the catalog.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Failed to read question catalog {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("Question catalog is missing column '{0}'")]
    MissingColumn(&'static str),

    #[error("Malformed question catalog row {row}: {message}")]
    MalformedRow { row: usize, message: String },

    #[error("Question catalog is empty")]
    Empty,

    #[error("Invalid question catalog: {0}")]
    Invalid(#[from] ValidationError),
}
