//! CSV question catalog source.
//!
//! Reads a `Group,Question` CSV file (header row required, extra columns
//! ignored) into a `QuestionCatalog`.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::survey::QuestionCatalog;
use crate::ports::{CatalogError, QuestionCatalogSource};

const GROUP_COLUMN: &str = "Group";
const QUESTION_COLUMN: &str = "Question";

/// Loads the question bank from a CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvQuestionCatalogSource {
    path: PathBuf,
}

impl CsvQuestionCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parses catalog CSV content.
    pub fn parse(content: &[u8]) -> Result<QuestionCatalog, CatalogError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .flexible(true)
            .from_reader(content);

        let headers = reader
            .headers()
            .map_err(|e| CatalogError::MalformedRow {
                row: 0,
                message: e.to_string(),
            })?
            .clone();
        let group_idx = column_index(&headers, GROUP_COLUMN)?;
        let question_idx = column_index(&headers, QUESTION_COLUMN)?;

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| CatalogError::MalformedRow {
                row: i + 1,
                message: e.to_string(),
            })?;
            let group = record.get(group_idx).unwrap_or_default();
            let question = record.get(question_idx).unwrap_or_default();
            // Spreadsheet exports often end with empty lines of commas.
            if group.trim().is_empty() && question.trim().is_empty() {
                continue;
            }
            rows.push((group.to_string(), question.to_string()));
        }

        let catalog = QuestionCatalog::from_rows(rows)?;
        if catalog.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(catalog)
    }
}

fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize, CatalogError> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}') == name)
        .ok_or(CatalogError::MissingColumn(name))
}

#[async_trait]
impl QuestionCatalogSource for CsvQuestionCatalogSource {
    async fn load(&self) -> Result<QuestionCatalog, CatalogError> {
        let content = tokio::fs::read(&self.path)
            .await
            .map_err(|e| CatalogError::Unreadable {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })?;

        let catalog = Self::parse(&content)?;
        tracing::info!(
            path = %self.path.display(),
            groups = catalog.groups().len(),
            questions = catalog.len(),
            "Loaded question catalog"
        );
        Ok(catalog)
    }
}
