//! Survey content and response storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where the question bank is read from
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyConfig {
    /// CSV file with `Group,Question` columns
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,
}

impl SurveyConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.catalog_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("SURVEY__CATALOG_PATH"));
        }
        Ok(())
    }
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
        }
    }
}

/// Where submission bundles are written
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory for response files (created on first write)
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__OUTPUT_DIR"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("survey_questions_grouped.csv")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./survey_responses")
}
