//! Storage Adapters
//!
//! Implementations of the ResponseStore port for persisting submission bundles.
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::CsvResponseStore;
//!
//! let store = CsvResponseStore::new("./survey_responses");
//! let persisted = store.persist(&bundle).await?;
//! ```

mod csv_response_store;

pub use csv_response_store::CsvResponseStore;
