//! Question catalog adapters.

mod csv_catalog_source;

pub use csv_catalog_source::CsvQuestionCatalogSource;
