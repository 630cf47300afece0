//! Export pipeline
//!
//! Row access and admission policies, unload/load statement construction,
//! and the orchestration that materializes mapped tables as CSV files.

pub mod error;
pub mod exporter;
pub mod row;
pub mod statements;
pub mod strategy;
pub mod writer;

pub use error::ExportError;
pub use exporter::Exporter;
pub use row::{RowAccessor, RowError};
pub use statements::{load_statement, unload_statement};
pub use strategy::RowStrategy;
pub use writer::CsvRowWriter;
