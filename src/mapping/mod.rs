//! Schema-to-CSV mapping engine
//!
//! Decides, for every relational table, how its columns become bulk-loader
//! CSV fields: identifier spaces, relationship types, and typed data
//! properties.

pub mod error;
pub mod fields;
pub mod mapper;

pub use error::MappingError;
pub use fields::{CsvField, GraphDataType, IdSpace};
pub use mapper::{ColumnToCsvFieldMapper, ColumnToCsvFieldMappings};
