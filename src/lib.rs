//! Graph ETL SDK - relational schema to graph CSV mapping and export
//!
//! Provides unified building blocks for turning a relational schema into CSV
//! descriptors consumable by a bulk graph-database loader:
//! - Schema metadata model (table names, columns, joins, join tables)
//! - Column-to-CSV field mapping with identifier-space assignment
//! - Row admission strategies guaranteeing referential integrity
//! - Unload/load statement construction and export orchestration over an
//!   external `mysql` client process

pub mod config;
pub mod export;
pub mod mapping;
pub mod models;
pub mod process;

// Re-export commonly used types
pub use config::{ConnectionConfig, ExportConfig, Formatting, JoinTableConfig, QuoteChar};
pub use export::{CsvRowWriter, ExportError, Exporter, RowAccessor, RowError, RowStrategy};
pub use mapping::{
    ColumnToCsvFieldMapper, ColumnToCsvFieldMappings, CsvField, GraphDataType, IdSpace,
    MappingError,
};
pub use models::{
    Column, ColumnRole, CompositeColumn, ConfigError, Join, JoinKey, JoinTable, SimpleColumn,
    SqlDataType, Table, TableName,
};
pub use process::{Commands, InMemoryStreamRecorder, ProcessError, ProcessResult, ResultEvaluator};
