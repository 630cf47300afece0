//! Schema metadata model
//!
//! Immutable descriptions of the relational schema being exported: table
//! names, columns and their roles, and the joins connecting them. Everything
//! here is built from configuration up front; invalid configurations fail
//! fast with a [`ConfigError`] before any row is processed.

pub mod column;
pub mod error;
pub mod join;
pub mod table;
pub mod table_name;

pub use column::{Column, ColumnRole, CompositeColumn, SimpleColumn, SqlDataType};
pub use error::ConfigError;
pub use join::{Join, JoinKey};
pub use table::{JoinTable, Table};
pub use table_name::TableName;
