//! Qualified table name handling

use serde::{Deserialize, Serialize};
use std::fmt;

/// A relational table name, optionally qualified with a schema
/// (e.g. `"schema.Table"` or just `"Table"`).
///
/// The raw string is kept exactly as configured; [`TableName::simple_name`]
/// derives the unqualified part used for generated relationship-type labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableName(String);

impl TableName {
    /// Create a table name from its raw, possibly qualified string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The raw name exactly as configured.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// The substring after the rightmost `.`, or the whole name if no
    /// qualifier is present.
    pub fn simple_name(&self) -> &str {
        match self.0.rfind('.') {
            Some(index) => &self.0[index + 1..],
            None => &self.0,
        }
    }

    /// Qualify a column of this table, e.g. `"schema.Table.column"`.
    pub fn fully_qualified_column_name(&self, column: &str) -> String {
        format!("{}.{}", self.0, column)
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TableName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
