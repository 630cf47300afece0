//! Row access for export-time value extraction

use std::collections::HashMap;
use thiserror::Error;

/// Failure reading a value from the underlying row source.
///
/// Row-access errors are fatal for the export step: they propagate unmodified
/// through [`RowStrategy`](super::strategy::RowStrategy) and
/// [`Column::select_from`](crate::models::Column::select_from) with no
/// wrapping or recovery, leaving retry policy to the caller.
#[derive(Error, Debug)]
pub enum RowError {
    #[error("Failed to read column '{column}' from row source: {source}")]
    Io {
        column: String,
        #[source]
        source: std::io::Error,
    },
}

/// Capability to look up a raw value by column label for one source row.
///
/// Must be invocable repeatedly for one row; no caching contract is assumed.
/// `Ok(None)` means SQL null.
pub trait RowAccessor {
    fn value(&self, column_label: &str) -> Result<Option<String>, RowError>;
}

/// An in-memory row, useful for tests and for rows already materialized from
/// a CSV stream.
impl RowAccessor for HashMap<String, Option<String>> {
    fn value(&self, column_label: &str) -> Result<Option<String>, RowError> {
        Ok(self.get(column_label).cloned().flatten())
    }
}
