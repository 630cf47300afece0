//! Error types for export orchestration

use super::row::RowError;
use crate::mapping::MappingError;
use crate::models::ConfigError;
use crate::process::ProcessError;
use thiserror::Error;

/// Errors raised while driving a full export run.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Schema configuration was invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading a source row failed; propagated unmodified
    #[error(transparent)]
    Row(#[from] RowError),

    /// Mapping a table failed
    #[error("Failed to map table '{table}': {source}")]
    Mapping {
        table: String,
        #[source]
        source: MappingError,
    },

    /// The external unload process failed
    #[error("Export process failed for table '{table}': {source}")]
    Process {
        table: String,
        #[source]
        source: ProcessError,
    },

    /// Destination filesystem failure
    #[error("Export I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
