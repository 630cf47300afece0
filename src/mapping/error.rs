//! Error types for the mapping engine

use crate::models::ConfigError;
use thiserror::Error;

/// Errors raised while building field mappings for a table.
#[derive(Error, Debug)]
pub enum MappingError {
    /// Two columns would share an alias in the emitted field list
    #[error("Duplicate alias '{0}' in field mappings")]
    DuplicateAlias(String),

    /// Underlying schema configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}
