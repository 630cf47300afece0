//! Error types for schema construction

use thiserror::Error;

/// Errors raised while building schema metadata from configuration.
///
/// All of these are fatal: they surface at schema-build time, before any row
/// is processed, and are never retried.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Unrecognized column-type tag on deserialization
    #[error("Unrecognized column type: '{0}'")]
    UnrecognizedColumnType(String),

    /// Interchange document is missing a required field
    #[error("Missing field '{field}' in {context}")]
    MissingField { field: &'static str, context: &'static str },

    /// Interchange document could not be decoded
    #[error("Invalid column document: {0}")]
    InvalidColumnDocument(#[from] serde_json::Error),

    /// A join key pairs columns with incompatible roles
    #[error("Join key source '{source_name}' must carry the ForeignKey role and target '{target}' the PrimaryKey role")]
    IncompatibleKeyRoles { source_name: String, target: String },

    /// Both sides of a many-to-many join resolve to the same table
    #[error("Join keys must reference distinct tables, both reference '{0}'")]
    JoinTargetsSameTable(String),

    /// A join references a column the table does not declare
    #[error("Join references column '{column}' which is not present in table '{table}'")]
    MissingJoinColumn { column: String, table: String },

    /// A column was declared without any role
    #[error("Column '{0}' must carry at least one role")]
    EmptyRoles(String),

    /// A composite column needs two or more members
    #[error("Composite column '{0}' must have at least two member columns")]
    TooFewMembers(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::UnrecognizedColumnType("FancyColumn".to_string());
        assert!(err.to_string().contains("FancyColumn"));

        let err = ConfigError::MissingJoinColumn {
            column: "studentId".to_string(),
            table: "test.Student_Course".to_string(),
        };
        assert!(err.to_string().contains("studentId"));
        assert!(err.to_string().contains("test.Student_Course"));
    }
}
