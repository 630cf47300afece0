//! Row admission policies
//!
//! A [`RowStrategy`] decides per row whether a source row is safe to emit,
//! guaranteeing referential integrity in the output. Strategies are stateless
//! policy values passed explicitly into the export step.

use super::row::{RowAccessor, RowError};
use crate::models::Column;

/// Row admission policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStrategy {
    /// Reject any row with a null primary- or foreign-key value. A composite
    /// key counts as null when any single member is null.
    IgnoreRowWithNullKey,
}

impl RowStrategy {
    /// Evaluate the admission decision for one row.
    ///
    /// Only key columns are consulted; evaluation short-circuits on the first
    /// disqualifying null. Errors raised by the row accessor propagate
    /// unmodified; they are fatal for the export step, not a rejection.
    pub fn test(&self, row: &dyn RowAccessor, columns: &[Column]) -> Result<bool, RowError> {
        match self {
            RowStrategy::IgnoreRowWithNullKey => {
                for column in columns.iter().filter(|column| column.is_key()) {
                    if column.select_from(row)?.is_none() {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColumnRole, CompositeColumn, SimpleColumn, SqlDataType, TableName};
    use std::collections::HashMap;

    struct FailingRowAccessor;

    impl RowAccessor for FailingRowAccessor {
        fn value(&self, column_label: &str) -> Result<Option<String>, RowError> {
            Err(RowError::Io {
                column: column_label.to_string(),
                source: std::io::Error::other("connection reset"),
            })
        }
    }

    fn column(table: &TableName, name: &str, role: ColumnRole) -> Column {
        Column::Simple(SimpleColumn::new(
            table.clone(),
            table.fully_qualified_column_name(name),
            name,
            role,
            SqlDataType::KEY_DATA_TYPE,
        ))
    }

    fn composite_key_column(table: &TableName, members: &[&str], role: ColumnRole) -> Column {
        CompositeColumn::new(
            table.clone(),
            members.iter().map(|member| member.to_string()).collect(),
            members.join("_"),
            role,
            SqlDataType::KEY_DATA_TYPE,
        )
        .unwrap()
        .into()
    }

    #[test]
    fn test_admits_row_when_only_non_key_columns_are_null() {
        let table = TableName::new("test.users");
        let row: HashMap<String, Option<String>> = HashMap::from([
            ("id".to_string(), Some("1".to_string())),
            ("username".to_string(), Some("user-1".to_string())),
            ("first_name".to_string(), Some("Boaty".to_string())),
            ("last_name".to_string(), Some("Mc.Boatface".to_string())),
            ("age".to_string(), None),
        ]);

        let columns = [
            column(&table, "id", ColumnRole::PrimaryKey),
            column(&table, "username", ColumnRole::ForeignKey),
            column(&table, "age", ColumnRole::Data),
            composite_key_column(&table, &["first_name", "last_name"], ColumnRole::PrimaryKey),
        ];

        let strategy = RowStrategy::IgnoreRowWithNullKey;
        assert!(strategy.test(&row, &columns).unwrap());
    }

    #[test]
    fn test_rejects_row_when_any_key_column_is_null() {
        let table = TableName::new("test.Users");
        let row: HashMap<String, Option<String>> = HashMap::from([
            ("id".to_string(), Some("1".to_string())),
            ("username".to_string(), None),
            ("age".to_string(), Some("42".to_string())),
        ]);

        let columns = [
            column(&table, "id", ColumnRole::PrimaryKey),
            column(&table, "username", ColumnRole::ForeignKey),
            column(&table, "age", ColumnRole::Data),
        ];

        let strategy = RowStrategy::IgnoreRowWithNullKey;
        assert!(!strategy.test(&row, &columns).unwrap());
    }

    #[test]
    fn test_rejects_row_when_any_composite_key_member_is_null() {
        let table = TableName::new("test.Users");
        let row: HashMap<String, Option<String>> = HashMap::from([
            ("first_name".to_string(), Some("Boaty".to_string())),
            ("last_name".to_string(), None),
            ("age".to_string(), Some("42".to_string())),
        ]);

        let columns = [
            composite_key_column(&table, &["first_name", "last_name"], ColumnRole::PrimaryKey),
            column(&table, "age", ColumnRole::Data),
        ];

        let strategy = RowStrategy::IgnoreRowWithNullKey;
        assert!(!strategy.test(&row, &columns).unwrap());
    }

    #[test]
    fn test_bubbles_accessor_error() {
        let table = TableName::new("users");
        let columns = [
            column(&table, "id", ColumnRole::PrimaryKey),
            column(&table, "username", ColumnRole::ForeignKey),
            column(&table, "age", ColumnRole::Data),
        ];

        let strategy = RowStrategy::IgnoreRowWithNullKey;
        let result = strategy.test(&FailingRowAccessor, &columns);

        assert!(matches!(result, Err(RowError::Io { column, .. }) if column == "id"));
    }
}
