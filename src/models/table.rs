//! Table and join-table metadata

use super::column::Column;
use super::error::ConfigError;
use super::join::Join;
use super::table_name::TableName;

/// A physical relational table: name plus declared columns, including non-key
/// data columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: TableName,
    columns: Vec<Column>,
}

impl Table {
    pub fn new(name: TableName, columns: Vec<Column>) -> Self {
        Self { name, columns }
    }

    pub fn name(&self) -> &TableName {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

/// A physical table paired with the join describing its key columns; the
/// unit consumed by the mapping engine.
///
/// Built once per table during schema configuration and read-only afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinTable {
    table: Table,
    join: Join,
}

impl JoinTable {
    /// Construction fails if any source key column referenced by the join is
    /// absent from the table's declared columns.
    pub fn new(join: Join, table: Table) -> Result<Self, ConfigError> {
        for source in join.source_columns() {
            let present = table
                .columns()
                .iter()
                .any(|column| column.name() == source.name());
            if !present {
                return Err(ConfigError::MissingJoinColumn {
                    column: source.name(),
                    table: table.name().name().to_string(),
                });
            }
        }
        Ok(Self { table, join })
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn join(&self) -> &Join {
        &self.join
    }

    pub fn name(&self) -> &TableName {
        self.table.name()
    }
}
