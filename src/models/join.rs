//! Join metadata for foreign-key and many-to-many relationships

use super::column::{Column, ColumnRole, SimpleColumn};
use super::error::ConfigError;
use super::table_name::TableName;
use crate::config::Formatting;
use crate::mapping::fields::{CsvField, IdSpace};

/// Pairs a foreign-key column on a join table with the primary-key column it
/// references on the target table.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinKey {
    source: Column,
    target: Column,
}

impl JoinKey {
    /// Construction fails unless the source carries `ForeignKey` and the
    /// target carries `PrimaryKey`.
    pub fn new(source: Column, target: Column) -> Result<Self, ConfigError> {
        let source_is_foreign = source.roles().contains(&ColumnRole::ForeignKey);
        let target_is_primary = target.roles().contains(&ColumnRole::PrimaryKey);
        if !source_is_foreign || !target_is_primary {
            return Err(ConfigError::IncompatibleKeyRoles {
                source_name: source.name(),
                target: target.name(),
            });
        }
        Ok(Self { source, target })
    }

    pub fn source_column(&self) -> &Column {
        &self.source
    }

    pub fn target_column(&self) -> &Column {
        &self.target
    }
}

/// Two join keys (parent side, child side) for a many-to-many join table, or
/// a single key for a simple foreign-key-bearing table.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    parent: JoinKey,
    child: Option<JoinKey>,
}

impl Join {
    /// A many-to-many join. The two keys must reference distinct tables.
    pub fn many_to_many(parent: JoinKey, child: JoinKey) -> Result<Self, ConfigError> {
        if parent.target_column().table() == child.target_column().table() {
            return Err(ConfigError::JoinTargetsSameTable(
                parent.target_column().table().name().to_string(),
            ));
        }
        Ok(Self {
            parent,
            child: Some(child),
        })
    }

    /// A simple foreign-key join with a single key.
    pub fn foreign_key(key: JoinKey) -> Self {
        Self {
            parent: key,
            child: None,
        }
    }

    pub fn parent_key(&self) -> &JoinKey {
        &self.parent
    }

    pub fn child_key(&self) -> Option<&JoinKey> {
        self.child.as_ref()
    }

    /// The join table this join's source columns live on.
    pub fn source_table(&self) -> &TableName {
        self.parent.source_column().table()
    }

    /// Source key columns in parent, child order.
    pub fn source_columns(&self) -> impl Iterator<Item = &Column> {
        std::iter::once(self.parent.source_column())
            .chain(self.child.as_ref().map(JoinKey::source_column))
    }

    /// Whether the given table column is consumed by this join as a key.
    pub fn uses_source_column(&self, column: &Column) -> bool {
        self.source_columns().any(|source| source.name() == column.name())
    }

    /// The relationship-type label derived from the join table's short name:
    /// upper-cased, whitespace-separated words joined with `_`.
    pub fn relationship_type(&self) -> String {
        let simple_name = self.source_table().simple_name();
        simple_name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_uppercase()
    }

    /// Selection columns in output order: parent source column, child source
    /// column, quoted relationship-type literal. The one-key form yields the
    /// single source column.
    pub fn columns(&self, formatting: &Formatting) -> Vec<Column> {
        match &self.child {
            Some(child) => {
                let label = self.relationship_type();
                let literal = SimpleColumn::literal(
                    self.source_table().clone(),
                    formatting.quote.enquote(&label),
                    label,
                );
                vec![
                    self.parent.source_column().clone(),
                    child.source_column().clone(),
                    Column::Simple(literal),
                ]
            }
            None => vec![self.parent.source_column().clone()],
        }
    }

    /// Field descriptors positionally paired with [`Join::columns`]:
    /// start-identifier in the parent target's identifier space,
    /// end-identifier in the child target's, relationship-type. The one-key
    /// form yields a single identifier field.
    pub fn field_mappings(&self) -> Vec<CsvField> {
        match &self.child {
            Some(child) => vec![
                CsvField::start_id(id_space_for(self.parent.target_column())),
                CsvField::end_id(id_space_for(child.target_column())),
                CsvField::relationship_type(),
            ],
            None => vec![CsvField::id_in_space(id_space_for(
                self.parent.target_column(),
            ))],
        }
    }
}

fn id_space_for(target: &Column) -> IdSpace {
    IdSpace::new(target.table().name())
}
