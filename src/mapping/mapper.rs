//! The schema-to-CSV mapping engine
//!
//! [`ColumnToCsvFieldMapper`] turns a [`JoinTable`] into an ordered field
//! list plus a positionally paired column-selection list. Order is
//! load-bearing: the destination bulk loader's file format is strictly
//! positional, so structural fields always come first, then the
//! relationship-type field (if any), then data fields in table-declared
//! order.

use super::error::MappingError;
use super::fields::CsvField;
use crate::config::Formatting;
use crate::models::{Column, JoinTable};
use std::collections::BTreeSet;

/// Ordered pairing of selection columns and output field descriptors.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnToCsvFieldMappings {
    mappings: Vec<(Column, CsvField)>,
}

impl ColumnToCsvFieldMappings {
    pub fn builder() -> ColumnToCsvFieldMappingsBuilder {
        ColumnToCsvFieldMappingsBuilder {
            mappings: Vec::new(),
            aliases: BTreeSet::new(),
        }
    }

    /// Output field descriptors in emission order.
    pub fn fields(&self) -> impl Iterator<Item = &CsvField> {
        self.mappings.iter().map(|(_, field)| field)
    }

    /// Selection columns, positionally paired with [`fields`](Self::fields).
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.mappings.iter().map(|(column, _)| column)
    }

    /// Selection expressions for the generated unload statement.
    pub fn column_expressions(&self) -> Vec<String> {
        self.columns().map(Column::name).collect()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Accumulates `(column, field)` pairs, rejecting alias collisions at build
/// time rather than detecting them later.
#[derive(Debug)]
pub struct ColumnToCsvFieldMappingsBuilder {
    mappings: Vec<(Column, CsvField)>,
    aliases: BTreeSet<String>,
}

impl ColumnToCsvFieldMappingsBuilder {
    pub fn add(&mut self, column: Column, field: CsvField) -> Result<(), MappingError> {
        if !self.aliases.insert(column.alias().to_string()) {
            return Err(MappingError::DuplicateAlias(column.alias().to_string()));
        }
        self.mappings.push((column, field));
        Ok(())
    }

    pub fn build(self) -> ColumnToCsvFieldMappings {
        ColumnToCsvFieldMappings {
            mappings: self.mappings,
        }
    }
}

/// Transforms a join table into CSV field mappings for the bulk loader.
///
/// The mapper is a pure transformation over in-memory schema metadata: no
/// shared mutable state, safe to invoke repeatedly and concurrently across
/// independent inputs.
#[derive(Debug, Clone)]
pub struct ColumnToCsvFieldMapper {
    formatting: Formatting,
}

impl ColumnToCsvFieldMapper {
    pub fn new(formatting: Formatting) -> Self {
        Self { formatting }
    }

    /// Build the ordered field and selection lists for one join table.
    ///
    /// A two-key join emits start-identifier, end-identifier and
    /// relationship-type entries; a one-key join emits a single identifier
    /// entry. Either is followed by one data entry per non-key column in
    /// table-declared order. Fails fast with a configuration error on alias
    /// collisions; no row is ever consulted.
    pub fn create_mappings(
        &self,
        join_table: &JoinTable,
    ) -> Result<ColumnToCsvFieldMappings, MappingError> {
        let mut builder = ColumnToCsvFieldMappings::builder();
        let join = join_table.join();

        let columns = join.columns(&self.formatting);
        let fields = join.field_mappings();
        for (column, field) in columns.into_iter().zip(fields) {
            builder.add(column, field)?;
        }

        for column in join_table.table().columns() {
            if join.uses_source_column(column) {
                continue;
            }
            column.add_data(&mut builder)?;
        }

        Ok(builder.build())
    }
}
