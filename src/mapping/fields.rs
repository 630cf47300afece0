//! CSV field descriptors for the bulk graph loader
//!
//! A [`CsvField`] describes what one output column represents structurally:
//! a node identifier, a relationship endpoint, a relationship type, or a
//! named data property. [`CsvField::header_token`] renders the descriptor in
//! the loader's positional header format.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named partition of synthetic node identifiers, one per source table.
///
/// Identifiers are only unique within their originating table; the bulk
/// loader uses the space to disambiguate them. The space is derived from the
/// referenced table's configured name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdSpace(String);

impl IdSpace {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Property types understood by the destination graph database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphDataType {
    String,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Boolean,
}

impl GraphDataType {
    /// The type suffix used in loader header tokens, e.g. `credits:string`.
    pub fn header_name(&self) -> &'static str {
        match self {
            GraphDataType::String => "string",
            GraphDataType::Byte => "byte",
            GraphDataType::Short => "short",
            GraphDataType::Int => "int",
            GraphDataType::Long => "long",
            GraphDataType::Float => "float",
            GraphDataType::Double => "double",
            GraphDataType::Boolean => "boolean",
        }
    }
}

/// Structural role of one output CSV column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", rename_all = "snake_case")]
pub enum CsvField {
    /// Node identifier, optionally scoped to an identifier space
    Id {
        #[serde(skip_serializing_if = "Option::is_none")]
        id_space: Option<IdSpace>,
    },
    /// Relationship start endpoint
    StartId { id_space: IdSpace },
    /// Relationship end endpoint
    EndId { id_space: IdSpace },
    /// Relationship type label
    RelationshipType,
    /// Node label
    Label,
    /// Named, typed property
    Data { name: String, data_type: GraphDataType },
}

impl CsvField {
    pub fn id() -> Self {
        CsvField::Id { id_space: None }
    }

    pub fn id_in_space(id_space: IdSpace) -> Self {
        CsvField::Id {
            id_space: Some(id_space),
        }
    }

    pub fn start_id(id_space: IdSpace) -> Self {
        CsvField::StartId { id_space }
    }

    pub fn end_id(id_space: IdSpace) -> Self {
        CsvField::EndId { id_space }
    }

    pub fn relationship_type() -> Self {
        CsvField::RelationshipType
    }

    pub fn label() -> Self {
        CsvField::Label
    }

    pub fn data(name: impl Into<String>, data_type: GraphDataType) -> Self {
        CsvField::Data {
            name: name.into(),
            data_type,
        }
    }

    /// Render this field in the loader's header format.
    pub fn header_token(&self) -> String {
        match self {
            CsvField::Id { id_space: None } => ":ID".to_string(),
            CsvField::Id {
                id_space: Some(space),
            } => format!(":ID({})", space),
            CsvField::StartId { id_space } => format!(":START_ID({})", id_space),
            CsvField::EndId { id_space } => format!(":END_ID({})", id_space),
            CsvField::RelationshipType => ":TYPE".to_string(),
            CsvField::Label => ":LABEL".to_string(),
            CsvField::Data { name, data_type } => {
                format!("{}:{}", name, data_type.header_name())
            }
        }
    }
}
