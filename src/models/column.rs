//! Column model
//!
//! A [`Column`] is a closed sum over two variants: [`SimpleColumn`] (one
//! physical column, or a synthesized literal) and [`CompositeColumn`] (an
//! ordered group of physical columns forming one logical key). The variant
//! set is fixed; every consumer matches it exhaustively.
//!
//! Columns round-trip through a JSON interchange document whose `type` tag
//! (`"SimpleColumn"` / `"CompositeColumn"`, case-insensitive on read) selects
//! the variant.

use super::error::ConfigError;
use super::table_name::TableName;
use crate::export::row::{RowAccessor, RowError};
use crate::mapping::fields::{CsvField, GraphDataType};
use crate::mapping::mapper::ColumnToCsvFieldMappingsBuilder;
use crate::mapping::MappingError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

/// Structural classification of a column, deciding whether it becomes an
/// identifier/relationship field or a data property in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColumnRole {
    PrimaryKey,
    ForeignKey,
    Data,
}

impl ColumnRole {
    pub fn is_key(&self) -> bool {
        matches!(self, ColumnRole::PrimaryKey | ColumnRole::ForeignKey)
    }
}

/// Source SQL data types, mapped to the nearest graph property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SqlDataType {
    Char,
    Varchar,
    Text,
    TinyInt,
    SmallInt,
    MediumInt,
    Int,
    BigInt,
    Decimal,
    Float,
    Double,
    Bit,
    Date,
    Time,
    DateTime,
    Timestamp,
    Blob,
}

impl SqlDataType {
    /// Placeholder type for key columns, whose values are treated as opaque
    /// identifiers rather than typed properties.
    pub const KEY_DATA_TYPE: SqlDataType = SqlDataType::Text;

    pub fn graph_data_type(&self) -> GraphDataType {
        match self {
            SqlDataType::Char
            | SqlDataType::Varchar
            | SqlDataType::Text
            | SqlDataType::Date
            | SqlDataType::Time
            | SqlDataType::DateTime
            | SqlDataType::Timestamp
            | SqlDataType::Blob => GraphDataType::String,
            SqlDataType::TinyInt => GraphDataType::Byte,
            SqlDataType::SmallInt => GraphDataType::Short,
            SqlDataType::MediumInt | SqlDataType::Int => GraphDataType::Int,
            SqlDataType::BigInt => GraphDataType::Long,
            SqlDataType::Float => GraphDataType::Float,
            SqlDataType::Decimal | SqlDataType::Double => GraphDataType::Double,
            SqlDataType::Bit => GraphDataType::Boolean,
        }
    }
}

/// One physical column, or a synthesized literal value such as a
/// relationship-type label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleColumn {
    table: TableName,
    name: String,
    alias: String,
    roles: BTreeSet<ColumnRole>,
    sql_data_type: SqlDataType,
    #[serde(default)]
    use_quotes: bool,
}

impl SimpleColumn {
    /// A physical column with a single role, named by its fully-qualified
    /// source expression.
    pub fn new(
        table: TableName,
        name: impl Into<String>,
        alias: impl Into<String>,
        role: ColumnRole,
        sql_data_type: SqlDataType,
    ) -> Self {
        Self {
            table,
            name: name.into(),
            alias: alias.into(),
            roles: BTreeSet::from([role]),
            sql_data_type,
            use_quotes: false,
        }
    }

    /// A physical column carrying several roles at once (e.g. a key that is
    /// also exported as data). The role set must not be empty.
    pub fn with_roles(
        table: TableName,
        name: impl Into<String>,
        alias: impl Into<String>,
        roles: BTreeSet<ColumnRole>,
        sql_data_type: SqlDataType,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if roles.is_empty() {
            return Err(ConfigError::EmptyRoles(name));
        }
        Ok(Self {
            table,
            name,
            alias: alias.into(),
            roles,
            sql_data_type,
            use_quotes: false,
        })
    }

    /// A synthesized literal column. The value is stored verbatim as the
    /// column's name and emitted as-is in selection lists.
    pub fn literal(table: TableName, value: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            table,
            name: value.into(),
            alias: alias.into(),
            roles: BTreeSet::from([ColumnRole::Data]),
            sql_data_type: SqlDataType::KEY_DATA_TYPE,
            use_quotes: true,
        }
    }
}

/// An ordered group of 2+ physical columns forming one logical key or value.
///
/// The composite value is the member values joined with `_` in declared
/// order, and is null whenever any single member is null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeColumn {
    table: TableName,
    member_names: Vec<String>,
    alias: String,
    roles: BTreeSet<ColumnRole>,
    sql_data_type: SqlDataType,
}

impl CompositeColumn {
    pub fn new(
        table: TableName,
        member_names: Vec<String>,
        alias: impl Into<String>,
        role: ColumnRole,
        sql_data_type: SqlDataType,
    ) -> Result<Self, ConfigError> {
        let alias = alias.into();
        if member_names.len() < 2 {
            return Err(ConfigError::TooFewMembers(alias));
        }
        Ok(Self {
            table,
            member_names,
            alias,
            roles: BTreeSet::from([role]),
            sql_data_type,
        })
    }

    pub fn member_names(&self) -> &[String] {
        &self.member_names
    }

    /// The SQL expression combining the members, e.g.
    /// `CONCAT(test.Users.first_name, '_', test.Users.last_name)`.
    fn combination_expression(&self) -> String {
        let qualified: Vec<String> = self
            .member_names
            .iter()
            .map(|member| self.table.fully_qualified_column_name(member))
            .collect();
        format!("CONCAT({})", qualified.join(", '_', "))
    }
}

/// Polymorphic column capability, dispatched over the two variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Simple(SimpleColumn),
    Composite(CompositeColumn),
}

impl Column {
    /// The owning table.
    pub fn table(&self) -> &TableName {
        match self {
            Column::Simple(column) => &column.table,
            Column::Composite(column) => &column.table,
        }
    }

    /// Fully-qualified source expression, literal text for synthesized
    /// literal columns, or the member-combination expression for composite
    /// columns.
    pub fn name(&self) -> String {
        match self {
            Column::Simple(column) => column.name.clone(),
            Column::Composite(column) => column.combination_expression(),
        }
    }

    /// The name used in the output field list; unique within one mapping.
    pub fn alias(&self) -> &str {
        match self {
            Column::Simple(column) => &column.alias,
            Column::Composite(column) => &column.alias,
        }
    }

    /// Non-empty subset of `{PrimaryKey, ForeignKey, Data}`.
    pub fn roles(&self) -> &BTreeSet<ColumnRole> {
        match self {
            Column::Simple(column) => &column.roles,
            Column::Composite(column) => &column.roles,
        }
    }

    pub fn is_key(&self) -> bool {
        self.roles().iter().any(ColumnRole::is_key)
    }

    pub fn sql_data_type(&self) -> SqlDataType {
        match self {
            Column::Simple(column) => column.sql_data_type,
            Column::Composite(column) => column.sql_data_type,
        }
    }

    /// Whether the emitted value must be quoted in the destination format.
    pub fn use_quotes(&self) -> bool {
        match self {
            Column::Simple(column) => column.use_quotes,
            Column::Composite(_) => false,
        }
    }

    /// The value to emit for this column from one source row.
    ///
    /// Simple columns are looked up by alias. Composite columns look up every
    /// member by name in declared order and join the values with `_`; the
    /// result is null when any member is null. Row-accessor failures
    /// propagate unmodified.
    pub fn select_from(&self, row: &dyn RowAccessor) -> Result<Option<String>, RowError> {
        match self {
            Column::Simple(column) => row.value(&column.alias),
            Column::Composite(column) => {
                let mut values = Vec::with_capacity(column.member_names.len());
                for member in &column.member_names {
                    match row.value(member)? {
                        Some(value) => values.push(value),
                        None => return Ok(None),
                    }
                }
                Ok(Some(values.join("_")))
            }
        }
    }

    /// Append this column's contribution to the running field mapping: one
    /// data field for data columns, nothing for key columns already
    /// represented by identifier fields.
    pub fn add_data(
        &self,
        builder: &mut ColumnToCsvFieldMappingsBuilder,
    ) -> Result<(), MappingError> {
        if self.is_key() {
            return Ok(());
        }
        let field = CsvField::data(self.alias(), self.sql_data_type().graph_data_type());
        builder.add(self.clone(), field)
    }

    /// Serialize to the interchange document.
    pub fn to_json(&self) -> Value {
        let (tag, mut document) = match self {
            Column::Simple(column) => ("SimpleColumn", serde_json::json!(column)),
            Column::Composite(column) => ("CompositeColumn", serde_json::json!(column)),
        };
        document["type"] = Value::String(tag.to_string());
        document
    }

    /// Deserialize from the interchange document. The `type` tag is matched
    /// case-insensitively; an unrecognized tag is a fatal configuration
    /// error.
    pub fn from_json(root: &Value) -> Result<Self, ConfigError> {
        let tag = root
            .get("type")
            .and_then(Value::as_str)
            .ok_or(ConfigError::MissingField {
                field: "type",
                context: "column document",
            })?;

        if tag.eq_ignore_ascii_case("SimpleColumn") {
            let column: SimpleColumn = serde_json::from_value(root.clone())?;
            if column.roles.is_empty() {
                return Err(ConfigError::EmptyRoles(column.name));
            }
            Ok(Column::Simple(column))
        } else if tag.eq_ignore_ascii_case("CompositeColumn") {
            let column: CompositeColumn = serde_json::from_value(root.clone())?;
            if column.roles.is_empty() {
                return Err(ConfigError::EmptyRoles(column.alias));
            }
            if column.member_names.len() < 2 {
                return Err(ConfigError::TooFewMembers(column.alias));
            }
            Ok(Column::Composite(column))
        } else {
            Err(ConfigError::UnrecognizedColumnType(tag.to_string()))
        }
    }
}

impl From<SimpleColumn> for Column {
    fn from(column: SimpleColumn) -> Self {
        Column::Simple(column)
    }
}

impl From<CompositeColumn> for Column {
    fn from(column: CompositeColumn) -> Self {
        Column::Composite(column)
    }
}

impl Serialize for Column {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Column {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Column::from_json(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn users() -> TableName {
        TableName::new("test.Users")
    }

    fn key_column(name: &str, role: ColumnRole) -> Column {
        Column::Simple(SimpleColumn::new(
            users(),
            users().fully_qualified_column_name(name),
            name,
            role,
            SqlDataType::KEY_DATA_TYPE,
        ))
    }

    fn composite_name_column() -> Column {
        CompositeColumn::new(
            users(),
            vec!["first_name".to_string(), "last_name".to_string()],
            "name",
            ColumnRole::PrimaryKey,
            SqlDataType::KEY_DATA_TYPE,
        )
        .unwrap()
        .into()
    }

    #[test]
    fn test_simple_column_accessors() {
        let column = key_column("id", ColumnRole::PrimaryKey);

        assert_eq!(column.table(), &users());
        assert_eq!(column.name(), "test.Users.id");
        assert_eq!(column.alias(), "id");
        assert!(column.is_key());
        assert!(!column.use_quotes());
    }

    #[test]
    fn test_literal_column_uses_quotes() {
        let column = Column::Simple(SimpleColumn::literal(
            TableName::new("test.Student_Course"),
            "\"STUDENT_COURSE\"",
            "STUDENT_COURSE",
        ));

        assert!(column.use_quotes());
        assert_eq!(column.name(), "\"STUDENT_COURSE\"");
        assert!(!column.is_key());
    }

    #[test]
    fn test_composite_column_requires_two_members() {
        let result = CompositeColumn::new(
            users(),
            vec!["first_name".to_string()],
            "name",
            ColumnRole::PrimaryKey,
            SqlDataType::KEY_DATA_TYPE,
        );

        assert!(matches!(result, Err(ConfigError::TooFewMembers(_))));
    }

    #[test]
    fn test_composite_column_combination_expression() {
        let column = composite_name_column();

        assert_eq!(
            column.name(),
            "CONCAT(test.Users.first_name, '_', test.Users.last_name)"
        );
    }

    #[test]
    fn test_select_from_simple_column() {
        let row: HashMap<String, Option<String>> =
            HashMap::from([("id".to_string(), Some("1".to_string()))]);
        let column = key_column("id", ColumnRole::PrimaryKey);

        assert_eq!(column.select_from(&row).unwrap(), Some("1".to_string()));
    }

    #[test]
    fn test_select_from_composite_column_joins_members() {
        let row: HashMap<String, Option<String>> = HashMap::from([
            ("first_name".to_string(), Some("Boaty".to_string())),
            ("last_name".to_string(), Some("Mc.Boatface".to_string())),
        ]);

        assert_eq!(
            composite_name_column().select_from(&row).unwrap(),
            Some("Boaty_Mc.Boatface".to_string())
        );
    }

    #[test]
    fn test_select_from_composite_column_null_when_any_member_null() {
        let row: HashMap<String, Option<String>> = HashMap::from([
            ("first_name".to_string(), Some("Boaty".to_string())),
            ("last_name".to_string(), None),
        ]);

        assert_eq!(composite_name_column().select_from(&row).unwrap(), None);
    }

    #[test]
    fn test_simple_column_json_round_trip() {
        let column = key_column("id", ColumnRole::PrimaryKey);
        let document = column.to_json();

        assert_eq!(document["type"], "SimpleColumn");
        assert_eq!(Column::from_json(&document).unwrap(), column);
    }

    #[test]
    fn test_composite_column_json_round_trip() {
        let column = composite_name_column();
        let document = column.to_json();

        assert_eq!(document["type"], "CompositeColumn");
        assert_eq!(Column::from_json(&document).unwrap(), column);
    }

    #[test]
    fn test_from_json_tag_is_case_insensitive() {
        let mut document = key_column("id", ColumnRole::PrimaryKey).to_json();
        document["type"] = Value::String("simplecolumn".to_string());

        assert!(Column::from_json(&document).is_ok());
    }

    #[test]
    fn test_from_json_rejects_unrecognized_tag() {
        let mut document = key_column("id", ColumnRole::PrimaryKey).to_json();
        document["type"] = Value::String("FancyColumn".to_string());

        let result = Column::from_json(&document);
        assert!(matches!(
            result,
            Err(ConfigError::UnrecognizedColumnType(tag)) if tag == "FancyColumn"
        ));
    }

    #[test]
    fn test_sql_data_type_graph_mapping() {
        assert_eq!(SqlDataType::Varchar.graph_data_type(), GraphDataType::String);
        assert_eq!(SqlDataType::TinyInt.graph_data_type(), GraphDataType::Byte);
        assert_eq!(SqlDataType::Int.graph_data_type(), GraphDataType::Int);
        assert_eq!(SqlDataType::BigInt.graph_data_type(), GraphDataType::Long);
        assert_eq!(SqlDataType::Decimal.graph_data_type(), GraphDataType::Double);
        assert_eq!(SqlDataType::Bit.graph_data_type(), GraphDataType::Boolean);
    }
}
