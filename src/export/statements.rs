//! Unload and load statement construction
//!
//! The generated statements use the fixed export dialect the bulk loader
//! expects: tab field terminator, empty enclosure, backslash escape, newline
//! line terminator. The selection list preserves mapper order exactly.

use crate::config::Formatting;
use crate::mapping::ColumnToCsvFieldMappings;
use crate::models::TableName;
use std::path::Path;

/// `SELECT ... INTO OUTFILE` statement unloading one table's mapped columns
/// to a CSV file.
pub fn unload_statement(
    table: &TableName,
    mappings: &ColumnToCsvFieldMappings,
    outfile: &Path,
    formatting: &Formatting,
) -> String {
    format!(
        "SELECT {columns} INTO OUTFILE '{outfile}' {clauses} FROM {table}",
        columns = mappings.column_expressions().join(", "),
        outfile = outfile.display(),
        clauses = dialect_clauses(formatting),
        table = table.name(),
    )
}

/// `LOAD DATA INFILE` statement reading a CSV file in the same dialect back
/// into a table.
pub fn load_statement(table: &TableName, infile: &Path, formatting: &Formatting) -> String {
    format!(
        "LOAD DATA INFILE '{infile}' INTO TABLE {table} {clauses}",
        infile = infile.display(),
        table = table.name(),
        clauses = dialect_clauses(formatting),
    )
}

fn dialect_clauses(formatting: &Formatting) -> String {
    format!(
        "FIELDS TERMINATED BY '{fields}' OPTIONALLY ENCLOSED BY '' ESCAPED BY '\\\\' \
         LINES TERMINATED BY '{lines}' STARTING BY ''",
        fields = sql_escape(&formatting.field_terminator),
        lines = sql_escape(&formatting.line_terminator),
    )
}

/// Render control characters as the escape sequences the SQL parser expects.
fn sql_escape(value: &str) -> String {
    value
        .chars()
        .map(|character| match character {
            '\t' => "\\t".to_string(),
            '\n' => "\\n".to_string(),
            '\r' => "\\r".to_string(),
            '\\' => "\\\\".to_string(),
            '\'' => "\\'".to_string(),
            other => other.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Formatting;
    use crate::mapping::{ColumnToCsvFieldMapper, CsvField, IdSpace};
    use crate::models::{
        Column, ColumnRole, Join, JoinKey, JoinTable, SimpleColumn, SqlDataType, Table,
    };
    use std::path::PathBuf;

    fn key_column(table: &TableName, name: &str, role: ColumnRole) -> Column {
        Column::Simple(SimpleColumn::new(
            table.clone(),
            table.fully_qualified_column_name(name),
            name,
            role,
            SqlDataType::KEY_DATA_TYPE,
        ))
    }

    fn student_course_mappings() -> (TableName, ColumnToCsvFieldMappings) {
        let name = TableName::new("test.Student_Course");
        let student = TableName::new("test.Student");
        let course = TableName::new("test.Course");

        let join = Join::many_to_many(
            JoinKey::new(
                key_column(&name, "studentId", ColumnRole::ForeignKey),
                key_column(&student, "id", ColumnRole::PrimaryKey),
            )
            .unwrap(),
            JoinKey::new(
                key_column(&name, "courseId", ColumnRole::ForeignKey),
                key_column(&course, "id", ColumnRole::PrimaryKey),
            )
            .unwrap(),
        )
        .unwrap();
        let table = Table::new(
            name.clone(),
            vec![
                key_column(&name, "studentId", ColumnRole::ForeignKey),
                key_column(&name, "courseId", ColumnRole::ForeignKey),
            ],
        );
        let join_table = JoinTable::new(join, table).unwrap();

        let mappings = ColumnToCsvFieldMapper::new(Formatting::default())
            .create_mappings(&join_table)
            .unwrap();
        (name, mappings)
    }

    #[test]
    fn test_unload_statement_carries_dialect_and_selection_order() {
        let (name, mappings) = student_course_mappings();

        let statement = unload_statement(
            &name,
            &mappings,
            &PathBuf::from("/tmp/Student_Course.csv"),
            &Formatting::default(),
        );

        assert_eq!(
            statement,
            "SELECT test.Student_Course.studentId, test.Student_Course.courseId, \
             \"STUDENT_COURSE\" INTO OUTFILE '/tmp/Student_Course.csv' \
             FIELDS TERMINATED BY '\\t' OPTIONALLY ENCLOSED BY '' ESCAPED BY '\\\\' \
             LINES TERMINATED BY '\\n' STARTING BY '' FROM test.Student_Course"
        );
    }

    #[test]
    fn test_load_statement_carries_dialect() {
        let statement = load_statement(
            &TableName::new("test.Student_Course"),
            &PathBuf::from("/tmp/Student_Course.csv"),
            &Formatting::default(),
        );

        assert_eq!(
            statement,
            "LOAD DATA INFILE '/tmp/Student_Course.csv' INTO TABLE test.Student_Course \
             FIELDS TERMINATED BY '\\t' OPTIONALLY ENCLOSED BY '' ESCAPED BY '\\\\' \
             LINES TERMINATED BY '\\n' STARTING BY ''"
        );
    }

    #[test]
    fn test_mappings_align_fields_and_columns() {
        let (_, mappings) = student_course_mappings();

        assert_eq!(mappings.len(), 3);
        let fields: Vec<CsvField> = mappings.fields().cloned().collect();
        assert_eq!(fields[0], CsvField::start_id(IdSpace::new("test.Student")));
    }
}
