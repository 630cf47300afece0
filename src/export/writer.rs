//! Delimited row emission with admission filtering
//!
//! [`CsvRowWriter`] materializes mapped rows as delimited lines, consulting a
//! [`RowStrategy`] per row so that rows with null keys never reach the bulk
//! loader. Values are looked up through the same [`RowAccessor`] contract the
//! strategy uses; null values are emitted as empty fields.

use super::error::ExportError;
use super::row::RowAccessor;
use super::strategy::RowStrategy;
use crate::config::Formatting;
use crate::models::Column;
use std::io::Write;

pub struct CsvRowWriter {
    formatting: Formatting,
    strategy: RowStrategy,
}

impl CsvRowWriter {
    pub fn new(formatting: Formatting, strategy: RowStrategy) -> Self {
        Self {
            formatting,
            strategy,
        }
    }

    /// Write every admitted row as one delimited line, returning the number
    /// of rows written. Row-access failures abort the whole step; they are
    /// never treated as a rejection.
    pub fn write_rows<W, I, R>(
        &self,
        writer: &mut W,
        columns: &[Column],
        rows: I,
    ) -> Result<usize, ExportError>
    where
        W: Write,
        I: IntoIterator<Item = R>,
        R: RowAccessor,
    {
        let mut written = 0usize;
        for row in rows {
            if !self.strategy.test(&row, columns)? {
                continue;
            }
            let mut values = Vec::with_capacity(columns.len());
            for column in columns {
                values.push(column.select_from(&row)?.unwrap_or_default());
            }
            writer.write_all(values.join(self.formatting.field_terminator.as_str()).as_bytes())?;
            writer.write_all(self.formatting.line_terminator.as_bytes())?;
            written += 1;
        }
        Ok(written)
    }
}
