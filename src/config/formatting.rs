//! Output formatting policy
//!
//! A [`Formatting`] value is passed explicitly into the mapper, the statement
//! builders and the exporter; there is no process-wide default state.

use serde::{Deserialize, Serialize};

/// Quote character used for synthesized literal values such as
/// relationship-type labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteChar {
    DoubleQuotes,
    SingleQuotes,
}

impl QuoteChar {
    pub fn character(&self) -> char {
        match self {
            QuoteChar::DoubleQuotes => '"',
            QuoteChar::SingleQuotes => '\'',
        }
    }

    /// Wrap a value in this quote character.
    pub fn enquote(&self, value: &str) -> String {
        let quote = self.character();
        format!("{quote}{value}{quote}")
    }
}

/// Terminators and quoting for the generated CSV files.
///
/// The default matches the fixed export dialect expected by the bulk loader:
/// tab field terminator, newline line terminator, double-quoted literals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Formatting {
    pub field_terminator: String,
    pub line_terminator: String,
    pub quote: QuoteChar,
}

impl Default for Formatting {
    fn default() -> Self {
        Self {
            field_terminator: "\t".to_string(),
            line_terminator: "\n".to_string(),
            quote: QuoteChar::DoubleQuotes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enquote() {
        assert_eq!(QuoteChar::DoubleQuotes.enquote("STUDENT_COURSE"), "\"STUDENT_COURSE\"");
        assert_eq!(QuoteChar::SingleQuotes.enquote("x"), "'x'");
    }

    #[test]
    fn test_default_formatting() {
        let formatting = Formatting::default();

        assert_eq!(formatting.field_terminator, "\t");
        assert_eq!(formatting.line_terminator, "\n");
        assert_eq!(formatting.quote, QuoteChar::DoubleQuotes);
    }

    #[test]
    fn test_formatting_deserializes_with_defaults() {
        let formatting: Formatting = serde_json::from_str("{}").unwrap();

        assert_eq!(formatting, Formatting::default());
    }
}
