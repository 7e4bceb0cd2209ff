//! JSON output format.

use impc_types::DataTable;
use serde_json::{Map, Value};
use std::io::Write;

use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
///
/// Rows are written as objects keyed by column name. Null cells are
/// omitted, so documents round-trip the way Solr returned them.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }

    /// Converts a table row back into a JSON object, dropping nulls.
    fn row_object(table: &DataTable, row: &[Value]) -> Value {
        let mut object = Map::new();
        for (column, value) in table.columns().iter().zip(row) {
            if !value.is_null() {
                object.insert(column.clone(), value.clone());
            }
        }
        Value::Object(object)
    }
}

impl Formatter for JsonFormatter {
    fn write_table<W: Write + Send>(
        &self,
        table: &DataTable,
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => {
                let objects: Vec<Value> = table
                    .rows()
                    .iter()
                    .map(|row| Self::row_object(table, row))
                    .collect();
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, &objects)?;
                } else {
                    serde_json::to_writer(&mut writer, &objects)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for row in table.rows() {
                    serde_json::to_writer(&mut writer, &Self::row_object(table, row))?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impc_types::Document;
    use serde_json::json;
    use std::io::Cursor;

    fn test_table() -> DataTable {
        let docs: Vec<Document> = vec![
            json!({"marker_symbol": "Nxn", "p_value": 0.001})
                .as_object()
                .unwrap()
                .clone(),
            json!({"marker_symbol": "Cib2"}).as_object().unwrap().clone(),
        ];
        DataTable::from_docs(&docs)
    }

    #[test]
    fn test_json_array() {
        let formatter = JsonFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter.write_table(&test_table(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.starts_with('['));
        assert!(result.contains("\"marker_symbol\":\"Nxn\""));
        // Null cells are dropped, not serialized
        assert!(!result.contains("null"));
    }

    #[test]
    fn test_ndjson() {
        let formatter = JsonFormatter::ndjson();
        let mut output = Cursor::new(Vec::new());

        formatter.write_table(&test_table(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('{'));
        assert_eq!(lines[1], "{\"marker_symbol\":\"Cib2\"}");
    }

    #[test]
    fn test_pretty_json() {
        let formatter = JsonFormatter::new().with_pretty(true);
        let mut output = Cursor::new(Vec::new());

        formatter.write_table(&test_table(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains('\n'));
        assert!(result.contains("  "));
    }
}
