//! CSV output format.

use impc_types::DataTable;
use serde_json::Value;
use std::io::Write;

use crate::{FormatError, Formatter};

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }

    /// Renders a JSON value as a CSV field, quoting when needed.
    fn field(&self, value: &Value) -> String {
        let raw = match value {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            // Multi-valued Solr fields stay JSON-encoded
            other => other.to_string(),
        };

        if raw.contains(self.delimiter) || raw.contains('"') || raw.contains('\n') {
            format!("\"{}\"", raw.replace('"', "\"\""))
        } else {
            raw
        }
    }
}

impl Formatter for CsvFormatter {
    fn write_table<W: Write + Send>(
        &self,
        table: &DataTable,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            let header: Vec<String> = table
                .columns()
                .iter()
                .map(|c| self.field(&Value::String(c.clone())))
                .collect();
            writeln!(writer, "{}", header.join(&d.to_string()))?;
        }

        for row in table.rows() {
            let fields: Vec<String> = row.iter().map(|v| self.field(v)).collect();
            writeln!(writer, "{}", fields.join(&d.to_string()))?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
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
            json!({"marker_symbol": "Nxn", "p_value": 1.5e-8, "zygosity": "homozygote"})
                .as_object()
                .unwrap()
                .clone(),
            json!({"marker_symbol": "Cib2", "zygosity": "heterozygote"})
                .as_object()
                .unwrap()
                .clone(),
        ];
        DataTable::from_docs(&docs)
    }

    #[test]
    fn test_csv_table() {
        let formatter = CsvFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter.write_table(&test_table(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        let lines: Vec<_> = result.lines().collect();
        assert_eq!(lines[0], "marker_symbol,p_value,zygosity");
        assert_eq!(lines[1], "Nxn,1.5e-8,homozygote");
        // Missing p_value renders as an empty field
        assert_eq!(lines[2], "Cib2,,heterozygote");
    }

    #[test]
    fn test_csv_no_header() {
        let formatter = CsvFormatter::new().with_header(false);
        let mut output = Cursor::new(Vec::new());

        formatter.write_table(&test_table(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(!result.contains("marker_symbol"));
    }

    #[test]
    fn test_csv_quoting() {
        let formatter = CsvFormatter::new();
        let docs: Vec<Document> = vec![
            json!({"mp_term_name": "abnormal heart, enlarged", "note": "say \"hi\""})
                .as_object()
                .unwrap()
                .clone(),
        ];
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_table(&DataTable::from_docs(&docs), &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains("\"abnormal heart, enlarged\""));
        assert!(result.contains("\"say \"\"hi\"\"\""));
    }

    #[test]
    fn test_csv_multivalued_field() {
        let formatter = CsvFormatter::new();
        let docs: Vec<Document> = vec![
            json!({"top_level_mp_term_name": ["cardiovascular system phenotype"]})
                .as_object()
                .unwrap()
                .clone(),
        ];
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_table(&DataTable::from_docs(&docs), &mut output)
            .unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains("[\"\"cardiovascular system phenotype\"\"]"));
    }

    #[test]
    fn test_tsv() {
        let formatter = CsvFormatter::tsv();
        let mut output = Cursor::new(Vec::new());

        formatter.write_table(&test_table(), &mut output).unwrap();

        let result = String::from_utf8(output.into_inner()).unwrap();
        assert!(result.contains("marker_symbol\tp_value\tzygosity"));
    }
}
