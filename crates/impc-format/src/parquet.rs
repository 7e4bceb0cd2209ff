//! Apache Parquet output format.

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use impc_types::DataTable;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter};

/// Inferred Arrow type for a table column.
///
/// Solr documents have no fixed schema, so each column's type is inferred
/// from its values. Mixed or nested columns fall back to JSON-encoded
/// strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Boolean,
    Int64,
    Float64,
    Utf8,
}

impl ColumnType {
    /// Widens `self` to also accommodate `other`.
    const fn merge(self, other: Self) -> Self {
        match (self, other) {
            (a, b) if a as u8 == b as u8 => a,
            (Self::Int64, Self::Float64) | (Self::Float64, Self::Int64) => Self::Float64,
            _ => Self::Utf8,
        }
    }

    const fn data_type(self) -> DataType {
        match self {
            Self::Boolean => DataType::Boolean,
            Self::Int64 => DataType::Int64,
            Self::Float64 => DataType::Float64,
            Self::Utf8 => DataType::Utf8,
        }
    }
}

/// Infers the Arrow type of one column from its values.
fn infer_column<'a>(values: impl Iterator<Item = &'a Value>) -> ColumnType {
    let mut inferred: Option<ColumnType> = None;

    for value in values {
        let ty = match value {
            Value::Null => continue,
            Value::Bool(_) => ColumnType::Boolean,
            Value::Number(n) if n.is_i64() => ColumnType::Int64,
            Value::Number(n) if n.is_u64() => {
                // u64 values above i64::MAX lose precision as Int64
                if n.as_u64().is_some_and(|v| v <= i64::MAX as u64) {
                    ColumnType::Int64
                } else {
                    ColumnType::Float64
                }
            }
            Value::Number(_) => ColumnType::Float64,
            Value::String(_) => ColumnType::Utf8,
            // Multi-valued or nested fields
            _ => return ColumnType::Utf8,
        };
        inferred = Some(inferred.map_or(ty, |prev| prev.merge(ty)));
    }

    inferred.unwrap_or(ColumnType::Utf8)
}

/// Renders a value as a string cell for a Utf8 column.
fn utf8_cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Infers the Arrow schema for a table.
    fn table_schema(table: &DataTable) -> (Schema, Vec<ColumnType>) {
        let mut fields = Vec::with_capacity(table.width());
        let mut types = Vec::with_capacity(table.width());

        for (i, column) in table.columns().iter().enumerate() {
            let ty = infer_column(table.rows().iter().map(|row| &row[i]));
            fields.push(Field::new(column, ty.data_type(), true));
            types.push(ty);
        }

        (Schema::new(fields), types)
    }

    /// Converts a table to an Arrow RecordBatch.
    fn table_to_batch(
        table: &DataTable,
        schema: Arc<Schema>,
        types: &[ColumnType],
    ) -> Result<RecordBatch, FormatError> {
        let mut arrays: Vec<ArrayRef> = Vec::with_capacity(table.width());

        for (i, ty) in types.iter().enumerate() {
            let column = table.rows().iter().map(|row| &row[i]);
            let array: ArrayRef = match ty {
                ColumnType::Boolean => Arc::new(
                    column
                        .map(Value::as_bool)
                        .collect::<BooleanArray>(),
                ),
                ColumnType::Int64 => Arc::new(
                    column.map(Value::as_i64).collect::<Int64Array>(),
                ),
                ColumnType::Float64 => Arc::new(
                    column.map(Value::as_f64).collect::<Float64Array>(),
                ),
                ColumnType::Utf8 => Arc::new(
                    column.map(utf8_cell).collect::<StringArray>(),
                ),
            };
            arrays.push(array);
        }

        RecordBatch::try_new(schema, arrays).map_err(|e| FormatError::Parquet(e.to_string()))
    }
}

impl Formatter for ParquetFormatter {
    fn write_table<W: Write + Send>(
        &self,
        table: &DataTable,
        writer: W,
    ) -> Result<(), FormatError> {
        let (schema, types) = Self::table_schema(table);
        let schema = Arc::new(schema);

        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut arrow_writer = ArrowWriter::try_new(writer, schema.clone(), Some(props))
            .map_err(|e| FormatError::Parquet(e.to_string()))?;

        if table.width() > 0 {
            let batch = Self::table_to_batch(table, schema, &types)?;
            arrow_writer
                .write(&batch)
                .map_err(|e| FormatError::Parquet(e.to_string()))?;
        }

        arrow_writer
            .close()
            .map_err(|e| FormatError::Parquet(e.to_string()))?;
        Ok(())
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impc_types::Document;
    use serde_json::json;

    fn docs(values: &[Value]) -> Vec<Document> {
        values
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    #[test]
    fn test_infer_column_types() {
        let table = DataTable::from_docs(&docs(&[
            json!({"symbol": "Nxn", "p_value": 1.5e-8, "count": 3, "significant": true}),
            json!({"symbol": "Cib2", "count": 7}),
        ]));
        let (schema, _) = ParquetFormatter::table_schema(&table);

        assert_eq!(schema.field_with_name("symbol").unwrap().data_type(), &DataType::Utf8);
        assert_eq!(
            schema.field_with_name("p_value").unwrap().data_type(),
            &DataType::Float64
        );
        assert_eq!(schema.field_with_name("count").unwrap().data_type(), &DataType::Int64);
        assert_eq!(
            schema.field_with_name("significant").unwrap().data_type(),
            &DataType::Boolean
        );
    }

    #[test]
    fn test_mixed_column_widens() {
        // Int then float widens to Float64
        let table = DataTable::from_docs(&docs(&[json!({"x": 1}), json!({"x": 1.5})]));
        let (schema, _) = ParquetFormatter::table_schema(&table);
        assert_eq!(schema.field_with_name("x").unwrap().data_type(), &DataType::Float64);

        // Int then string falls back to Utf8
        let table = DataTable::from_docs(&docs(&[json!({"x": 1}), json!({"x": "a"})]));
        let (schema, _) = ParquetFormatter::table_schema(&table);
        assert_eq!(schema.field_with_name("x").unwrap().data_type(), &DataType::Utf8);
    }

    #[test]
    fn test_nested_column_is_utf8() {
        let table = DataTable::from_docs(&docs(&[
            json!({"top_level_mp_term_name": ["cardiovascular system phenotype"]}),
        ]));
        let (schema, _) = ParquetFormatter::table_schema(&table);
        assert_eq!(
            schema
                .field_with_name("top_level_mp_term_name")
                .unwrap()
                .data_type(),
            &DataType::Utf8
        );
    }

    #[test]
    fn test_write_roundtrip_bytes() {
        let formatter = ParquetFormatter::new().with_row_group_size(10);
        let table = DataTable::from_docs(&docs(&[
            json!({"marker_symbol": "Nxn", "p_value": 0.001}),
            json!({"marker_symbol": "Cib2"}),
        ]));

        let mut buffer = Vec::new();
        formatter.write_table(&table, &mut buffer).unwrap();

        // Parquet magic at both ends of the file
        assert_eq!(&buffer[0..4], b"PAR1");
        assert_eq!(&buffer[buffer.len() - 4..], b"PAR1");
    }

    #[test]
    fn test_write_zero_row_table() {
        let formatter = ParquetFormatter::new();
        let table = DataTable::new(vec!["marker_symbol".to_string()]);

        let mut buffer = Vec::new();
        formatter.write_table(&table, &mut buffer).unwrap();

        assert_eq!(&buffer[0..4], b"PAR1");
    }
}
