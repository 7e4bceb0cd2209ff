//! Tabular assembly of Solr documents.

use serde_json::Value;
use std::collections::HashMap;

use crate::Document;

/// A column-ordered table assembled from Solr documents.
///
/// IMPC documents are sparse: not every document carries every field.
/// Column order is first-seen order across the documents, and absent
/// values are represented as JSON null, so pages retrieved separately
/// concatenate into a consistent table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl DataTable {
    /// Creates an empty table with the given columns.
    #[must_use]
    pub const fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a table from Solr documents, preserving document order.
    #[must_use]
    pub fn from_docs(docs: &[Document]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for doc in docs {
            for key in doc.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = docs
            .iter()
            .map(|doc| {
                columns
                    .iter()
                    .map(|col| doc.get(col).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// Builds a two-column table from facet counts.
    ///
    /// The first column is named after the faceted field, the second
    /// `count_per_category`.
    #[must_use]
    pub fn from_facet(field: &str, counts: &[(String, u64)]) -> Self {
        let columns = vec![field.to_string(), "count_per_category".to_string()];
        let rows = counts
            .iter()
            .map(|(label, count)| vec![Value::String(label.clone()), Value::from(*count)])
            .collect();

        Self { columns, rows }
    }

    /// Returns the column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.columns.len()
    }

    /// Returns a copy of the first `n` rows.
    #[must_use]
    pub fn head(&self, n: usize) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Appends another table's rows, merging columns.
    ///
    /// Columns unseen so far are added at the end and existing rows are
    /// padded with nulls; the appended rows are remapped into this table's
    /// column order.
    pub fn append(&mut self, other: Self) {
        if self.columns.is_empty() {
            *self = other;
            return;
        }

        for col in &other.columns {
            if !self.columns.iter().any(|c| c == col) {
                self.columns.push(col.clone());
                for row in &mut self.rows {
                    row.push(Value::Null);
                }
            }
        }

        let index: HashMap<&str, usize> = other
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();

        for row in other.rows {
            let mut source: Vec<Option<Value>> = row.into_iter().map(Some).collect();
            let remapped = self
                .columns
                .iter()
                .map(|col| {
                    index
                        .get(col.as_str())
                        .and_then(|&i| source[i].take())
                        .unwrap_or(Value::Null)
                })
                .collect();
            self.rows.push(remapped);
        }
    }
}
