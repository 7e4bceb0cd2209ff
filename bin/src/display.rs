//! Display utilities and output writing for the impc CLI.

use anyhow::Result;
use clap::ValueEnum;
use impc_lib::prelude::*;
use serde_json::Value;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Maximum rows shown in a stdout preview.
pub(crate) const PREVIEW_ROWS: usize = 15;

/// Maximum rendered width of a preview cell.
const CELL_WIDTH: usize = 40;

/// Output format for retrieved data.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
    Parquet,
}

impl Format {
    /// Returns the file extension for this format.
    pub(crate) const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Parquet => "parquet",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Write a table to a file in the specified format.
pub(crate) fn write_table(table: &DataTable, output: &Path, format: Format) -> Result<()> {
    let file = File::create(output)?;
    let writer = BufWriter::new(file);

    match format {
        Format::Csv => {
            let formatter = CsvFormatter::new();
            formatter.write_table(table, writer)?;
        }
        Format::Json => {
            let formatter = JsonFormatter::new();
            formatter.write_table(table, writer)?;
        }
        Format::Ndjson => {
            let formatter = JsonFormatter::ndjson();
            formatter.write_table(table, writer)?;
        }
        Format::Parquet => {
            #[cfg(feature = "parquet")]
            {
                let formatter = ParquetFormatter::new();
                formatter.write_table(table, writer)?;
            }
            #[cfg(not(feature = "parquet"))]
            {
                anyhow::bail!("Parquet support not compiled in");
            }
        }
    }

    Ok(())
}

/// Renders a cell value for the preview.
fn cell(value: &Value) -> String {
    let raw = match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    if raw.chars().count() > CELL_WIDTH {
        let truncated: String = raw.chars().take(CELL_WIDTH - 3).collect();
        format!("{truncated}...")
    } else {
        raw
    }
}

/// Prints a column-aligned preview of the first [`PREVIEW_ROWS`] rows.
pub(crate) fn print_preview(table: &DataTable) {
    if table.width() == 0 {
        println!("(empty table)");
        return;
    }

    let head = table.head(PREVIEW_ROWS);
    let rendered: Vec<Vec<String>> = head
        .rows()
        .iter()
        .map(|row| row.iter().map(cell).collect())
        .collect();

    let widths: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rendered
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = table
        .columns()
        .iter()
        .zip(widths.iter().copied())
        .map(|(column, width)| format!("{column:<width$}"))
        .collect();
    println!("{}", header.join("  "));
    println!("{}", "-".repeat(widths.iter().sum::<usize>() + 2 * (widths.len() - 1)));

    for row in &rendered {
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter().copied())
            .map(|(value, width)| format!("{value:<width$}"))
            .collect();
        println!("{}", line.join("  "));
    }

    if table.len() > PREVIEW_ROWS {
        println!("... ({} more rows)", table.len() - PREVIEW_ROWS);
    }
}
