//! Output formatters for tables retrieved from the IMPC Solr API.
//!
//! - [`Formatter`] - Common trait over output formats
//! - [`CsvFormatter`] - CSV/TSV
//! - [`JsonFormatter`] - JSON array and NDJSON
//! - [`ParquetFormatter`] - Apache Parquet with inferred column types

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/mpi2/impc-api-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

#[cfg(feature = "csv")]
mod csv;
mod formatter;
#[cfg(feature = "json")]
mod json;
#[cfg(feature = "parquet")]
mod parquet;

#[cfg(feature = "csv")]
pub use csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat};
#[cfg(feature = "json")]
pub use json::{JsonFormatter, JsonStyle};
#[cfg(feature = "parquet")]
pub use parquet::ParquetFormatter;
