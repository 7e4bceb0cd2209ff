//! Rust library for querying the IMPC Solr API.
//!
//! This is a facade crate that re-exports functionality from the impc-api
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use impc_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SolrClient::with_defaults()?;
//!
//!     let params = QueryParams::new()
//!         .with_rows(10)
//!         .with_fields(["marker_symbol", "allele_symbol", "parameter_stable_id"]);
//!
//!     let response = client.select("genotype-phenotype", &params).await?;
//!     println!("Found {} documents", response.num_found());
//!
//!     let table = DataTable::from_docs(response.docs());
//!     println!("{} rows x {} columns", table.len(), table.width());
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/mpi2/impc-api-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use impc_types::*;

// Re-export the core registry
#[cfg(feature = "cores")]
pub use impc_cores::{CoreRegistry, ValidationError};

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use impc_fetch::{
    ClientConfig, DocPage, RequestError, SolrClient, count_docs, fetch_all, page_span,
    page_stream, page_stream_resilient,
};

// Re-export formatters
#[cfg(feature = "format")]
pub use impc_format::{CsvFormatter, FormatError, Formatter, JsonFormatter, OutputFormat};

#[cfg(all(feature = "format", feature = "parquet"))]
pub use impc_format::ParquetFormatter;

/// Prelude module for convenient imports.
///
/// ```
/// use impc_lib::prelude::*;
/// ```
pub mod prelude {
    pub use impc_types::{
        CoreInfo, DataTable, Document, FacetParams, ImpcError, ParamsError, QueryParams, Result,
        SolrResponse,
    };

    #[cfg(feature = "cores")]
    pub use impc_cores::{CoreRegistry, ValidationError};

    #[cfg(feature = "fetch")]
    pub use impc_fetch::{
        ClientConfig, DocPage, SolrClient, count_docs, fetch_all, page_span, page_stream,
        page_stream_resilient,
    };

    #[cfg(feature = "format")]
    pub use impc_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};

    #[cfg(all(feature = "format", feature = "parquet"))]
    pub use impc_format::ParquetFormatter;
}
