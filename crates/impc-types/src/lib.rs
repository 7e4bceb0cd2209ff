//! Core types for the impc-api Solr client.
//!
//! This crate provides the fundamental data structures used throughout
//! impc-api:
//!
//! - [`QueryParams`] - Builder for Solr select query parameters
//! - [`SolrResponse`] - Parsed Solr select response
//! - [`DataTable`] - Column-ordered table assembled from Solr documents
//! - [`CoreInfo`] - Metadata for an IMPC Solr core
//! - [`ImpcError`] - Workspace-wide error type

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/mpi2/impc-api-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod core_info;
mod error;
mod params;
mod response;
mod table;

pub use core_info::CoreInfo;
pub use error::{ImpcError, ParamsError, Result};
pub use params::{FacetParams, QueryParams};
pub use response::{Document, FacetCounts, ResponseBody, ResponseHeader, SolrResponse};
pub use table::DataTable;
