//! HTTP client and pagination for the IMPC Solr API.
//!
//! This crate provides the request pipeline:
//!
//! - [`url::select_url`] - Constructs select URLs
//! - [`SolrClient`] - HTTP client with connection pooling and retries
//! - [`count_docs`] - `rows=0` probe for the result count
//! - [`page_stream`] - Ordered async pagination
//! - [`fetch_all`] - Full retrieval into a [`impc_types::DataTable`]

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/mpi2/impc-api-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod pages;
pub mod url;

pub use client::{ClientConfig, RequestError, SolrClient};
pub use pages::{DocPage, count_docs, fetch_all, page_span, page_stream, page_stream_resilient};
