//! Error types for impc-api.

use thiserror::Error;

/// Result type alias for impc-api operations.
pub type Result<T> = std::result::Result<T, ImpcError>;

/// Errors that can occur while querying the IMPC Solr API.
#[derive(Error, Debug)]
pub enum ImpcError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The requested Solr core does not exist.
    #[error("Unknown Solr core: {0}")]
    UnknownCore(String),

    /// Solr returned a non-success status.
    #[error("Solr returned status {status}: {body}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated for display.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("Response decode error: {0}")]
    Decode(String),

    /// Invalid query parameters.
    #[error(transparent)]
    Params(#[from] ParamsError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error for invalid query parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    /// Faceting was enabled without a field to facet on.
    #[error("facet.field must not be empty when faceting is enabled")]
    EmptyFacetField,

    /// A page size of zero would never make progress.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}
