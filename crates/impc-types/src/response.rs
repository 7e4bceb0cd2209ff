//! Solr select response model.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A single Solr document.
///
/// IMPC documents carry core-specific fields, so they are kept as arbitrary
/// JSON objects rather than a fixed struct.
pub type Document = Map<String, Value>;

/// A parsed Solr select response.
#[derive(Debug, Clone, Deserialize)]
pub struct SolrResponse {
    /// Response header with status and timing.
    #[serde(rename = "responseHeader")]
    pub header: ResponseHeader,
    /// Response body with the matched documents.
    pub response: ResponseBody,
    /// Facet counts, present only for faceting queries.
    #[serde(default)]
    pub facet_counts: Option<FacetCounts>,
}

impl SolrResponse {
    /// Returns the total number of documents matching the query.
    #[must_use]
    pub const fn num_found(&self) -> u64 {
        self.response.num_found
    }

    /// Returns the documents in this response.
    #[must_use]
    pub fn docs(&self) -> &[Document] {
        &self.response.docs
    }
}

/// Solr response header.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ResponseHeader {
    /// Solr-internal status code (0 on success).
    #[serde(default)]
    pub status: i32,
    /// Query time in milliseconds.
    #[serde(rename = "QTime", default)]
    pub qtime: i32,
}

/// Solr response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseBody {
    /// Total number of documents matching the query.
    #[serde(rename = "numFound")]
    pub num_found: u64,
    /// Offset of the first returned document.
    #[serde(default)]
    pub start: u64,
    /// The returned documents.
    #[serde(default)]
    pub docs: Vec<Document>,
}

/// Facet counts section of a Solr response.
///
/// Solr encodes each faceted field as a flat array alternating labels and
/// counts: `["homozygote", 52460, "heterozygote", 46392, ...]`.
#[derive(Debug, Clone, Deserialize)]
pub struct FacetCounts {
    /// Facet field results, keyed by field name.
    #[serde(default)]
    pub facet_fields: HashMap<String, Vec<Value>>,
}

impl FacetCounts {
    /// Decodes the flat label/count array for a field into pairs.
    ///
    /// Returns `None` if the field was not faceted on or the array is
    /// malformed (odd length, non-string label, non-integer count).
    #[must_use]
    pub fn field_counts(&self, field: &str) -> Option<Vec<(String, u64)>> {
        let flat = self.facet_fields.get(field)?;
        if flat.len() % 2 != 0 {
            return None;
        }

        let mut counts = Vec::with_capacity(flat.len() / 2);
        for pair in flat.chunks_exact(2) {
            let label = pair[0].as_str()?.to_string();
            let count = pair[1].as_u64()?;
            counts.push((label, count));
        }
        Some(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_select_response() {
        let raw = json!({
            "responseHeader": {"status": 0, "QTime": 4},
            "response": {
                "numFound": 2,
                "start": 0,
                "docs": [
                    {"marker_symbol": "Nxn", "zygosity": "homozygote"},
                    {"marker_symbol": "Cib2", "p_value": 1.5e-8}
                ]
            }
        });

        let response: SolrResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.num_found(), 2);
        assert_eq!(response.docs().len(), 2);
        assert_eq!(response.header.qtime, 4);
        assert!(response.facet_counts.is_none());
    }

    #[test]
    fn test_decode_facet_response() {
        let raw = json!({
            "responseHeader": {"status": 0, "QTime": 12},
            "response": {"numFound": 98852, "start": 0, "docs": []},
            "facet_counts": {
                "facet_fields": {
                    "zygosity": ["homozygote", 52460, "heterozygote", 46392]
                }
            }
        });

        let response: SolrResponse = serde_json::from_value(raw).unwrap();
        let counts = response
            .facet_counts
            .unwrap()
            .field_counts("zygosity")
            .unwrap();

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0], ("homozygote".to_string(), 52460));
        assert_eq!(counts[1], ("heterozygote".to_string(), 46392));
    }

    #[test]
    fn test_field_counts_missing_field() {
        let facets = FacetCounts {
            facet_fields: HashMap::new(),
        };
        assert!(facets.field_counts("zygosity").is_none());
    }

    #[test]
    fn test_field_counts_malformed() {
        let mut facet_fields = HashMap::new();
        facet_fields.insert(
            "zygosity".to_string(),
            vec![Value::from("homozygote"), Value::from(1), Value::from("x")],
        );
        let facets = FacetCounts { facet_fields };
        assert!(facets.field_counts("zygosity").is_none());
    }
}
