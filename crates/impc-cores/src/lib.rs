//! Registry of IMPC Solr cores.
//!
//! This crate provides access to the list of public IMPC Solr cores with
//! their metadata, including the commonly used document fields per core.
//! The registry backs pre-flight validation of queries so typos in core
//! or field names are caught before a request leaves the machine.
//!
//! # Example
//!
//! ```
//! use impc_cores::CoreRegistry;
//!
//! let registry = CoreRegistry::global();
//!
//! // Lookup by id
//! if let Some(core) = registry.get("genotype-phenotype") {
//!     println!("{}: {}", core.id(), core.description());
//! }
//!
//! // Validate a query before sending it
//! assert!(registry.validate("genotype-phenotype", &["marker_symbol"]).is_ok());
//! assert!(registry.validate("genotype-phenotpye", &["marker_symbol"]).is_err());
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/mpi2/impc-api-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::collections::HashMap;
use std::sync::OnceLock;

use impc_types::CoreInfo;
use thiserror::Error;

/// The core metadata JSON embedded at compile time.
const CORES_JSON: &str = include_str!("../data/cores.json");

/// Global core registry instance.
static REGISTRY: OnceLock<CoreRegistry> = OnceLock::new();

/// Errors produced by query validation against the registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The core id is not a known IMPC core.
    #[error("Unknown core: {core}. Valid cores: {}", valid.join(", "))]
    UnknownCore {
        /// The rejected core id.
        core: String,
        /// The valid core ids.
        valid: Vec<String>,
    },

    /// A requested field is not known for the core.
    #[error("Unknown field for core {core}: {field}")]
    UnknownField {
        /// The core the field was checked against.
        core: String,
        /// The rejected field name.
        field: String,
    },
}

/// Registry of the public IMPC Solr cores.
#[derive(Debug)]
pub struct CoreRegistry {
    cores: HashMap<String, CoreInfo>,
}

impl CoreRegistry {
    /// Returns the global core registry.
    ///
    /// The registry is initialized lazily on first access.
    #[must_use]
    pub fn global() -> &'static Self {
        REGISTRY.get_or_init(Self::load)
    }

    /// Loads cores from the embedded JSON data.
    fn load() -> Self {
        let cores: HashMap<String, CoreInfo> =
            serde_json::from_str(CORES_JSON).expect("Invalid cores.json");
        Self { cores }
    }

    /// Looks up a core by id (case-insensitive).
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CoreInfo> {
        self.cores.get(&id.to_lowercase())
    }

    /// Returns all cores, sorted by id.
    #[must_use]
    pub fn all(&self) -> Vec<&CoreInfo> {
        let mut cores: Vec<_> = self.cores.values().collect();
        cores.sort_by_key(|c| c.id());
        cores
    }

    /// Returns all core ids, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.cores.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Returns the total number of cores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cores.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }

    /// Searches cores by id or description pattern (case-insensitive).
    #[must_use]
    pub fn search(&self, pattern: &str) -> Vec<&CoreInfo> {
        let pattern = pattern.to_lowercase();
        let mut matches: Vec<_> = self
            .cores
            .values()
            .filter(|c| {
                c.id().to_lowercase().contains(&pattern)
                    || c.description().to_lowercase().contains(&pattern)
            })
            .collect();
        matches.sort_by_key(|c| c.id());
        matches
    }

    /// Validates a core id and field list before building a request.
    ///
    /// Field checks are skipped for cores with no recorded field list.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first unknown core or field.
    pub fn validate<S: AsRef<str>>(&self, core: &str, fields: &[S]) -> Result<(), ValidationError> {
        let Some(info) = self.get(core) else {
            return Err(ValidationError::UnknownCore {
                core: core.to_string(),
                valid: self.ids(),
            });
        };

        for field in fields {
            let field = field.as_ref();
            if !info.has_field(field) {
                return Err(ValidationError::UnknownField {
                    core: info.id().to_string(),
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_loads() {
        let registry = CoreRegistry::global();
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 5);
    }

    #[test]
    fn test_get_known_cores() {
        let registry = CoreRegistry::global();
        for id in [
            "experiment",
            "genotype-phenotype",
            "impc_images",
            "phenodigm",
            "statistical-result",
        ] {
            assert!(registry.get(id).is_some(), "missing core {id}");
        }
    }

    #[test]
    fn test_get_case_insensitive() {
        let registry = CoreRegistry::global();
        assert!(registry.get("Genotype-Phenotype").is_some());
    }

    #[test]
    fn test_phenodigm_query_hint() {
        let registry = CoreRegistry::global();
        let core = registry.get("phenodigm").unwrap();
        assert_eq!(core.query_hint(), Some("type:"));
    }

    #[test]
    fn test_all_sorted() {
        let registry = CoreRegistry::global();
        let ids: Vec<_> = registry.all().iter().map(|c| c.id()).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_search() {
        let registry = CoreRegistry::global();
        let matches = registry.search("image");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].id(), "impc_images");
    }

    #[test]
    fn test_validate_unknown_core() {
        let registry = CoreRegistry::global();
        let err = registry
            .validate("genotype-phenotpye", &[] as &[&str])
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnknownCore { .. }));
        assert!(err.to_string().contains("genotype-phenotype"));
    }

    #[test]
    fn test_validate_unknown_field() {
        let registry = CoreRegistry::global();
        let err = registry
            .validate("genotype-phenotype", &["marker_symbol", "not_a_field"])
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownField {
                core: "genotype-phenotype".to_string(),
                field: "not_a_field".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_ok() {
        let registry = CoreRegistry::global();
        assert!(
            registry
                .validate("statistical-result", &["p_value", "significant"])
                .is_ok()
        );
    }
}
