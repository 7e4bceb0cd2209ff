//! IMPC Solr core metadata.

use serde::{Deserialize, Serialize};

/// Metadata for a single IMPC Solr core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreInfo {
    /// Core identifier as it appears in the select URL.
    id: String,
    /// Human-readable description of the core's contents.
    description: String,
    /// Commonly used document fields for this core.
    #[serde(default)]
    fields: Vec<String>,
    /// Recommended `q` prefix, e.g. `type:` for the phenodigm core.
    #[serde(default)]
    query_hint: Option<String>,
}

impl CoreInfo {
    /// Creates new core metadata.
    #[must_use]
    pub const fn new(
        id: String,
        description: String,
        fields: Vec<String>,
        query_hint: Option<String>,
    ) -> Self {
        Self {
            id,
            description,
            fields,
            query_hint,
        }
    }

    /// Returns the core identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the core description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the known document fields for this core.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the recommended query hint, if any.
    #[must_use]
    pub fn query_hint(&self) -> Option<&str> {
        self.query_hint.as_deref()
    }

    /// Returns true if the field is known for this core.
    ///
    /// Cores with no recorded field list accept any field.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.is_empty() || self.fields.iter().any(|f| f == name)
    }
}

impl std::fmt::Display for CoreInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
