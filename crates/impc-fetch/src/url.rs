//! IMPC Solr URL construction.

/// Base URL for the IMPC Solr API.
pub const DEFAULT_BASE_URL: &str = "https://www.ebi.ac.uk/mi/impc/solr";

/// Builds the select URL for a core.
///
/// URL format: `{base}/{core}/select`. A trailing slash on the base is
/// tolerated.
///
/// # Example
///
/// ```
/// use impc_fetch::url::{DEFAULT_BASE_URL, select_url};
///
/// let url = select_url(DEFAULT_BASE_URL, "genotype-phenotype");
/// assert_eq!(url, "https://www.ebi.ac.uk/mi/impc/solr/genotype-phenotype/select");
/// ```
#[must_use]
pub fn select_url(base: &str, core: &str) -> String {
    format!("{}/{}/select", base.trim_end_matches('/'), core)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_url() {
        assert_eq!(
            select_url(DEFAULT_BASE_URL, "phenodigm"),
            "https://www.ebi.ac.uk/mi/impc/solr/phenodigm/select"
        );
    }

    #[test]
    fn test_select_url_trailing_slash() {
        assert_eq!(
            select_url("https://www.ebi.ac.uk/mi/impc/solr/", "experiment"),
            "https://www.ebi.ac.uk/mi/impc/solr/experiment/select"
        );
    }

    #[test]
    fn test_select_url_local_base() {
        assert_eq!(
            select_url("http://localhost:8983/solr", "genotype-phenotype"),
            "http://localhost:8983/solr/genotype-phenotype/select"
        );
    }
}
