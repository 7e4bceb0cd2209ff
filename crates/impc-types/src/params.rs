//! Solr select query parameter construction.

use crate::ParamsError;

/// Parameters for a Solr select request.
///
/// The default query matches all documents (`*:*`). Parameters are
/// serialized with [`QueryParams::to_pairs`], which always appends
/// `wt=json` so responses can be decoded uniformly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// The Solr `q` parameter.
    pub query: String,
    /// Maximum number of documents to return (`rows`).
    pub rows: Option<u32>,
    /// Offset of the first document to return (`start`).
    pub start: Option<u32>,
    /// Fields to retrieve (`fl`), comma-joined on serialization.
    pub fields: Vec<String>,
    /// Filter queries (`fq`), each serialized as its own parameter.
    pub filters: Vec<String>,
    /// Sort specification (`sort`), e.g. `p_value asc`.
    pub sort: Option<String>,
    /// Facet parameters, when faceting is enabled.
    pub facet: Option<FacetParams>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            query: "*:*".to_string(),
            rows: None,
            start: None,
            fields: Vec::new(),
            filters: Vec::new(),
            sort: None,
            facet: None,
        }
    }
}

impl QueryParams {
    /// Creates parameters that match all documents.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `q` parameter.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Sets the number of rows to return.
    #[must_use]
    pub const fn with_rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Sets the start offset.
    #[must_use]
    pub const fn with_start(mut self, start: u32) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the field list (`fl`).
    #[must_use]
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a filter query (`fq`).
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filters.push(filter.into());
        self
    }

    /// Sets the sort specification.
    #[must_use]
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Enables faceting with the given parameters.
    #[must_use]
    pub fn with_facet(mut self, facet: FacetParams) -> Self {
        self.facet = Some(facet);
        self
    }

    /// Returns true if this is a faceting query.
    #[must_use]
    pub const fn is_facet(&self) -> bool {
        self.facet.is_some()
    }

    /// Validates the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if faceting is enabled with an empty field.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if let Some(facet) = &self.facet
            && facet.field.is_empty()
        {
            return Err(ParamsError::EmptyFacetField);
        }
        Ok(())
    }

    /// Serializes the parameters to key/value pairs for the request URL.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("q".to_string(), self.query.clone())];

        if let Some(rows) = self.rows {
            pairs.push(("rows".to_string(), rows.to_string()));
        }
        if let Some(start) = self.start {
            pairs.push(("start".to_string(), start.to_string()));
        }
        if !self.fields.is_empty() {
            pairs.push(("fl".to_string(), self.fields.join(",")));
        }
        for filter in &self.filters {
            pairs.push(("fq".to_string(), filter.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        if let Some(facet) = &self.facet {
            pairs.push(("facet".to_string(), "on".to_string()));
            pairs.push(("facet.field".to_string(), facet.field.clone()));
            if let Some(limit) = facet.limit {
                pairs.push(("facet.limit".to_string(), limit.to_string()));
            }
            if let Some(mincount) = facet.mincount {
                pairs.push(("facet.mincount".to_string(), mincount.to_string()));
            }
        }

        pairs.push(("wt".to_string(), "json".to_string()));
        pairs
    }
}

/// Facet parameters for a Solr select request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetParams {
    /// The field to facet on (`facet.field`).
    pub field: String,
    /// Maximum number of facet buckets (`facet.limit`, -1 for unlimited).
    pub limit: Option<i32>,
    /// Minimum count for a bucket to be returned (`facet.mincount`).
    pub mincount: Option<u32>,
}

impl FacetParams {
    /// Creates facet parameters for the given field.
    #[must_use]
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            limit: None,
            mincount: None,
        }
    }

    /// Sets the facet bucket limit.
    #[must_use]
    pub const fn with_limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the minimum bucket count.
    #[must_use]
    pub const fn with_mincount(mut self, mincount: u32) -> Self {
        self.mincount = Some(mincount);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_all() {
        let params = QueryParams::new();
        assert_eq!(params.query, "*:*");
        assert!(!params.is_facet());
    }

    #[test]
    fn test_to_pairs_basic() {
        let params = QueryParams::new()
            .with_rows(10)
            .with_fields(["marker_symbol", "allele_symbol"]);
        let pairs = params.to_pairs();

        assert!(pairs.contains(&("q".to_string(), "*:*".to_string())));
        assert!(pairs.contains(&("rows".to_string(), "10".to_string())));
        assert!(pairs.contains(&(
            "fl".to_string(),
            "marker_symbol,allele_symbol".to_string()
        )));
        assert_eq!(pairs.last().unwrap().0, "wt");
    }

    #[test]
    fn test_to_pairs_repeated_filters() {
        let params = QueryParams::new()
            .with_filter("zygosity:homozygote")
            .with_filter("life_stage_name:\"Late adult\"");
        let pairs = params.to_pairs();

        let filters: Vec<_> = pairs.iter().filter(|(k, _)| k == "fq").collect();
        assert_eq!(filters.len(), 2);
    }

    #[test]
    fn test_to_pairs_facet() {
        let params = QueryParams::new().with_rows(0).with_facet(
            FacetParams::new("zygosity")
                .with_limit(15)
                .with_mincount(1),
        );
        let pairs = params.to_pairs();

        assert!(pairs.contains(&("facet".to_string(), "on".to_string())));
        assert!(pairs.contains(&("facet.field".to_string(), "zygosity".to_string())));
        assert!(pairs.contains(&("facet.limit".to_string(), "15".to_string())));
        assert!(pairs.contains(&("facet.mincount".to_string(), "1".to_string())));
    }

    #[test]
    fn test_validate_empty_facet_field() {
        let params = QueryParams::new().with_facet(FacetParams::new(""));
        assert_eq!(params.validate(), Err(ParamsError::EmptyFacetField));
    }

    #[test]
    fn test_validate_ok() {
        let params = QueryParams::new().with_facet(FacetParams::new("zygosity"));
        assert!(params.validate().is_ok());
    }
}
