//! Ordered pagination over Solr select results.

use futures::stream::{self, Stream, StreamExt};
use impc_types::{DataTable, Document, ImpcError, ParamsError, QueryParams};

use crate::SolrClient;

/// A page of documents from a single select request.
#[derive(Debug, Clone)]
pub struct DocPage {
    /// Offset of the first document in this page.
    pub start: u32,
    /// The documents in this page.
    pub docs: Vec<Document>,
    /// Whether this page had an error that was skipped.
    pub had_error: bool,
}

impl DocPage {
    /// Creates a new page.
    #[must_use]
    pub const fn new(start: u32, docs: Vec<Document>) -> Self {
        Self {
            start,
            docs,
            had_error: false,
        }
    }

    /// Creates a page that represents a skipped error.
    #[must_use]
    pub const fn skipped_error(start: u32) -> Self {
        Self {
            start,
            docs: Vec::new(),
            had_error: true,
        }
    }

    /// Returns true if the page is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Returns the number of documents in the page.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.docs.len()
    }

    /// Returns true if this page had an error that was skipped.
    #[must_use]
    pub const fn had_error(&self) -> bool {
        self.had_error
    }
}

/// Counts the documents matching a query without retrieving any.
///
/// This is the probe request a paginated fetch starts with (`rows=0`).
///
/// # Errors
///
/// Returns an error if the probe request fails.
pub async fn count_docs(
    client: &SolrClient,
    core: &str,
    params: &QueryParams,
) -> Result<u64, ImpcError> {
    let probe = params.clone().with_rows(0).with_start(0);
    let response = client.select(core, &probe).await?;
    Ok(response.num_found())
}

/// Computes the page start offsets for a result set.
fn page_starts(num_found: u64, page_size: u32) -> Vec<u32> {
    let total = u32::try_from(num_found).unwrap_or(u32::MAX);
    (0..total).step_by(page_size.max(1) as usize).collect()
}

/// Returns the number of documents a page covers within the result set.
///
/// The final page of a result set is usually partial, so this is the
/// amount a progress display should advance per completed page.
#[must_use]
pub fn page_span(start: u32, page_size: u32, num_found: u64) -> u64 {
    u64::from(page_size).min(num_found.saturating_sub(u64::from(start)))
}

/// Creates an ordered async stream of document pages.
///
/// Pages are fetched concurrently (up to the client's configured
/// concurrency) but yielded in ascending `start` order, so concatenating
/// them reproduces the server's document order. Any `rows`/`start` on
/// `params` is overwritten per page.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `core` - The core to query
/// * `params` - The query parameters (shared by every page)
/// * `page_size` - Documents per request
/// * `num_found` - Total matching documents, from [`count_docs`]
///
/// # Errors
///
/// Returns an error if the page size is zero, which would turn every
/// matching document into its own empty request.
pub fn page_stream<'a>(
    client: &'a SolrClient,
    core: &'a str,
    params: QueryParams,
    page_size: u32,
    num_found: u64,
) -> Result<impl Stream<Item = Result<DocPage, ImpcError>> + 'a, ParamsError> {
    if page_size == 0 {
        return Err(ParamsError::ZeroPageSize);
    }
    let concurrency = client.config().concurrency;

    Ok(stream::iter(page_starts(num_found, page_size))
        .map(move |start| {
            let client = client.clone();
            let page_params = params.clone().with_rows(page_size).with_start(start);
            async move {
                match client.select(core, &page_params).await {
                    Ok(response) => Ok(DocPage::new(start, response.response.docs)),
                    Err(e) => Err(e.into()),
                }
            }
        })
        .buffered(concurrency))
}

/// Creates a resilient page stream that skips failed pages.
///
/// Useful for long retrievals where an occasional server error should not
/// abort the whole operation. Failed pages are yielded as empty pages with
/// `had_error` set to true.
///
/// # Errors
///
/// Returns an error if the page size is zero.
pub fn page_stream_resilient<'a>(
    client: &'a SolrClient,
    core: &'a str,
    params: QueryParams,
    page_size: u32,
    num_found: u64,
) -> Result<impl Stream<Item = DocPage> + 'a, ParamsError> {
    if page_size == 0 {
        return Err(ParamsError::ZeroPageSize);
    }
    let concurrency = client.config().concurrency;

    Ok(stream::iter(page_starts(num_found, page_size))
        .map(move |start| {
            let client = client.clone();
            let page_params = params.clone().with_rows(page_size).with_start(start);
            async move {
                match client.select(core, &page_params).await {
                    Ok(response) => DocPage::new(start, response.response.docs),
                    Err(_) => DocPage::skipped_error(start),
                }
            }
        })
        .buffered(concurrency))
}

/// Retrieves every document matching a query as a single table.
///
/// Probes with `rows=0` to learn the result count, then pages through the
/// results `page_size` documents at a time. Any caller-supplied `rows` or
/// `start` is ignored.
///
/// # Errors
///
/// Returns an error if the page size is zero or any request fails.
pub async fn fetch_all(
    client: &SolrClient,
    core: &str,
    params: QueryParams,
    page_size: u32,
) -> Result<(u64, DataTable), ImpcError> {
    if page_size == 0 {
        return Err(ParamsError::ZeroPageSize.into());
    }

    let mut params = params;
    params.rows = None;
    params.start = None;

    let num_found = count_docs(client, core, &params).await?;

    let mut table = DataTable::default();
    let mut stream = page_stream(client, core, params, page_size, num_found)?;
    while let Some(page) = stream.next().await {
        table.append(DataTable::from_docs(&page?.docs));
    }

    Ok((num_found, table))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_page_new() {
        let page = DocPage::new(100, vec![]);
        assert!(page.is_empty());
        assert_eq!(page.len(), 0);
        assert_eq!(page.start, 100);
        assert!(!page.had_error());
    }

    #[test]
    fn test_doc_page_skipped_error() {
        let page = DocPage::skipped_error(200);
        assert!(page.is_empty());
        assert!(page.had_error());
    }

    #[test]
    fn test_page_starts() {
        assert_eq!(page_starts(250, 100), vec![0, 100, 200]);
        assert_eq!(page_starts(200, 100), vec![0, 100]);
        assert_eq!(page_starts(1, 100), vec![0]);
        assert!(page_starts(0, 100).is_empty());
    }

    #[test]
    fn test_page_span() {
        assert_eq!(page_span(0, 100, 250), 100);
        assert_eq!(page_span(100, 100, 250), 100);
        // Final partial page covers only the remainder
        assert_eq!(page_span(200, 100, 250), 50);
        assert_eq!(page_span(300, 100, 250), 0);
    }

    #[test]
    fn test_page_streams_reject_zero_page_size() {
        // A zero page size must not fan out into one request per document
        let client = SolrClient::with_defaults().unwrap();
        assert!(matches!(
            page_stream(&client, "experiment", QueryParams::new(), 0, 10),
            Err(ParamsError::ZeroPageSize)
        ));
        assert!(matches!(
            page_stream_resilient(&client, "experiment", QueryParams::new(), 0, 10),
            Err(ParamsError::ZeroPageSize)
        ));
    }

    #[tokio::test]
    async fn test_fetch_all_zero_page_size() {
        let client = SolrClient::with_defaults().unwrap();
        let result = fetch_all(&client, "genotype-phenotype", QueryParams::new(), 0).await;
        assert!(matches!(
            result,
            Err(ImpcError::Params(ParamsError::ZeroPageSize))
        ));
    }
}
