//! Fetch command implementation.
//!
//! Retrieves every document matching a query, page by page, and writes the
//! assembled table to a file.

use crate::display::{Format, write_table};
use anyhow::{Context, Result};
use futures::StreamExt;
use impc_lib::prelude::*;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::Confirm;
use std::path::PathBuf;

/// Result-set size above which the user is asked to confirm.
const CONFIRM_THRESHOLD: u64 = 100_000;

/// Arguments for the fetch command.
pub(crate) struct FetchArgs {
    pub core: String,
    pub query: String,
    pub fields: Vec<String>,
    pub filters: Vec<String>,
    pub sort: Option<String>,
    pub output: Option<PathBuf>,
    pub format: Format,
    pub page_size: u32,
    pub concurrency: usize,
    pub rows: Option<u32>,
    pub yes: bool,
    pub skip_validation: bool,
    pub quiet: bool,
}

/// Retrieve every matching document and write it to a file.
pub(crate) async fn fetch(args: FetchArgs) -> Result<()> {
    if !args.skip_validation {
        CoreRegistry::global().validate(&args.core, &args.fields)?;
    }

    if args.rows.is_some() {
        eprintln!(
            "WARN: --rows is ignored; data is retrieved --page-size documents at a time."
        );
    }

    let mut params = QueryParams::new()
        .with_query(&args.query)
        .with_fields(args.fields.iter().cloned());
    for filter in &args.filters {
        params = params.with_filter(filter);
    }
    if let Some(sort) = &args.sort {
        params = params.with_sort(sort);
    }

    // Determine output path (default to <core>.<format>)
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.{}", args.core, args.format.extension())));

    let config = ClientConfig {
        concurrency: args.concurrency,
        ..Default::default()
    };
    let client = SolrClient::new(config).context("Failed to create HTTP client")?;

    // Probe for the result count without retrieving any documents
    let num_found = count_docs(&client, &args.core, &params).await?;
    if num_found == 0 {
        if !args.quiet {
            println!("No documents found.");
        }
        return Ok(());
    }

    if num_found > CONFIRM_THRESHOLD && !args.yes {
        let proceed = Confirm::new(&format!(
            "This query matches {num_found} documents. Retrieve all of them?"
        ))
        .with_default(false)
        .prompt()
        .context("Fetch cancelled")?;
        if !proceed {
            return Ok(());
        }
    }

    // Setup progress bar
    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(num_found);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} docs ({percent}%) {msg}")
                .expect("Invalid progress template")
                .progress_chars("=>-"),
        );
        pb.set_message(format!("{} q={}", args.core, args.query));
        pb
    };

    // Retrieve pages in order using the resilient stream, so an occasional
    // server error skips a page instead of aborting the whole fetch
    let mut table = DataTable::default();
    let mut skipped_pages = 0u64;
    let mut stream =
        page_stream_resilient(&client, &args.core, params, args.page_size, num_found)?;

    while let Some(page) = stream.next().await {
        if page.had_error() {
            skipped_pages += 1;
        } else {
            table.append(DataTable::from_docs(&page.docs));
        }
        // Advance by the slice of the result set this page covers, so the
        // bar reaches num_found even when the final page is partial
        progress.inc(page_span(page.start, args.page_size, num_found));
    }

    let finish_msg = if skipped_pages > 0 {
        format!(
            "Retrieved {} documents ({} pages skipped due to errors)",
            table.len(),
            skipped_pages
        )
    } else {
        format!("Retrieved {} documents", table.len())
    };
    progress.finish_with_message(finish_msg);

    write_table(&table, &output, args.format)?;

    if !args.quiet {
        println!("Output written to: {}", output.display());
    }

    Ok(())
}
