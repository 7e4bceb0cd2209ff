//! Query command implementation.
//!
//! Runs a single select request against a core and previews the result as a
//! table, optionally writing it to a file.

use crate::display::{Format, print_preview, write_table};
use anyhow::{Context, Result};
use impc_lib::prelude::*;
use std::path::PathBuf;

/// Arguments for the query command.
pub(crate) struct QueryArgs {
    pub core: String,
    pub query: String,
    pub rows: u32,
    pub fields: Vec<String>,
    pub filters: Vec<String>,
    pub sort: Option<String>,
    pub facet_field: Option<String>,
    pub facet_limit: Option<i32>,
    pub facet_mincount: Option<u32>,
    pub output: Option<PathBuf>,
    pub format: Format,
    pub skip_validation: bool,
    pub quiet: bool,
}

/// Run a single select query against a core.
pub(crate) async fn query(args: QueryArgs) -> Result<()> {
    if !args.skip_validation {
        CoreRegistry::global().validate(&args.core, &args.fields)?;
    }

    let mut params = QueryParams::new()
        .with_query(&args.query)
        .with_rows(args.rows)
        .with_fields(args.fields.iter().cloned());
    for filter in &args.filters {
        params = params.with_filter(filter);
    }
    if let Some(sort) = &args.sort {
        params = params.with_sort(sort);
    }
    if let Some(field) = &args.facet_field {
        let mut facet = FacetParams::new(field);
        facet.limit = args.facet_limit;
        facet.mincount = args.facet_mincount;
        params = params.with_facet(facet);
    }
    params.validate()?;

    let client = SolrClient::with_defaults().context("Failed to create HTTP client")?;

    if !args.quiet {
        println!("\nYour request:\n{}\n", client.request_url(&args.core, &params)?);
    }

    let response = client.select(&args.core, &params).await?;

    if !args.quiet {
        println!("Number of found documents: {}\n", response.num_found());
    }

    let table = if let Some(field) = &args.facet_field {
        let counts = response
            .facet_counts
            .as_ref()
            .and_then(|f| f.field_counts(field))
            .with_context(|| format!("No facet counts returned for field: {field}"))?;
        DataTable::from_facet(field, &counts)
    } else {
        DataTable::from_docs(response.docs())
    };

    print_preview(&table);

    if let Some(output) = &args.output {
        write_table(&table, output, args.format)?;
        if !args.quiet {
            println!("\nOutput written to: {}", output.display());
        }
    }

    Ok(())
}
