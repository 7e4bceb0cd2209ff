//! Info command implementation.
//!
//! Displays detailed information about a single core, including the fields
//! it is known to expose.

use anyhow::{Context, Result};
use impc_lib::prelude::*;

/// Show detailed information about a core.
pub(crate) fn show_info(core_id: &str) -> Result<()> {
    let registry = CoreRegistry::global();
    let core = registry
        .get(core_id)
        .with_context(|| format!("Unknown core: {core_id}"))?;

    println!("Core:        {}", core.id());
    println!("Description: {}", core.description());
    if let Some(hint) = core.query_hint() {
        println!("Query hint:  pass '{hint}...' in -q to select a document type");
    }

    if core.fields().is_empty() {
        println!("\nNo field metadata recorded for this core.");
    } else {
        println!("\nKnown fields ({}):", core.fields().len());
        for field in core.fields() {
            println!("  {field}");
        }
    }

    Ok(())
}
