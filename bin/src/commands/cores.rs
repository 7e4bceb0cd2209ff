//! Cores command implementation.
//!
//! Lists the available IMPC Solr cores with optional search filtering.

use anyhow::Result;
use impc_lib::prelude::*;

/// List available cores with an optional search pattern.
pub(crate) fn list_cores(search: Option<&str>) -> Result<()> {
    let registry = CoreRegistry::global();

    let cores = match search {
        Some(pattern) => registry.search(pattern),
        None => registry.all(),
    };

    if cores.is_empty() {
        println!("No cores found.");
        return Ok(());
    }

    println!("{:<22} {:<60}", "CORE", "DESCRIPTION");
    println!("{}", "-".repeat(82));

    for core in &cores {
        println!("{:<22} {:<60}", core.id(), core.description());
    }

    println!("\nTotal: {} cores", cores.len());
    Ok(())
}
