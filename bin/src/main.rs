//! impc CLI - query the IMPC Solr API from the command line.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "impc")]
#[command(about = "Query the IMPC Solr API and return tabular data", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress request URL and progress output)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single select query against a core
    Query {
        /// Core to query (e.g. genotype-phenotype, phenodigm)
        core: String,

        /// Solr query string
        #[arg(short = 'q', long, default_value = "*:*")]
        query: String,

        /// Number of rows to retrieve
        #[arg(short, long, default_value = "10")]
        rows: u32,

        /// Fields to retrieve (comma-separated)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,

        /// Filter query (repeatable)
        #[arg(long = "filter")]
        filters: Vec<String>,

        /// Sort specification, e.g. "p_value asc"
        #[arg(long)]
        sort: Option<String>,

        /// Field to facet on (returns category counts instead of documents)
        #[arg(long)]
        facet_field: Option<String>,

        /// Maximum number of facet buckets
        #[arg(long)]
        facet_limit: Option<i32>,

        /// Minimum count for a facet bucket to be returned
        #[arg(long)]
        facet_mincount: Option<u32>,

        /// Output file path (omit to preview on stdout only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Skip core and field validation
        #[arg(long)]
        skip_validation: bool,
    },

    /// Retrieve every matching document, page by page
    Fetch {
        /// Core to query
        core: String,

        /// Solr query string
        #[arg(short = 'q', long, default_value = "*:*")]
        query: String,

        /// Fields to retrieve (comma-separated)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,

        /// Filter query (repeatable)
        #[arg(long = "filter")]
        filters: Vec<String>,

        /// Sort specification
        #[arg(long)]
        sort: Option<String>,

        /// Output file path. Defaults to <core>.<format>
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Documents per request
        #[arg(long, default_value = "5000", value_parser = clap::value_parser!(u32).range(1..))]
        page_size: u32,

        /// Maximum concurrent page requests
        #[arg(long, default_value = "5")]
        concurrency: usize,

        /// Hidden: accepted for parity with query, but ignored
        #[arg(long, hide = true)]
        rows: Option<u32>,

        /// Skip the confirmation prompt for large result sets
        #[arg(short = 'y', long)]
        yes: bool,

        /// Skip core and field validation
        #[arg(long)]
        skip_validation: bool,
    },

    /// List the available Solr cores
    Cores {
        /// Search pattern
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show core details and known fields
    Info {
        /// Core identifier
        core: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Query {
            core,
            query,
            rows,
            fields,
            filters,
            sort,
            facet_field,
            facet_limit,
            facet_mincount,
            output,
            format,
            skip_validation,
        } => {
            commands::query::query(commands::query::QueryArgs {
                core,
                query,
                rows,
                fields,
                filters,
                sort,
                facet_field,
                facet_limit,
                facet_mincount,
                output,
                format,
                skip_validation,
                quiet: cli.quiet,
            })
            .await
        }
        Commands::Fetch {
            core,
            query,
            fields,
            filters,
            sort,
            output,
            format,
            page_size,
            concurrency,
            rows,
            yes,
            skip_validation,
        } => {
            commands::fetch::fetch(commands::fetch::FetchArgs {
                core,
                query,
                fields,
                filters,
                sort,
                output,
                format,
                page_size,
                concurrency,
                rows,
                yes,
                skip_validation,
                quiet: cli.quiet,
            })
            .await
        }
        Commands::Cores { search } => commands::cores::list_cores(search.as_deref()),
        Commands::Info { core } => commands::info::show_info(&core),
    }
}
