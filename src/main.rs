//! StoreZen catalog search - command line entry point.
//!
//! Loads configuration, reads a product catalog and answers searches against
//! it. Results go to stdout as JSON; logs go to stderr.

use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use storezen_lib::catalog::{JsonFileSource, Product};
use storezen_lib::config::{LogConfig, StoreZenConfig};
use storezen_lib::error::{StoreZenError, StoreZenResult};
use storezen_lib::search::ProductSearch;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for StoreZen.
#[derive(Parser, Debug)]
#[clap(name = "StoreZen catalog search", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Catalog JSON file, overriding `catalog.path`
    #[clap(long, value_parser)]
    catalog: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Search the catalog by name or category
    Search {
        /// Text typed into the search box
        query: String,

        /// Skip the substring fallback
        #[clap(long)]
        prefix_only: bool,

        /// Restrict results to one category
        #[clap(long)]
        category: Option<String>,
    },

    /// List the distinct categories in the catalog
    Categories,

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
fn init_logging(log: &LogConfig) -> StoreZenResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| StoreZenError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Loads the catalog named on the command line or in the configuration.
async fn load_catalog(config: &StoreZenConfig, catalog: Option<PathBuf>) -> StoreZenResult<ProductSearch> {
    let path = catalog.or_else(|| config.catalog.path.clone()).ok_or_else(|| {
        StoreZenError::Custom(
            "No catalog configured: pass --catalog or set catalog.path".to_string(),
        )
    })?;

    let source = JsonFileSource::new(path);
    let mut search = ProductSearch::from_config(config);
    search.refresh(&source).await?;
    Ok(search)
}

fn print_products(products: &[Arc<Product>]) -> StoreZenResult<()> {
    let records: Vec<&Product> = products.iter().map(Arc::as_ref).collect();
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}

fn write_default_config(output: &Path) -> StoreZenResult<()> {
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(&StoreZenConfig::default())
        .map_err(|e| StoreZenError::Custom(format!("Failed to serialize config: {e}")))?;
    std::fs::write(output, toml)?;

    info!("Default configuration written to {:?}", output);
    Ok(())
}

#[tokio::main]
async fn main() -> StoreZenResult<()> {
    let args = Args::parse();

    if let Command::GenConfig { output } = &args.command {
        init_logging(&LogConfig::default())?;
        return write_default_config(output);
    }

    let config = match storezen_lib::init(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    };
    init_logging(&config.log)?;

    match args.command {
        Command::Search {
            query,
            prefix_only,
            category,
        } => {
            let search = load_catalog(&config, args.catalog).await?;

            let outcome = search.search_with(&query, category.as_deref(), prefix_only);

            info!(query = %query, tier = %outcome.tier, matches = outcome.len(), "Search complete");
            print_products(&outcome.products)
        }
        Command::Categories => {
            let search = load_catalog(&config, args.catalog).await?;
            for category in search.categories() {
                println!("{category}");
            }
            Ok(())
        }
        Command::Validate => {
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { .. } => Ok(()),
    }
}
