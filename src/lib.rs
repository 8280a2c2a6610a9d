//! StoreZen catalog search library.
//!
//! Product lookup for the StoreZen storefront: a prefix index over product
//! names and categories, a substring fallback, and the catalog model and
//! sources that feed them.
//!
//! # Architecture
//!
//! - [`catalog`]: product records, catalog snapshots and catalog sources
//! - [`data_structures`]: the prefix index
//! - [`search`]: the two-tier search controller owning snapshot and index
//! - [`config`] and [`error`]: layered configuration and error reporting

pub mod catalog;
pub mod config;
pub mod data_structures;
pub mod error;
pub mod search;

#[cfg(test)]
pub(crate) mod tests;

pub use catalog::{CatalogSnapshot, Product, ProductId};
pub use data_structures::PrefixIndex;
pub use search::{MatchTier, ProductSearch, SearchOutcome};

/// Version information for StoreZen.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function.
///
/// Installs the tracing error reporter and loads configuration from
/// `config_path`, or from the default location when none is given.
pub fn init(config_path: Option<&std::path::Path>) -> error::StoreZenResult<config::StoreZenConfig> {
    error::set_error_reporter(std::sync::Arc::new(error::TracingErrorReporter));

    let config = match config_path {
        Some(path) => config::ConfigLoader::new(Some(path), config::ENV_PREFIX).load()?,
        None => config::load_default_config()?,
    };
    Ok(config)
}
