//! Catalog configuration module.
//!
//! Where the product catalog is read from and which products are exposed.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// JSON file holding the product array
    pub path: Option<PathBuf>,

    /// Whether to drop out-of-stock products before indexing (customer view)
    pub in_stock_only: bool,
}

impl Validate for CatalogConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(path) = &self.path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(
                    "catalog path must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
