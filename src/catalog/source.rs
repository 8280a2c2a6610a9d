//! Catalog sources.
//!
//! A source fetches the current product list from the product-data
//! collaborator. The payload is the same JSON array the product-listing
//! endpoint returns.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::Product;
use crate::error::catalog::{CatalogError, CatalogResult};

/// Supplies the full product catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetches every product currently in the catalog.
    async fn fetch(&self) -> CatalogResult<Vec<Product>>;

    /// Short label used in logs and error reports.
    fn describe(&self) -> String;
}

/// Reads the catalog from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Creates a source reading from `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The file this source reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for JsonFileSource {
    async fn fetch(&self) -> CatalogResult<Vec<Product>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CatalogError::NotFound(self.path.clone()))
            }
            Err(e) => {
                return Err(CatalogError::Read {
                    source_name: self.describe(),
                    message: e.to_string(),
                })
            }
        };

        let products: Vec<Product> = serde_json::from_str(&raw)?;
        tracing::debug!(path = %self.path.display(), count = products.len(), "Catalog file decoded");
        Ok(products)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// Serves a fixed product list held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    products: Vec<Product>,
}

impl StaticSource {
    /// Creates a source that always returns `products`.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    async fn fetch(&self) -> CatalogResult<Vec<Product>> {
        Ok(self.products.clone())
    }

    fn describe(&self) -> String {
        format!("static:{} products", self.products.len())
    }
}
