// Copyright (c) 2025 StoreZen Authors
//
// Licensed under the MIT License (LICENSE or https://opensource.org/licenses/MIT)

//! Two-tier product search.
//!
//! [`ProductSearch`] owns the current catalog snapshot and the prefix index
//! built from it. A query is answered by the prefix index first; when that
//! finds nothing, a case-insensitive substring scan over the whole catalog is
//! used instead. Searching never fails: no match is an empty outcome.
//!
//! Refreshing replaces both the snapshot and the index. A failed refresh is
//! reported and leaves the previous snapshot searchable.

mod substring;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

pub use substring::substring_matches;

use crate::catalog::{CatalogSnapshot, CatalogSource, Product};
use crate::config::{SearchConfig, StoreZenConfig};
use crate::data_structures::PrefixIndex;
use crate::error::{report_error, ErrorContext, StoreZenError, StoreZenResult};

/// Which tier produced a search outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// Matched by the prefix index
    Prefix,
    /// Matched by the substring fallback
    Substring,
    /// Nothing matched
    NoMatch,
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchTier::Prefix => "prefix",
            MatchTier::Substring => "substring",
            MatchTier::NoMatch => "no_match",
        };
        f.write_str(name)
    }
}

/// Result of a two-tier search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// The tier that produced `products`
    pub tier: MatchTier,

    /// Matching products
    pub products: Vec<Arc<Product>>,
}

impl SearchOutcome {
    fn no_match() -> Self {
        Self {
            tier: MatchTier::NoMatch,
            products: Vec::new(),
        }
    }

    /// Number of matching products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Catalog holder answering product searches.
#[derive(Debug)]
pub struct ProductSearch {
    config: SearchConfig,
    in_stock_only: bool,
    snapshot: CatalogSnapshot,
    index: PrefixIndex,
}

impl ProductSearch {
    /// Creates an empty search over no products.
    pub fn new(config: SearchConfig) -> Self {
        let index = PrefixIndex::with_fields(config.indexed_fields.clone());
        Self {
            config,
            in_stock_only: false,
            snapshot: CatalogSnapshot::default(),
            index,
        }
    }

    /// Creates an empty search from the application configuration.
    pub fn from_config(config: &StoreZenConfig) -> Self {
        Self::new(config.search.clone()).with_in_stock_only(config.catalog.in_stock_only)
    }

    /// Sets whether out-of-stock products are dropped when a catalog is loaded.
    pub fn with_in_stock_only(mut self, in_stock_only: bool) -> Self {
        self.in_stock_only = in_stock_only;
        self
    }

    /// Replaces the catalog with `products` and rebuilds the index.
    ///
    /// Returns the number of products indexed.
    pub fn load(&mut self, products: Vec<Product>) -> usize {
        let fetched = products.len();
        let mut snapshot = CatalogSnapshot::new(products);
        if self.in_stock_only {
            snapshot = snapshot.in_stock_only();
        }

        let duplicates = snapshot.duplicate_ids();
        if !duplicates.is_empty() {
            let ids: Vec<String> = duplicates.iter().map(|id| id.to_string()).collect();
            tracing::warn!(
                ids = %ids.join(","),
                "Catalog reuses product ids; matches for these ids will merge"
            );
        }

        self.index.rebuild(snapshot.iter().cloned());
        self.snapshot = snapshot;

        tracing::info!(
            fetched,
            indexed = self.snapshot.len(),
            nodes = self.index.node_count(),
            "Catalog loaded"
        );
        self.snapshot.len()
    }

    /// Fetches a fresh catalog from `source` and loads it.
    ///
    /// On failure the error is reported, the current catalog stays in place,
    /// and the error is returned.
    pub async fn refresh(&mut self, source: &dyn CatalogSource) -> StoreZenResult<usize> {
        match source.fetch().await {
            Ok(products) => Ok(self.load(products)),
            Err(e) => {
                let context = ErrorContext::new(StoreZenError::from(e), "catalog").with_details(
                    format!(
                        "refresh from {} failed; keeping {} products",
                        source.describe(),
                        self.snapshot.len()
                    ),
                );
                report_error(&context);
                Err(context.error)
            }
        }
    }

    /// Searches by prefix, falling back to a substring scan when enabled.
    pub fn search(&self, query: &str) -> SearchOutcome {
        self.search_with(query, None, false)
    }

    /// Like [`ProductSearch::search`], restricted to one category (ignoring case).
    pub fn search_in_category(&self, query: &str, category: &str) -> SearchOutcome {
        self.search_with(query, Some(category), false)
    }

    /// Searches with an optional category restriction.
    ///
    /// With `prefix_only` the substring tier is skipped even when the
    /// configuration enables it. `max_results` applies either way.
    pub fn search_with(&self, query: &str, category: Option<&str>, prefix_only: bool) -> SearchOutcome {
        let fallback = self.config.substring_fallback && !prefix_only;
        match category {
            Some(category) => {
                self.search_filtered(query, fallback, |product| product.in_category(category))
            }
            None => self.search_filtered(query, fallback, |_| true),
        }
    }

    /// Prefix tier only.
    pub fn prefix_search(&self, query: &str) -> Vec<Arc<Product>> {
        self.index.search(query)
    }

    /// Substring tier only.
    pub fn substring_search(&self, query: &str) -> Vec<Arc<Product>> {
        substring_matches(self.snapshot.iter(), &self.config.indexed_fields, query)
    }

    /// Distinct categories of the current catalog, first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        self.snapshot.categories()
    }

    /// The current catalog snapshot.
    pub fn snapshot(&self) -> &CatalogSnapshot {
        &self.snapshot
    }

    /// The prefix index over the current snapshot.
    pub fn index(&self) -> &PrefixIndex {
        &self.index
    }

    /// The active search configuration.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn search_filtered<F>(&self, query: &str, fallback: bool, keep: F) -> SearchOutcome
    where
        F: Fn(&Product) -> bool,
    {
        let mut products = self.prefix_search(query);
        products.retain(|product| keep(product.as_ref()));
        if !products.is_empty() {
            return self.finish(MatchTier::Prefix, products, query);
        }

        if fallback {
            let mut products = self.substring_search(query);
            products.retain(|product| keep(product.as_ref()));
            if !products.is_empty() {
                return self.finish(MatchTier::Substring, products, query);
            }
        }

        tracing::debug!(query, "No products matched");
        SearchOutcome::no_match()
    }

    fn finish(&self, tier: MatchTier, mut products: Vec<Arc<Product>>, query: &str) -> SearchOutcome {
        let total = products.len();
        if let Some(limit) = self.config.max_results {
            products.truncate(limit);
        }
        tracing::debug!(query, %tier, total, returned = products.len(), "Search answered");
        SearchOutcome { tier, products }
    }
}

impl Default for ProductSearch {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}
