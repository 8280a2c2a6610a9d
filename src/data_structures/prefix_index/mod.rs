// Copyright (c) 2025 StoreZen Authors
//
// Licensed under the MIT License (LICENSE or https://opensource.org/licenses/MIT)

//! Product Prefix Index
//!
//! An in-memory multi-key trie over a product catalog. Every product is
//! inserted once per indexed field (name and category by default), and every
//! node along each path remembers the product, so a lookup costs one step per
//! query character and no subtree walk.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use storezen_lib::catalog::Product;
//! use storezen_lib::data_structures::PrefixIndex;
//!
//! let mut index = PrefixIndex::new();
//! index.insert(Arc::new(Product::new(1, "Amul Milk", "Groceries")));
//! index.insert(Arc::new(Product::new(2, "Amul Butter", "Groceries")));
//!
//! assert_eq!(index.search("AMU").len(), 2);
//! assert!(index.search("milk").is_empty());
//! ```
//!
//! # Lifecycle
//!
//! The index is built from scratch for each catalog snapshot. There is no
//! removal: a changed catalog means [`PrefixIndex::rebuild`].

mod node;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use fnv::FnvHashSet;

use crate::catalog::{IndexedField, Product};
use node::IndexNode;

/// Prefix index over product fields.
#[derive(Debug)]
pub struct PrefixIndex {
    /// The root node, standing for the empty prefix
    root: IndexNode,

    /// Fields every product is inserted under
    fields: Vec<IndexedField>,

    /// Number of insert calls since the last rebuild
    inserted: usize,
}

impl PrefixIndex {
    /// Creates an empty index over the default fields (name, category).
    pub fn new() -> Self {
        Self::with_fields(IndexedField::defaults())
    }

    /// Creates an empty index over the given fields.
    pub fn with_fields(fields: Vec<IndexedField>) -> Self {
        Self {
            root: IndexNode::new(),
            fields,
            inserted: 0,
        }
    }

    /// Builds an index over `fields` holding every product in `products`.
    pub fn from_products<I>(fields: Vec<IndexedField>, products: I) -> Self
    where
        I: IntoIterator<Item = Arc<Product>>,
    {
        let mut index = Self::with_fields(fields);
        for product in products {
            index.insert(product);
        }
        index
    }

    /// Inserts a product under each indexed field.
    ///
    /// The field is lowercased and walked one character at a time; the product
    /// is appended to every node on the path. Empty fields are skipped so the
    /// root never collects products.
    pub fn insert(&mut self, product: Arc<Product>) {
        for &field in &self.fields {
            let key = product.field(field).to_lowercase();
            if key.is_empty() {
                continue;
            }

            let mut node = &mut self.root;
            for c in key.chars() {
                node = node.children.entry(c).or_default();
                node.products.push(Arc::clone(&product));
            }
        }
        self.inserted += 1;
    }

    /// Returns the products whose indexed fields start with `query`.
    ///
    /// The query is trimmed and lowercased first. A blank query, or one that
    /// leaves the trie, yields an empty result. Duplicates are collapsed by
    /// product id, keeping the first occurrence.
    pub fn search(&self, query: &str) -> Vec<Arc<Product>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let Some(node) = self.find_node(&query) else {
            return Vec::new();
        };

        let mut seen = FnvHashSet::default();
        let mut matches = Vec::new();
        for product in &node.products {
            if seen.insert(&product.id) {
                matches.push(Arc::clone(product));
            }
        }
        matches
    }

    /// Discards every node and indexes `products` into a fresh tree.
    pub fn rebuild<I>(&mut self, products: I)
    where
        I: IntoIterator<Item = Arc<Product>>,
    {
        self.root = IndexNode::new();
        self.inserted = 0;
        for product in products {
            self.insert(product);
        }
        tracing::trace!(
            inserts = self.inserted,
            nodes = self.node_count(),
            "Prefix index rebuilt"
        );
    }

    /// Whether no product contributed a path.
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Number of insert calls since construction or the last rebuild.
    ///
    /// Inserting the same product twice counts twice; search results do not.
    pub fn insert_count(&self) -> usize {
        self.inserted
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.root.subtree_size()
    }

    /// The fields products are indexed under.
    pub fn fields(&self) -> &[IndexedField] {
        &self.fields
    }

    fn find_node(&self, key: &str) -> Option<&IndexNode> {
        key.chars()
            .try_fold(&self.root, |node, c| node.children.get(&c))
    }
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}
