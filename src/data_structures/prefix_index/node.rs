// Copyright (c) 2025 StoreZen Authors
//
// Licensed under the MIT License (LICENSE or https://opensource.org/licenses/MIT)

//! Node implementation for the product prefix index.

use std::sync::Arc;

use fnv::FnvHashMap;

use crate::catalog::Product;

/// A node in the prefix index.
///
/// The path of characters from the root to a node spells a lowercased prefix.
/// `products` holds every product whose indexed field starts with that prefix,
/// in insertion order and possibly more than once.
#[derive(Debug, Default)]
pub(crate) struct IndexNode {
    /// Map of characters to owned child nodes
    pub(crate) children: FnvHashMap<char, IndexNode>,

    /// Products reachable through this prefix
    pub(crate) products: Vec<Arc<Product>>,
}

impl IndexNode {
    /// Creates a new empty node.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the subtree rooted here, this node included.
    pub(crate) fn subtree_size(&self) -> usize {
        1 + self
            .children
            .values()
            .map(IndexNode::subtree_size)
            .sum::<usize>()
    }
}
