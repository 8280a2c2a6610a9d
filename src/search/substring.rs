// Copyright (c) 2025 StoreZen Authors
//
// Licensed under the MIT License (LICENSE or https://opensource.org/licenses/MIT)

//! Unindexed substring scan over a catalog.

use std::sync::Arc;

use crate::catalog::{IndexedField, Product};

/// Returns the products where any of `fields` contains `query`, ignoring case.
///
/// Linear in the catalog size. A blank query matches nothing. Results follow
/// catalog order and each product appears at most once.
pub fn substring_matches<'a, I>(products: I, fields: &[IndexedField], query: &str) -> Vec<Arc<Product>>
where
    I: IntoIterator<Item = &'a Arc<Product>>,
{
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    products
        .into_iter()
        .filter(|product| {
            fields
                .iter()
                .any(|&field| product.field(field).to_lowercase().contains(&query))
        })
        .cloned()
        .collect()
}
