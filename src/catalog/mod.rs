//! Product catalog model.
//!
//! A catalog is the full list of products returned by the product-data
//! collaborator. Products are shared as `Arc<Product>` so that the prefix index
//! and the search controller can hand out references without copying records.

mod source;

use std::fmt;
use std::sync::Arc;

use fnv::{FnvHashMap, FnvHashSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use source::{CatalogSource, JsonFileSource, StaticSource};

#[cfg(test)]
pub use source::MockCatalogSource;

/// Identifier of a product. The back end hands out either numeric ids or
/// string ids (document database object ids).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric identifier
    Int(i64),
    /// String identifier
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Int(id) => write!(f, "{id}"),
            ProductId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId::Int(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::Text(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId::Text(id)
    }
}

/// A product field that can be indexed and searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexedField {
    /// The product display name
    Name,
    /// The product category
    Category,
}

impl IndexedField {
    /// Fields indexed when nothing else is configured.
    pub fn defaults() -> Vec<IndexedField> {
        vec![IndexedField::Name, IndexedField::Category]
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier within one catalog snapshot
    #[serde(alias = "_id")]
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Display category
    pub category: String,

    /// Unit price as sent by the back end: a number, or a decimal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,

    /// Units in stock
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,

    /// Explicit availability flag, when the back end provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,

    /// Any other attributes, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Creates a product with only the indexed attributes set.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price: None,
            stock: None,
            in_stock: None,
            extra: Map::new(),
        }
    }

    /// Sets the unit price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(Value::from(price));
        self
    }

    /// The unit price as a number, when it is one or parses as one.
    pub fn unit_price(&self) -> Option<f64> {
        match self.price.as_ref()? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Sets the stock count.
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Returns the string stored under the given indexed field.
    pub fn field(&self, field: IndexedField) -> &str {
        match field {
            IndexedField::Name => &self.name,
            IndexedField::Category => &self.category,
        }
    }

    /// Whether the product belongs to `category`, ignoring case and
    /// surrounding whitespace.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.trim().to_lowercase() == category.trim().to_lowercase()
    }

    /// Whether the product can currently be sold.
    ///
    /// The explicit flag wins; otherwise a known stock count must be positive.
    /// Products with neither attribute are treated as available.
    pub fn is_in_stock(&self) -> bool {
        match (self.in_stock, self.stock) {
            (Some(flag), _) => flag,
            (None, Some(stock)) => stock > 0,
            (None, None) => true,
        }
    }
}

/// One fetched catalog. Immutable; a refresh produces a new snapshot.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    products: Vec<Arc<Product>>,
}

impl CatalogSnapshot {
    /// Creates a snapshot owning the given products.
    pub fn new(products: Vec<Product>) -> Self {
        products.into_iter().collect()
    }

    /// Creates a snapshot from already shared products.
    pub fn from_shared(products: Vec<Arc<Product>>) -> Self {
        Self { products }
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the snapshot has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Iterates over the products in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Product>> {
        self.products.iter()
    }

    /// Distinct category names in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = FnvHashSet::default();
        self.products
            .iter()
            .map(|product| product.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }

    /// A new snapshot holding only the products that are in stock.
    pub fn in_stock_only(&self) -> CatalogSnapshot {
        Self::from_shared(
            self.products
                .iter()
                .filter(|product| product.is_in_stock())
                .cloned()
                .collect(),
        )
    }

    /// Ids shared by more than one product, in first-seen order.
    pub fn duplicate_ids(&self) -> Vec<&ProductId> {
        let mut counts: FnvHashMap<&ProductId, usize> = FnvHashMap::default();
        let mut order = Vec::new();
        for product in &self.products {
            let count = counts.entry(&product.id).or_insert(0);
            *count += 1;
            if *count == 2 {
                order.push(&product.id);
            }
        }
        order
    }
}

impl FromIterator<Product> for CatalogSnapshot {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self {
            products: iter.into_iter().map(Arc::new).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"id": 1, "name": "Basmati Rice", "category": "Groceries", "price": 180, "stock": 45, "demand_level": "High"},
        {"_id": "64f0c2", "name": "Turmeric Powder", "category": "Spices", "price": 80, "stock": 0},
        {"id": 3, "name": "Toor Dal", "category": "Groceries", "in_stock": false, "stock": 12}
    ]"#;

    #[test]
    fn test_parse_catalog_json() {
        let products: Vec<Product> = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(products.len(), 3);

        assert_eq!(products[0].id, ProductId::Int(1));
        assert_eq!(products[0].unit_price(), Some(180.0));
        assert_eq!(products[0].extra.get("demand_level"), Some(&Value::from("High")));

        assert_eq!(products[1].id, ProductId::Text("64f0c2".to_string()));
        assert!(products[1].extra.is_empty());
    }

    #[test]
    fn test_passthrough_attributes_survive_serialization() {
        let products: Vec<Product> = serde_json::from_str(SAMPLE).unwrap();
        let json = serde_json::to_value(&products[0]).unwrap();
        assert_eq!(json["demand_level"], "High");
        assert_eq!(json["id"], 1);
        assert!(json.get("in_stock").is_none());
    }

    #[test]
    fn test_in_stock_rules() {
        let products: Vec<Product> = serde_json::from_str(SAMPLE).unwrap();
        assert!(products[0].is_in_stock());
        assert!(!products[1].is_in_stock());
        // explicit flag beats the stock count
        assert!(!products[2].is_in_stock());
        assert!(Product::new(9, "Ghee", "Dairy").is_in_stock());
    }

    #[test]
    fn test_field_accessor() {
        let product = Product::new(1, "Amul Milk", "Groceries");
        assert_eq!(product.field(IndexedField::Name), "Amul Milk");
        assert_eq!(product.field(IndexedField::Category), "Groceries");
    }

    #[test]
    fn test_snapshot_categories_and_filters() {
        let products: Vec<Product> = serde_json::from_str(SAMPLE).unwrap();
        let snapshot = CatalogSnapshot::new(products);

        assert_eq!(snapshot.categories(), vec!["Groceries", "Spices"]);

        let available = snapshot.in_stock_only();
        assert_eq!(available.len(), 1);
        assert_eq!(available.products()[0].name, "Basmati Rice");
    }

    #[test]
    fn test_category_membership() {
        let product = Product::new(1, "Basmati Rice", "Groceries");
        assert!(product.in_category("groceries"));
        assert!(product.in_category(" GROCERIES "));
        assert!(!product.in_category("Grocer"));
        assert!(!product.in_category(""));
    }

    #[test]
    fn test_decimal_string_price() {
        let json = r#"[{"id": 1, "name": "Basmati Rice", "category": "Groceries", "price": "180.00", "stock": 45, "in_stock": true}]"#;
        let products: Vec<Product> = serde_json::from_str(json).unwrap();

        assert_eq!(products[0].unit_price(), Some(180.0));
        assert!(products[0].is_in_stock());
        // the original representation is written back unchanged
        let written = serde_json::to_value(&products[0]).unwrap();
        assert_eq!(written["price"], "180.00");
    }

    #[test]
    fn test_unparseable_price_is_kept_opaque() {
        let product: Product = serde_json::from_str(
            r#"{"id": 2, "name": "Toor Dal", "category": "Groceries", "price": "on request"}"#,
        )
        .unwrap();
        assert_eq!(product.unit_price(), None);
        assert_eq!(product.price, Some(Value::from("on request")));
        assert_eq!(Product::new(3, "Ghee", "Dairy").with_price(520.5).unit_price(), Some(520.5));
    }

    #[test]
    fn test_duplicate_ids() {
        let snapshot = CatalogSnapshot::new(vec![
            Product::new(1, "Tea", "Beverages"),
            Product::new(2, "Coffee", "Beverages"),
            Product::new(1, "Green Tea", "Beverages"),
            Product::new(1, "Black Tea", "Beverages"),
        ]);
        assert_eq!(snapshot.duplicate_ids(), vec![&ProductId::Int(1)]);
        assert!(CatalogSnapshot::default().duplicate_ids().is_empty());
    }
}
