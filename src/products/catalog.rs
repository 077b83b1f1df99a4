//! Static product catalog and product types.

use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A product as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Kept as a JSON number so integers and floats round-trip unchanged.
    pub price: Number,
}

impl Product {
    fn fixed(id: &str, name: &str, price: u64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price: Number::from(price),
        }
    }
}

/// All known products, in listing order.
pub fn all() -> Vec<Product> {
    vec![
        Product::fixed("prod1", "Laptop", 1200),
        Product::fixed("prod2", "Mouse", 25),
        Product::fixed("prod3", "Keyboard", 75),
    ]
}

/// Look up a product by id.
pub fn find(id: &str) -> Option<Product> {
    all().into_iter().find(|p| p.id == id)
}
