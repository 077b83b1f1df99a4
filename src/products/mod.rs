//! Product endpoints.
//!
//! | Method | Template                 | Success |
//! |--------|--------------------------|---------|
//! | GET    | `/products`              | 200 `{products: [...]}` |
//! | GET    | `/products/{product_id}` | 200 product, 404 if unknown |
//! | POST   | `/products`              | 201 `{message, product}` |

pub mod catalog;
pub mod handlers;

use crate::routing::{RouteError, Router};

/// Build the route table for the product endpoints.
pub fn router() -> Result<Router, RouteError> {
    Ok(Router::builder()
        .get("/products", handlers::list_products)?
        .get("/products/{product_id}", handlers::get_product)?
        .post("/products", handlers::create_product)?
        .build())
}
