//! Product endpoint handlers.

use serde::Deserialize;
use serde_json::{json, Number, Value};
use uuid::Uuid;

use crate::http::{ApiError, HandlerResult, Reply, RequestContext};
use crate::products::catalog::{self, Product};

pub const INVALID_PRODUCT_MESSAGE: &str =
    "Invalid product data. 'name' and 'price' are required.";

/// `GET /products`
pub fn list_products(_ctx: &RequestContext) -> HandlerResult {
    tracing::info!("Received request to list products");
    Ok(Reply::ok(json!({ "products": catalog::all() })))
}

/// `GET /products/{product_id}`
pub fn get_product(ctx: &RequestContext) -> HandlerResult {
    let product_id = ctx.path_param("product_id").unwrap_or_default();
    tracing::info!(product_id, "Received request to get product");

    match catalog::find(product_id) {
        Some(product) => Ok(Reply::ok(serde_json::to_value(product)?)),
        None => {
            tracing::warn!(product_id, "Product not found");
            Err(ApiError::not_found(format!(
                "Product with ID '{product_id}' not found."
            )))
        }
    }
}

/// Shape accepted by `POST /products` before validation.
#[derive(Debug, Deserialize)]
struct NewProduct {
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    price: Option<Value>,
}

impl NewProduct {
    /// `name` must be a non-empty string and `price` a number.
    fn validate(self) -> Result<(String, Number), ApiError> {
        match (self.name, self.price) {
            (Some(Value::String(name)), Some(Value::Number(price))) if !name.is_empty() => {
                Ok((name, price))
            }
            _ => Err(ApiError::bad_request(INVALID_PRODUCT_MESSAGE)),
        }
    }
}

/// `POST /products`
pub fn create_product(ctx: &RequestContext) -> HandlerResult {
    tracing::info!("Received request to create a new product");

    let (name, price) = ctx
        .parse_body::<NewProduct>()
        .and_then(NewProduct::validate)
        .inspect_err(|_| tracing::warn!("Invalid product data provided for creation"))?;

    let product = Product {
        id: format!("prod_{}", Uuid::new_v4().simple()),
        name,
        price,
    };
    tracing::info!(product_id = %product.id, "Created new product");

    Ok(Reply::created(json!({
        "message": "Product created successfully",
        "product": product,
    })))
}
