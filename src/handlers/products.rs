// Catalog CRUD for the admin dashboard and storefront.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::error::ApiError;
use crate::models::{NewProduct, Product, ProductId, ProductUpdate};
use crate::AppState;

/// GET /api/products - the full catalog as a bare JSON array.
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.store.list().await?;
    Ok(Json(products))
}

/// POST /api/products - create a product and return it with its assigned id.
///
/// Dependent collections start empty regardless of what the body carries.
pub async fn create_product(
    State(state): State<AppState>,
    Json(new): Json<NewProduct>,
) -> Result<Json<Product>, ApiError> {
    match state.store.insert(new).await {
        Ok(product) => {
            info!("Created product {} ({})", product.id, product.name);
            Ok(Json(product))
        }
        Err(err) => {
            error!("Product creation failed: {}", err);
            Err(ApiError::internal("Err"))
        }
    }
}

/// PUT /api/products/:id - merge the provided attribute fields.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(update): Json<ProductUpdate>,
) -> Result<Json<Product>, ApiError> {
    match state.store.update(id, update).await? {
        Some(product) => Ok(Json(product)),
        None => Err(ApiError::not_found("Product not found")),
    }
}

/// DELETE /api/products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Value>, ApiError> {
    if state.store.delete(id).await? {
        info!("Deleted product {}", id);
        Ok(Json(json!({ "success": true })))
    } else {
        Err(ApiError::not_found("Product not found"))
    }
}
