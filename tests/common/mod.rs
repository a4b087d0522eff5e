#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use showroom_api::config::{AppConfig, DatabaseConfig};
use showroom_api::models::{NewProduct, Product, ProductId, ProductUpdate, Review};
use showroom_api::store::{MemoryProductStore, ProductStore, StoreError};
use showroom_api::{app, AppState};

pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASS: &str = "stone-h4rd";

/// Config with known admin credentials and no external secrets, so every
/// route can be exercised without touching the environment.
pub fn test_config() -> AppConfig {
    AppConfig {
        port: 0,
        database_url: None,
        admin_user: Some(ADMIN_USER.to_string()),
        admin_pass: Some(ADMIN_PASS.to_string()),
        gemini_api_key: None,
        database: DatabaseConfig {
            max_connections: 2,
            connect_timeout_secs: 1,
            statement_timeout_ms: 1_000,
        },
    }
}

/// The production router over an in-memory store. The store handle is
/// returned alongside so tests can seed and inspect state directly.
pub fn test_app() -> (Router, Arc<MemoryProductStore>) {
    test_app_with_config(test_config())
}

pub fn test_app_with_config(config: AppConfig) -> (Router, Arc<MemoryProductStore>) {
    let store = Arc::new(MemoryProductStore::new());
    let state = AppState::new(store.clone(), Arc::new(config));
    (app(state), store)
}

/// The production router over a store whose every call fails, for the
/// degraded health response and the 500 paths.
pub fn failing_app() -> Router {
    let store: Arc<dyn ProductStore> = Arc::new(FailingProductStore);
    app(AppState::new(store, Arc::new(test_config())))
}

/// Stands in for an unreachable database: every operation errors.
pub struct FailingProductStore;

fn store_down() -> StoreError {
    StoreError::ConfigMissing("DATABASE_URL")
}

#[async_trait]
impl ProductStore for FailingProductStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        Err(store_down())
    }

    async fn find_by_id(&self, _id: ProductId) -> Result<Option<Product>, StoreError> {
        Err(store_down())
    }

    async fn insert(&self, _new: NewProduct) -> Result<Product, StoreError> {
        Err(store_down())
    }

    async fn update(
        &self,
        _id: ProductId,
        _update: ProductUpdate,
    ) -> Result<Option<Product>, StoreError> {
        Err(store_down())
    }

    async fn delete(&self, _id: ProductId) -> Result<bool, StoreError> {
        Err(store_down())
    }

    async fn append_token(&self, _id: ProductId, _token: &str) -> Result<bool, StoreError> {
        Err(store_down())
    }

    async fn find_by_id_and_token(
        &self,
        _id: ProductId,
        _token: &str,
    ) -> Result<Option<Product>, StoreError> {
        Err(store_down())
    }

    async fn append_review_and_remove_token(
        &self,
        _id: ProductId,
        _token: &str,
        _review: Review,
    ) -> Result<Option<Product>, StoreError> {
        Err(store_down())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(store_down())
    }
}

/// A catalog entry with a fixed id, for seeding ahead of a request.
pub fn sample_product(id: i64) -> Product {
    Product {
        id,
        name: format!("Test Slab {}", id),
        category: "marble".to_string(),
        price: 12.5,
        stock: "In Stock".to_string(),
        description: "A demo slab".to_string(),
        origin: "Carrara, Italy".to_string(),
        finish: "High Gloss Polish".to_string(),
        images: vec![],
        review_tokens: vec![],
        reviews: vec![],
    }
}

pub async fn get(app: &Router, uri: &str) -> Result<(StatusCode, Value)> {
    request(app, "GET", uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
    request(app, "POST", uri, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> Result<(StatusCode, Value)> {
    request(app, "PUT", uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> Result<(StatusCode, Value)> {
    request(app, "DELETE", uri, None).await
}

/// Drive one request through the router without a socket and decode the
/// JSON body (Null when the body is empty).
async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&value)?))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}
