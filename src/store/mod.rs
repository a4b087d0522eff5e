//! Product Store abstraction.
//!
//! The catalog lives in an external document-style store. This module defines
//! the `ProductStore` trait the rest of the crate programs against, with a
//! Postgres implementation for deployment and an in-memory implementation for
//! the test suite.

pub mod memory;
pub mod postgres;

pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewProduct, Product, ProductId, ProductUpdate, Review};

/// Errors from a product store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Id space exhausted while inserting product")]
    IdExhausted,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence contract for products and their dependent collections.
///
/// The one non-negotiable guarantee is `append_review_and_remove_token`: the
/// review append and the token removal must land as a single atomic
/// transition on the product record, so two racing redemptions of the same
/// token resolve to exactly one winner. Backends without per-record atomic
/// updates must wrap the check-and-mutate sequence in their own exclusion.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, in insertion order.
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// Look up a product by its public numeric id.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Create a product; the store assigns the public id and the dependent
    /// collections start empty.
    async fn insert(&self, new: NewProduct) -> Result<Product, StoreError>;

    /// Merge the provided fields into an existing product. Returns `None`
    /// when no product matches.
    async fn update(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Option<Product>, StoreError>;

    /// Delete a product. Returns `false` when no product matched.
    async fn delete(&self, id: ProductId) -> Result<bool, StoreError>;

    /// Append a review token to a product's live-token set. Returns `false`
    /// (and appends nothing) when no product matches.
    async fn append_token(&self, id: ProductId, token: &str) -> Result<bool, StoreError>;

    /// Look up a product only if it currently holds the presented token.
    /// Product-missing and token-missing are indistinguishable to callers.
    async fn find_by_id_and_token(
        &self,
        id: ProductId,
        token: &str,
    ) -> Result<Option<Product>, StoreError>;

    /// Atomically append `review` and remove `token` from the product,
    /// keyed on the token still being present. Returns the updated product,
    /// or `None` when the product is missing or the token is not (or no
    /// longer) valid for it - in which case nothing was written.
    async fn append_review_and_remove_token(
        &self,
        id: ProductId,
        token: &str,
        review: Review,
    ) -> Result<Option<Product>, StoreError>;

    /// Liveness probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}
