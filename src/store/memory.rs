//! In-memory product store.
//!
//! Backs the test suite and local demos. All mutation happens under a single
//! write lock, so the token check and the review append in
//! `append_review_and_remove_token` are one critical section.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{NewProduct, Product, ProductId, ProductUpdate, Review};
use crate::store::{ProductStore, StoreError};

#[derive(Default)]
struct Inner {
    products: HashMap<ProductId, Product>,
    last_id: ProductId,
}

/// Process-local `ProductStore` with no persistence.
#[derive(Default)]
pub struct MemoryProductStore {
    inner: RwLock<Inner>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload a product as-is, including its tokens and reviews. Test setup
    /// helper; ids must not repeat.
    pub async fn seed(&self, product: Product) {
        let mut inner = self.inner.write().await;
        inner.last_id = inner.last_id.max(product.id);
        inner.products.insert(product.id, product);
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let inner = self.inner.read().await;
        let mut products: Vec<Product> = inner.products.values().cloned().collect();
        // Ids are assigned monotonically, so this is insertion order.
        products.sort_by_key(|p| p.id);
        Ok(products)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.products.get(&id).cloned())
    }

    async fn insert(&self, new: NewProduct) -> Result<Product, StoreError> {
        let mut inner = self.inner.write().await;
        let mut id = Utc::now().timestamp_millis();
        if id <= inner.last_id {
            id = inner.last_id + 1;
        }
        inner.last_id = id;
        let product = new.into_product(id);
        inner.products.insert(id, product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Option<Product>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.products.get_mut(&id).map(|product| {
            update.apply(product);
            product.clone()
        }))
    }

    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.products.remove(&id).is_some())
    }

    async fn append_token(&self, id: ProductId, token: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.products.get_mut(&id) {
            Some(product) => {
                product.review_tokens.push(token.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_id_and_token(
        &self,
        id: ProductId,
        token: &str,
    ) -> Result<Option<Product>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .products
            .get(&id)
            .filter(|p| p.review_tokens.iter().any(|t| t == token))
            .cloned())
    }

    async fn append_review_and_remove_token(
        &self,
        id: ProductId,
        token: &str,
        review: Review,
    ) -> Result<Option<Product>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(product) = inner.products.get_mut(&id) else {
            return Ok(None);
        };
        let Some(pos) = product.review_tokens.iter().position(|t| t == token) else {
            return Ok(None);
        };
        product.review_tokens.remove(pos);
        product.reviews.push(review);
        Ok(Some(product.clone()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn sample(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            category: "Marble".to_string(),
            price: 120.0,
            stock: "In Stock".to_string(),
            description: "Sample slab".to_string(),
            origin: "Italy".to_string(),
            finish: "Polished".to_string(),
            images: vec![],
        }
    }

    #[tokio::test]
    async fn insert_assigns_distinct_ids_and_keeps_order() {
        let store = MemoryProductStore::new();
        let a = store.insert(sample("A")).await.unwrap();
        let b = store.insert(sample("B")).await.unwrap();
        let c = store.insert(sample("C")).await.unwrap();
        assert!(a.id < b.id && b.id < c.id);

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn token_lifecycle_consumes_exactly_once() {
        let store = MemoryProductStore::new();
        let product = store.insert(sample("Slab")).await.unwrap();

        assert!(store.append_token(product.id, "abc123").await.unwrap());
        assert!(store
            .find_by_id_and_token(product.id, "abc123")
            .await
            .unwrap()
            .is_some());

        let review = Review::new("Sarah".into(), 5, "Beautiful stone".into(), vec![]);
        let updated = store
            .append_review_and_remove_token(product.id, "abc123", review)
            .await
            .unwrap()
            .unwrap();
        assert!(updated.review_tokens.is_empty());
        assert_eq!(updated.reviews.len(), 1);
        assert_eq!(updated.reviews[0].user, "Sarah");

        // Spent token no longer validates and cannot redeem again.
        assert!(store
            .find_by_id_and_token(product.id, "abc123")
            .await
            .unwrap()
            .is_none());
        let again = Review::new("Mallory".into(), 1, "replay".into(), vec![]);
        assert!(store
            .append_review_and_remove_token(product.id, "abc123", again)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn concurrent_redemption_of_same_token_has_one_winner() {
        let store = Arc::new(MemoryProductStore::new());
        let product = store.insert(sample("Slab")).await.unwrap();
        store.append_token(product.id, "race").await.unwrap();

        let s1 = Arc::clone(&store);
        let s2 = Arc::clone(&store);
        let id = product.id;
        let (r1, r2) = tokio::join!(
            async move {
                let review = Review::new("first".into(), 5, "one".into(), vec![]);
                s1.append_review_and_remove_token(id, "race", review).await
            },
            async move {
                let review = Review::new("second".into(), 4, "two".into(), vec![]);
                s2.append_review_and_remove_token(id, "race", review).await
            },
        );

        let wins = [r1.unwrap(), r2.unwrap()]
            .iter()
            .filter(|r| r.is_some())
            .count();
        assert_eq!(wins, 1);

        let product = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(product.reviews.len(), 1);
        assert!(product.review_tokens.is_empty());
    }

    #[tokio::test]
    async fn tokens_do_not_cross_products() {
        let store = MemoryProductStore::new();
        let a = store.insert(sample("A")).await.unwrap();
        let b = store.insert(sample("B")).await.unwrap();
        store.append_token(a.id, "tok-a").await.unwrap();

        let review = Review::new("u".into(), 3, "t".into(), vec![]);
        assert!(store
            .append_review_and_remove_token(b.id, "tok-a", review)
            .await
            .unwrap()
            .is_none());
        // The token is still live on its own product.
        assert!(store
            .find_by_id_and_token(a.id, "tok-a")
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn update_and_delete_miss_return_none_and_false() {
        let store = MemoryProductStore::new();
        assert!(store
            .update(42, ProductUpdate::default())
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete(42).await.unwrap());
        assert!(!store.append_token(42, "t").await.unwrap());
    }
}
