use serde::{Deserialize, Serialize};

use super::review::Review;

/// Public numeric product identifier.
///
/// Distinct from the storage-internal row id; assigned by the store at
/// creation time (epoch milliseconds, bumped until unique) and parsed from
/// path parameters exactly once at the HTTP boundary.
pub type ProductId = i64;

/// A catalog product with its dependent collections.
///
/// `review_tokens` holds the single-use tokens currently valid for this
/// product; `reviews` is the ordered, append-only list of submitted reviews.
/// Both serialize under the original API field names (`reviewTokens`,
/// `reviews`) and default to empty when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub stock: String,
    pub description: String,
    pub origin: String,
    pub finish: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub review_tokens: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

/// Creation payload for `POST /api/products`.
///
/// Field presence is not validated (matching the admin UI contract); missing
/// attributes land as empty values. The dependent collections are not
/// accepted here at all: new products always start with none.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProduct {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub stock: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub finish: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl NewProduct {
    /// Materialize the product under a store-assigned id.
    ///
    /// This is the single construction point for products: the dependent
    /// collections are explicitly empty, never absent.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            stock: self.stock,
            description: self.description,
            origin: self.origin,
            finish: self.finish,
            images: self.images,
            review_tokens: Vec::new(),
            reviews: Vec::new(),
        }
    }
}

/// Partial update payload for `PUT /api/products/:id`.
///
/// Only the attribute fields are updatable; `review_tokens` and `reviews`
/// belong to the token workflow and cannot be touched through this path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<String>,
    pub description: Option<String>,
    pub origin: Option<String>,
    pub finish: Option<String>,
    pub images: Option<Vec<String>>,
}

impl ProductUpdate {
    /// Merge the provided fields into an existing product.
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(origin) = self.origin {
            product.origin = origin;
        }
        if let Some(finish) = self.finish {
            product.finish = finish;
        }
        if let Some(images) = self.images {
            product.images = images;
        }
    }
}
