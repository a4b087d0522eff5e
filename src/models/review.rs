use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer review attached to a product.
///
/// Reviews are only ever created through token redemption, which assigns
/// `date` server-side. Image references are optional on submission and
/// default to an empty list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub user: String,
    pub rating: i32,
    pub text: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub date: DateTime<Utc>,
}

impl Review {
    /// Build a review stamped with the current server time.
    pub fn new(user: String, rating: i32, text: String, images: Vec<String>) -> Self {
        Self {
            user,
            rating,
            text,
            images,
            date: Utc::now(),
        }
    }
}
