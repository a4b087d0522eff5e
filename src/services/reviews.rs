//! Review token workflow.
//!
//! A token authorizes exactly one review for exactly one product. Issuance
//! appends a fresh random token to the product's live set; redemption
//! validates and consumes it in a single store transition, so a token can
//! never be spent twice and a review can never land without one.

use std::sync::Arc;

use rand::rngs::OsRng;
use rand::RngCore;
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::models::{ProductId, Review};
use crate::store::ProductStore;

/// Review submission body for `POST /api/products/:id/reviews`.
///
/// Every field is optional at the serde layer: presence is a workflow
/// concern, checked in [`ReviewService::redeem`] so that a missing field
/// comes back as a 400 with the usual error envelope instead of an
/// extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewSubmission {
    pub token: Option<String>,
    pub user: Option<String>,
    pub rating: Option<Value>,
    pub text: Option<String>,
    pub images: Option<Vec<String>>,
}

/// Issues and redeems single-use review tokens.
#[derive(Clone)]
pub struct ReviewService {
    store: Arc<dyn ProductStore>,
}

impl ReviewService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    /// Generate a fresh token and attach it to the product.
    ///
    /// Concurrent issuance is allowed: the token set accumulates, each call
    /// yielding a distinct value. Fails with Not-Found when the product does
    /// not exist, in which case no token is recorded anywhere.
    pub async fn issue(&self, id: ProductId) -> Result<String, ApiError> {
        let token = generate_token();
        match self.store.append_token(id, &token).await {
            Ok(true) => {
                info!("Issued review token for product {}", id);
                Ok(token)
            }
            Ok(false) => Err(ApiError::not_found("Product not found")),
            Err(err) => {
                error!("Token issuance failed for product {}: {}", id, err);
                Err(ApiError::internal("Server error generating token"))
            }
        }
    }

    /// Validate and consume a token, recording its review.
    ///
    /// Field checks happen before any store write, so a submission rejected
    /// for a missing `user`/`rating`/`text` leaves the token spendable. The
    /// write itself is one atomic append-and-remove: replaying a consumed
    /// token, or presenting one against the wrong product, is rejected
    /// without distinguishing the two causes.
    pub async fn redeem(
        &self,
        id: ProductId,
        submission: ReviewSubmission,
    ) -> Result<(), ApiError> {
        let token = submission.token.unwrap_or_default();
        if token.is_empty() {
            return Err(ApiError::validation("Missing Token"));
        }

        let user = submission.user.filter(|u| !u.is_empty());
        let text = submission.text.filter(|t| !t.is_empty());
        let rating = submission.rating.as_ref().and_then(coerce_rating);

        let mut missing = Vec::new();
        if user.is_none() {
            missing.push("user");
        }
        if rating.is_none() {
            missing.push("rating");
        }
        if text.is_none() {
            missing.push("text");
        }
        if !missing.is_empty() {
            return Err(ApiError::validation(format!(
                "Missing required review fields: {}",
                missing.join(", ")
            )));
        }

        // The filters above guarantee the unwraps cannot fire.
        let review = Review::new(
            user.unwrap_or_default(),
            rating.unwrap_or_default(),
            text.unwrap_or_default(),
            submission.images.unwrap_or_default(),
        );

        match self
            .store
            .append_review_and_remove_token(id, &token, review)
            .await
        {
            Ok(Some(_)) => {
                info!("Review saved for product {}", id);
                Ok(())
            }
            Ok(None) => {
                warn!("Rejected invalid or expired token for product {}", id);
                Err(ApiError::invalid_or_expired(
                    "This link has expired or is invalid.",
                ))
            }
            Err(err) => {
                error!("Review redemption failed for product {}: {}", id, err);
                Err(ApiError::internal("Failed to save review"))
            }
        }
    }
}

/// 16 CSPRNG bytes as 32 lowercase hex chars.
fn generate_token() -> String {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Single coercion point for the rating field, which clients send as either
/// a JSON number or a numeric string. Fractional values truncate toward
/// zero; anything unparseable or outside `i32` range counts as absent.
fn coerce_rating(value: &Value) -> Option<i32> {
    let whole = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?,
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed.parse::<i64>().ok().or_else(|| {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f as i64)
            })?
        }
        _ => return None,
    };
    i32::try_from(whole).ok()
}
