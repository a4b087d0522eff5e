// Review token endpoints. The state transitions live in
// `services::reviews`; these handlers only shape the HTTP envelope.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::models::ProductId;
use crate::services::ReviewSubmission;
use crate::AppState;

/// POST /api/products/:id/generate-token - issue a single-use review token.
pub async fn generate_token(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Value>, ApiError> {
    let token = state.reviews.issue(id).await?;
    Ok(Json(json!({ "success": true, "token": token })))
}

/// POST /api/products/:id/reviews - redeem a token, consuming it.
pub async fn submit_review(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(submission): Json<ReviewSubmission>,
) -> Result<Json<Value>, ApiError> {
    state.reviews.redeem(id, submission).await?;
    Ok(Json(json!({ "success": true })))
}
