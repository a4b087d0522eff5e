// Description enhancement: forwards rough product notes to the
// generative-text provider and returns the polished copy.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub current_text: Option<String>,
}

/// POST /api/enhance-description
pub async fn enhance_description(
    State(state): State<AppState>,
    Json(request): Json<EnhanceRequest>,
) -> Result<Json<Value>, ApiError> {
    let text = state
        .ai
        .enhance_description(
            request.name.as_deref().unwrap_or_default(),
            request.category.as_deref().unwrap_or_default(),
            request.current_text.as_deref().unwrap_or_default(),
        )
        .await?;
    Ok(Json(json!({ "success": true, "text": text })))
}
