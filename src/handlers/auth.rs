// Admin login. One shared credential pair from the environment; no
// sessions, the constant token is all the dashboard expects.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// POST /api/login
///
/// When ADMIN_USER or ADMIN_PASS is unset no credential can match; an
/// unconfigured server refuses every login instead of accepting empty
/// fields.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let configured = state
        .config
        .admin_user
        .as_deref()
        .zip(state.config.admin_pass.as_deref());

    let Some((admin_user, admin_pass)) = configured else {
        warn!("Login attempt while ADMIN_USER/ADMIN_PASS are not configured");
        return Err(ApiError::unauthorized("Invalid credentials"));
    };

    let username = request.username.unwrap_or_default();
    let password = request.password.unwrap_or_default();
    if username == admin_user && password == admin_pass {
        Ok(Json(json!({ "success": true, "token": "admin" })))
    } else {
        warn!("Rejected login for {:?}", username);
        Err(ApiError::unauthorized("Invalid credentials"))
    }
}
