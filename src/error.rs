// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

use crate::ai::AiError;
use crate::store::StoreError;

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// One variant per failure class the API distinguishes: malformed requests,
/// bad credentials, rejected review tokens, missing products, and everything
/// the caller cannot act on. Internal causes are logged where they occur and
/// never echoed in responses.
#[derive(Debug, Error)]
pub enum ApiError {
    // 400 Bad Request
    #[error("{0}")]
    Validation(String),

    // 401 Unauthorized
    #[error("{0}")]
    Unauthorized(String),

    // 403 Forbidden - review token absent, consumed, or for another product
    #[error("{0}")]
    InvalidOrExpired(String),

    // 404 Not Found
    #[error("{0}")]
    NotFound(String),

    // 500 Internal Server Error
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InvalidOrExpired(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn invalid_or_expired(message: impl Into<String>) -> Self {
        ApiError::InvalidOrExpired(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

// Store failures surface as 500s with a generic message; the real cause is
// logged here and nowhere visible to clients.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        tracing::error!("product store error: {}", err);
        ApiError::internal("An error occurred while processing your request")
    }
}

// A missing key is an operator problem and gets named; every other AI
// failure collapses to the one message the storefront knows how to show.
impl From<AiError> for ApiError {
    fn from(err: AiError) -> Self {
        match err {
            AiError::MissingApiKey => ApiError::internal("Server missing API Key"),
            other => {
                tracing::error!("AI Error: {}", other);
                ApiError::internal("Failed to generate text")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = json!({
            "success": false,
            "error": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
