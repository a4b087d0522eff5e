pub mod ai;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;

use std::sync::Arc;

use anyhow::Context;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::ai::GeminiClient;
use crate::config::AppConfig;
use crate::services::ReviewService;
use crate::store::{PgProductStore, ProductStore};

/// Shared state handed to every handler.
///
/// `store` is the only stateful collaborator; `reviews` and `ai` are thin
/// clients over it and the outside world. Cloned per request by axum, so
/// everything here is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
    pub reviews: ReviewService,
    pub ai: GeminiClient,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>, config: Arc<AppConfig>) -> Self {
        let reviews = ReviewService::new(store.clone());
        let ai = GeminiClient::new(config.gemini_api_key.clone());
        Self {
            store,
            reviews,
            ai,
            config,
        }
    }
}

/// Build the full router. Takes the state explicitly so the test suite can
/// drive the exact production routing against an in-memory store.
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // API
        .merge(product_routes())
        .merge(review_routes())
        .merge(auth_routes())
        .merge(ai_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn product_routes() -> Router<AppState> {
    use axum::routing::put;
    use handlers::products;

    Router::new()
        .route(
            "/api/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/api/products/:id",
            put(products::update_product).delete(products::delete_product),
        )
}

fn review_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::reviews;

    Router::new()
        .route(
            "/api/products/:id/generate-token",
            post(reviews::generate_token),
        )
        .route("/api/products/:id/reviews", post(reviews::submit_review))
}

fn auth_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::auth;

    Router::new().route("/api/login", post(auth::login))
}

fn ai_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::enhance;

    Router::new().route("/api/enhance-description", post(enhance::enhance_description))
}

async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Showroom API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Catalog and review-token backend for a stone & tile showroom",
            "endpoints": {
                "products": "/api/products[/:id]",
                "review_tokens": "/api/products/:id/generate-token",
                "reviews": "/api/products/:id/reviews",
                "login": "/api/login",
                "enhance": "/api/enhance-description",
                "health": "/health",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(err) => {
            error!("Health check failed: {}", err);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now,
                        "database": "unreachable"
                    }
                })),
            )
        }
    }
}

/// Bind and serve until SIGINT/SIGTERM.
///
/// The Postgres pool behind `PgProductStore` connects lazily on first use,
/// so the server comes up (and `/health` reports degraded) even while the
/// database is still unreachable.
pub async fn start_server() -> anyhow::Result<()> {
    let config = Arc::new(config::config().clone());
    let state = AppState::new(Arc::new(PgProductStore::new()), config.clone());
    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Showroom API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
