//! API Routes
//!
//! Configures the Axum router with all product lookup endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cached_handler, clear_handler, health_handler, preload_handler, product_handler,
    remove_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /products/:ean` - Look up a product (cache first, then upstream)
/// - `GET /cache/stats` - Cache statistics
/// - `GET /cache/products/:ean` - Whether a product is cached
/// - `DELETE /cache/products/:ean` - Drop one cached product
/// - `DELETE /cache` - Clear the cache
/// - `POST /cache/preload` - Report which EANs are not cached
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/products/:ean", get(product_handler))
        .route("/cache", delete(clear_handler))
        .route("/cache/stats", get(stats_handler))
        .route("/cache/preload", post(preload_handler))
        .route(
            "/cache/products/:ean",
            get(cached_handler).delete(remove_handler),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
