//! API Handlers
//!
//! HTTP request handlers for each product lookup endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::info;

use crate::cache::ProductCache;
use crate::config::Config;
use crate::error::{LookupError, Result};
use crate::fetch::{OpenFoodFactsClient, ProductFetcher};
use crate::lookup::ProductLookup;
use crate::models::{
    validate_ean, CachedResponse, HealthResponse, MessageResponse, PreloadRequest,
    PreloadResponse, ProductQuery, ProductResponse, StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside product lookups
    pub lookup: Arc<ProductLookup>,
}

impl AppState {
    /// Creates a new AppState around a cache and an upstream fetcher.
    pub fn new(cache: ProductCache, fetcher: Arc<dyn ProductFetcher>) -> Self {
        Self {
            lookup: Arc::new(ProductLookup::new(cache, fetcher)),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the cache and an Open Food Facts client from the Config.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = OpenFoodFactsClient::from_config(config)?;
        Ok(Self::new(ProductCache::new(config.cache), Arc::new(fetcher)))
    }
}

fn ensure_valid_ean(ean: &str) -> Result<()> {
    match validate_ean(ean) {
        Some(msg) => Err(LookupError::InvalidRequest(msg)),
        None => Ok(()),
    }
}

/// Handler for GET /products/:ean
///
/// Serves the product from cache, fetching upstream on a miss.
pub async fn product_handler(
    State(state): State<AppState>,
    Path(ean): Path<String>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<ProductResponse>> {
    ensure_valid_ean(&ean)?;

    let (product, source) = state.lookup.lookup(&ean, query.category).await?;

    Ok(Json(ProductResponse::new(ean, source, product)))
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.lookup.stats().await))
}

/// Handler for GET /cache/products/:ean
///
/// Peeks at the cache without counting a request.
pub async fn cached_handler(
    State(state): State<AppState>,
    Path(ean): Path<String>,
) -> Result<Json<CachedResponse>> {
    ensure_valid_ean(&ean)?;

    let cached = state.lookup.is_cached(&ean).await;
    Ok(Json(CachedResponse::new(ean, cached)))
}

/// Handler for DELETE /cache/products/:ean
pub async fn remove_handler(
    State(state): State<AppState>,
    Path(ean): Path<String>,
) -> Result<Json<MessageResponse>> {
    ensure_valid_ean(&ean)?;

    state.lookup.remove(&ean).await;
    Ok(Json(MessageResponse::removed(&ean)))
}

/// Handler for DELETE /cache
///
/// Wipes every cached product and resets statistics.
pub async fn clear_handler(State(state): State<AppState>) -> Json<MessageResponse> {
    state.lookup.clear().await;
    info!("Cache cleared on request");
    Json(MessageResponse::cleared())
}

/// Handler for POST /cache/preload
pub async fn preload_handler(
    State(state): State<AppState>,
    Json(req): Json<PreloadRequest>,
) -> Result<Json<PreloadResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(LookupError::InvalidRequest(error_msg));
    }

    let missing = state.lookup.preload(&req.eans).await;
    Ok(Json(PreloadResponse {
        requested: req.eans.len(),
        missing,
    }))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
