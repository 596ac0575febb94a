//! Response DTOs for the product lookup API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheCounters, CacheStats, CacheStatsReport, ProductPayload};
use crate::lookup::LookupSource;

/// Response body for GET /products/:ean
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    /// The requested EAN
    pub ean: String,
    /// Whether the product came from cache or upstream
    pub source: LookupSource,
    /// Upstream product record, unmodified
    pub product: ProductPayload,
}

impl ProductResponse {
    /// Creates a new ProductResponse
    pub fn new(ean: impl Into<String>, source: LookupSource, product: ProductPayload) -> Self {
        Self {
            ean: ean.into(),
            source,
            product,
        }
    }
}

/// Response body for GET /cache/products/:ean
#[derive(Debug, Clone, Serialize)]
pub struct CachedResponse {
    pub ean: String,
    pub cached: bool,
}

impl CachedResponse {
    /// Creates a new CachedResponse
    pub fn new(ean: impl Into<String>, cached: bool) -> Self {
        Self {
            ean: ean.into(),
            cached,
        }
    }
}

/// Response body for DELETE /cache and DELETE /cache/products/:ean
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    /// Success message
    pub message: String,
}

impl MessageResponse {
    /// Response for a single removed product
    pub fn removed(ean: &str) -> Self {
        Self {
            message: format!("Product '{}' removed from cache", ean),
        }
    }

    /// Response for a full cache wipe
    pub fn cleared() -> Self {
        Self {
            message: "Cache cleared".to_string(),
        }
    }
}

/// Response body for the stats endpoint (GET /cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Display-ready statistics
    #[serde(flatten)]
    pub report: CacheStatsReport,
    /// Approximate size in bytes
    pub total_size_bytes: u64,
    /// Hit rate as a number, 0-100
    pub hit_rate_percent: f64,
    /// Raw request counters
    pub counters: CacheCounters,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            report: stats.report(),
            total_size_bytes: stats.total_size_estimate,
            hit_rate_percent: stats.hit_rate_percent,
            counters: stats.counters,
        }
    }
}

/// Response body for POST /cache/preload
#[derive(Debug, Clone, Serialize)]
pub struct PreloadResponse {
    /// Number of EANs checked
    pub requested: usize,
    /// EANs not in cache
    pub missing: Vec<String>,
}

/// Response body for the health check endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status
    pub status: String,
    /// Crate version
    pub version: String,
}

impl HealthResponse {
    /// Creates a healthy status response
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
