//! Product Lookup Module
//!
//! Cache-aside access to the product database: read the cache first, fetch
//! upstream on a miss, store what the fetch returned.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::cache::{CacheStats, Clock, ProductCache, ProductPayload, SystemClock};
use crate::config::CacheConfig;
use crate::error::{LookupError, Result};
use crate::fetch::{Category, ProductFetcher};

// == Lookup Source ==
/// Where a lookup result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupSource {
    Cache,
    Network,
}

// == Product Lookup ==
/// Product cache plus the upstream fetcher it fronts.
///
/// The cache sits behind a single mutex; the lock is never held across the
/// upstream request.
pub struct ProductLookup<C = SystemClock> {
    cache: Mutex<ProductCache<ProductPayload, C>>,
    fetcher: Arc<dyn ProductFetcher>,
}

impl ProductLookup<SystemClock> {
    /// Creates a lookup service with an empty system-clock cache.
    pub fn with_config(config: CacheConfig, fetcher: Arc<dyn ProductFetcher>) -> Self {
        Self::new(ProductCache::new(config), fetcher)
    }
}

impl<C: Clock> ProductLookup<C> {
    /// Creates a lookup service around an existing cache.
    pub fn new(cache: ProductCache<ProductPayload, C>, fetcher: Arc<dyn ProductFetcher>) -> Self {
        Self {
            cache: Mutex::new(cache),
            fetcher,
        }
    }

    // == Lookup ==
    /// Returns the product for `ean`, from cache when possible.
    ///
    /// A miss triggers one upstream fetch; a found product is cached. A
    /// product unknown upstream yields [`LookupError::NotFound`] and is not
    /// cached. Upstream failures leave the cache untouched.
    pub async fn lookup(
        &self,
        ean: &str,
        category: Category,
    ) -> Result<(ProductPayload, LookupSource)> {
        if let Some(product) = self.cache.lock().await.get(ean) {
            return Ok((product, LookupSource::Cache));
        }

        debug!(ean, %category, "Fetching product after cache miss");
        let product = self
            .fetcher
            .fetch(ean, category)
            .await?
            .ok_or_else(|| LookupError::NotFound(ean.to_string()))?;

        self.cache.lock().await.set(ean, product.clone());
        Ok((product, LookupSource::Network))
    }

    // == Cache Pass-Throughs ==
    /// Statistics snapshot of the underlying cache.
    pub async fn stats(&self) -> CacheStats {
        self.cache.lock().await.stats()
    }

    /// Whether a live entry exists, without touching it.
    pub async fn is_cached(&self, ean: &str) -> bool {
        self.cache.lock().await.is_cached(ean)
    }

    /// Drops one cached product.
    pub async fn remove(&self, ean: &str) {
        self.cache.lock().await.remove(ean);
    }

    /// Drops every cached product and resets statistics.
    pub async fn clear(&self) {
        self.cache.lock().await.clear();
    }

    /// Returns the EANs from `eans` that are not cached.
    pub async fn preload(&self, eans: &[String]) -> Vec<String> {
        info!(count = eans.len(), "Preloading popular products");
        self.cache.lock().await.preload(eans)
    }
}
