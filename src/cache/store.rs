//! Product Cache Module
//!
//! Main cache engine: HashMap storage with lazy TTL expiry, least-value
//! eviction and hit/miss accounting.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cache::eviction::select_victims;
use crate::cache::{CacheCounters, CacheEntry, CacheStats, Clock, ProductPayload, SystemClock};
use crate::config::{CacheConfig, MS_PER_HOUR};

// == Product Cache ==
/// In-memory product cache keyed by EAN.
///
/// All operations are synchronous and bounded by the number of entries.
/// Callers sharing a cache across tasks must serialize access, `get` included,
/// since reads update entry metadata.
#[derive(Debug)]
pub struct ProductCache<V = ProductPayload, C = SystemClock> {
    /// EAN -> cached payload
    entries: HashMap<String, CacheEntry<V>>,
    /// Request counters
    counters: CacheCounters,
    /// Fixed tuning
    config: CacheConfig,
    /// Time source
    clock: C,
}

impl<V> ProductCache<V, SystemClock>
where
    V: Clone + Serialize,
{
    // == Constructor ==
    /// Creates an empty cache on the system clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<V, C> ProductCache<V, C>
where
    V: Clone + Serialize,
    C: Clock,
{
    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            counters: CacheCounters::new(),
            config,
            clock,
        }
    }

    /// The configuration this cache was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Get ==
    /// Returns the payload cached for `key`, if present and not expired.
    ///
    /// Every call counts as a request. An expired entry is removed and
    /// counted as a miss. A hit bumps the entry's access count and
    /// last-access time.
    pub fn get(&mut self, key: &str) -> Option<V> {
        self.counters.record_request();
        let now = self.clock.now_ms();
        let expiry_ms = self.config.expiry_ms();

        let Some(entry) = self.entries.get_mut(key) else {
            debug!(ean = key, "Cache miss");
            self.counters.record_miss();
            return None;
        };

        if !entry.is_expired(now, expiry_ms) {
            entry.touch(now);
            debug!(ean = key, access_count = entry.access_count, "Cache hit");
            self.counters.record_hit();
            return Some(entry.data.clone());
        }

        let age_ms = entry.age_ms(now);
        self.entries.remove(key);
        self.counters.record_miss();
        debug!(
            ean = key,
            age_hours = age_ms as f64 / MS_PER_HOUR as f64,
            "Cache entry expired"
        );
        None
    }

    // == Set ==
    /// Stores `data` under `key`, replacing any previous entry.
    ///
    /// The entry starts with an access count of 1. If the cache then holds
    /// more than `max_entries`, an eviction pass runs.
    pub fn set(&mut self, key: impl Into<String>, data: V) {
        let key = key.into();
        let now = self.clock.now_ms();

        self.entries.insert(key.clone(), CacheEntry::new(data, now));
        debug!(ean = %key, size = self.entries.len(), "Product cached");

        if self.entries.len() > self.config.max_entries {
            self.evict(now);
        }
    }

    // == Remove ==
    /// Deletes the entry for `key`; no-op when absent.
    pub fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            debug!(ean = key, "Product removed from cache");
        }
    }

    // == Clear ==
    /// Drops every entry and resets all counters.
    pub fn clear(&mut self) {
        let removed = self.entries.len();
        self.entries.clear();
        self.counters = CacheCounters::new();
        info!(removed, "Cache cleared");
    }

    // == Is Cached ==
    /// Whether a live entry exists for `key`.
    ///
    /// Uses the same expiry rule as [`get`](Self::get) but touches nothing:
    /// no counters, no metadata, no removal.
    pub fn is_cached(&self, key: &str) -> bool {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now, self.config.expiry_ms()))
    }

    // == Stats ==
    /// Computes statistics by scanning every entry.
    ///
    /// If an entry cannot be serialized for the size estimate, the failure is
    /// logged and zeroed statistics are returned.
    pub fn stats(&self) -> CacheStats {
        let mut total_size: u64 = 0;
        let mut oldest: Option<u64> = None;
        let mut newest: Option<u64> = None;

        for (key, entry) in &self.entries {
            match serde_json::to_vec(entry) {
                Ok(bytes) => total_size += (bytes.len() + key.len()) as u64,
                Err(err) => {
                    warn!(ean = %key, error = %err, "Failed to size cache entry");
                    return CacheStats::default();
                }
            }
            oldest = Some(oldest.map_or(entry.created_at, |t| t.min(entry.created_at)));
            newest = Some(newest.map_or(entry.created_at, |t| t.max(entry.created_at)));
        }

        CacheStats {
            total_items: self.entries.len(),
            total_size_estimate: total_size,
            hit_rate_percent: self.counters.hit_rate_percent(),
            oldest_entry: oldest,
            newest_entry: newest,
            counters: self.counters,
        }
    }

    // == Hit Rate ==
    /// Hits as a percentage of all reads since the last clear.
    pub fn hit_rate(&self) -> f64 {
        self.counters.hit_rate_percent()
    }

    // == Preload ==
    /// Reads each EAN through [`get`](Self::get) and returns the ones not cached.
    ///
    /// Reads count towards the statistics. The returned EANs are candidates
    /// for a background fetch by the caller.
    pub fn preload<I, S>(&mut self, eans: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let missing: Vec<String> = eans
            .into_iter()
            .filter_map(|ean| {
                let ean = ean.as_ref();
                self.get(ean).is_none().then(|| ean.to_string())
            })
            .collect();
        info!(missing = missing.len(), "Preload checked popular products");
        missing
    }

    // == Length ==
    /// Returns the current number of entries, expired ones included until read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Access metadata for `key` without touching it.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    // == Evict ==
    fn evict(&mut self, now: u64) {
        let before = self.entries.len();
        let victims = select_victims(
            &self.entries,
            now,
            self.config.max_entries,
            self.config.eviction_overshoot,
        );

        for key in &victims {
            self.entries.remove(key);
        }
        self.counters.record_evictions(victims.len());

        info!(
            before,
            removed = victims.len(),
            after = self.entries.len(),
            "Cache eviction pass completed"
        );
    }
}
