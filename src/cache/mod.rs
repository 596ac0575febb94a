//! Cache Module
//!
//! Provides in-memory product caching with lazy TTL expiry and least-value eviction.

mod clock;
mod entry;
pub mod eviction;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::{format_size, format_timestamp, CacheCounters, CacheStats, CacheStatsReport};
pub use store::ProductCache;

/// Opaque upstream product record, as returned by the product database.
pub type ProductPayload = serde_json::Value;
