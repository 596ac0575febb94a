//! Product Cache - product lookups with an in-memory response cache
//!
//! Fronts the Open Food Facts API with a TTL cache that evicts by
//! access frequency over idle time and tracks its hit rate.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod lookup;
pub mod models;

pub use api::AppState;
pub use cache::{CacheStats, ProductCache};
pub use config::{CacheConfig, Config};
pub use lookup::ProductLookup;
