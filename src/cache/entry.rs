//! Cache Entry Module
//!
//! Defines a cached product payload and its access metadata.

use serde::Serialize;

// == Cache Entry ==
/// Represents a single cached product with access metadata.
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntry<V> {
    /// The stored product payload
    pub data: V,
    /// Write timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Number of reads served, counting the write as the first
    pub access_count: u64,
    /// Timestamp of the last read or write (Unix milliseconds)
    pub last_accessed_at: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a fresh entry written at `now_ms`.
    pub fn new(data: V, now_ms: u64) -> Self {
        Self {
            data,
            created_at: now_ms,
            access_count: 1,
            last_accessed_at: now_ms,
        }
    }

    // == Age ==
    /// Milliseconds since the entry was written.
    ///
    /// A clock reading earlier than `created_at` yields 0.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_at)
    }

    // == Is Expired ==
    /// Checks whether the entry is older than `expiry_ms`.
    ///
    /// An entry exactly `expiry_ms` old is still live.
    pub fn is_expired(&self, now_ms: u64, expiry_ms: u64) -> bool {
        self.age_ms(now_ms) > expiry_ms
    }

    // == Touch ==
    /// Records a successful read.
    pub fn touch(&mut self, now_ms: u64) {
        self.access_count = self.access_count.saturating_add(1);
        self.last_accessed_at = now_ms;
    }
}
