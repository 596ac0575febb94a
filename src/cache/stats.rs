//! Cache Statistics Module
//!
//! Tracks request counters and builds the on-demand statistics snapshot.

use chrono::{Local, TimeZone};
use serde::Serialize;

/// Placeholder shown for timestamps of an empty cache.
pub const NO_ENTRY_LABEL: &str = "N/A";

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

// == Cache Counters ==
/// Aggregate request counters, reset only by an explicit clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheCounters {
    /// Reads that returned a live entry
    pub hits: u64,
    /// Reads that found nothing or an expired entry
    pub misses: u64,
    /// All reads
    pub total_requests: u64,
    /// Entries removed by eviction passes
    pub evictions: u64,
}

impl CacheCounters {
    // == Constructor ==
    /// Creates counters with everything at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Hit rate as a percentage of all reads, 0.0 when nothing was read.
    pub fn hit_rate_percent(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.hits as f64 / self.total_requests as f64 * 100.0
        }
    }

    // == Record Request ==
    pub fn record_request(&mut self) {
        self.total_requests += 1;
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Evictions ==
    pub fn record_evictions(&mut self, count: usize) {
        self.evictions += count as u64;
    }
}

// == Cache Stats ==
/// Point-in-time statistics computed by scanning every entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Number of entries currently held
    pub total_items: usize,
    /// Approximate footprint in bytes: serialized JSON length of each entry
    /// plus its key. Not an exact memory measurement.
    pub total_size_estimate: u64,
    /// Hits as a percentage of all reads
    pub hit_rate_percent: f64,
    /// Earliest `created_at` across entries, `None` when empty
    pub oldest_entry: Option<u64>,
    /// Latest `created_at` across entries, `None` when empty
    pub newest_entry: Option<u64>,
    /// Raw counters behind the hit rate
    pub counters: CacheCounters,
}

impl CacheStats {
    /// Hit rate as displayed: `"0%"` before any read, one decimal afterwards.
    pub fn hit_rate_label(&self) -> String {
        if self.counters.total_requests == 0 {
            "0%".to_string()
        } else {
            format!("{:.1}%", self.hit_rate_percent)
        }
    }

    /// Human-readable rendering of this snapshot.
    pub fn report(&self) -> CacheStatsReport {
        CacheStatsReport {
            total_items: self.total_items,
            total_size: format_size(self.total_size_estimate),
            hit_rate: self.hit_rate_label(),
            oldest_entry: format_timestamp(self.oldest_entry),
            newest_entry: format_timestamp(self.newest_entry),
        }
    }
}

// == Cache Stats Report ==
/// Statistics formatted for a storage panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStatsReport {
    pub total_items: usize,
    /// e.g. `"0 B"`, `"1.5 KB"`
    pub total_size: String,
    /// e.g. `"0%"`, `"66.7%"`
    pub hit_rate: String,
    /// Local date-time or [`NO_ENTRY_LABEL`]
    pub oldest_entry: String,
    /// Local date-time or [`NO_ENTRY_LABEL`]
    pub newest_entry: String,
}

// == Formatting ==
/// Formats a byte count with base-1024 units and at most two decimals.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rendered = format!("{:.2}", value);
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}

/// Formats a Unix millisecond timestamp as a local date-time.
pub fn format_timestamp(timestamp_ms: Option<u64>) -> String {
    let Some(ms) = timestamp_ms else {
        return NO_ENTRY_LABEL.to_string();
    };

    i64::try_from(ms)
        .ok()
        .and_then(|ms| Local.timestamp_millis_opt(ms).single())
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| NO_ENTRY_LABEL.to_string())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_new() {
        let counters = CacheCounters::new();
        assert_eq!(counters.hits, 0);
        assert_eq!(counters.misses, 0);
        assert_eq!(counters.total_requests, 0);
        assert_eq!(counters.evictions, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let counters = CacheCounters::new();
        assert_eq!(counters.hit_rate_percent(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut counters = CacheCounters::new();
        counters.record_request();
        counters.record_hit();
        counters.record_request();
        counters.record_miss();
        assert_eq!(counters.hit_rate_percent(), 50.0);
    }

    #[test]
    fn test_record_evictions() {
        let mut counters = CacheCounters::new();
        counters.record_evictions(51);
        counters.record_evictions(2);
        assert_eq!(counters.evictions, 53);
    }

    #[test]
    fn test_hit_rate_label() {
        let mut stats = CacheStats::default();
        assert_eq!(stats.hit_rate_label(), "0%");

        stats.counters.total_requests = 3;
        stats.counters.hits = 2;
        stats.hit_rate_percent = stats.counters.hit_rate_percent();
        assert_eq!(stats.hit_rate_label(), "66.7%");

        stats.counters.hits = 0;
        stats.hit_rate_percent = 0.0;
        assert_eq!(stats.hit_rate_label(), "0.0%");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1_234_567), "1.18 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024 * 1024), "5120 GB");
    }

    #[test]
    fn test_format_timestamp_none() {
        assert_eq!(format_timestamp(None), NO_ENTRY_LABEL);
    }

    #[test]
    fn test_format_timestamp_shape() {
        let rendered = format_timestamp(Some(1_700_000_000_000));
        // YYYY-MM-DD HH:MM:SS in local time
        assert_eq!(rendered.len(), 19);
        assert!(rendered.starts_with("2023-11-1"));
    }

    #[test]
    fn test_empty_report() {
        let report = CacheStats::default().report();
        assert_eq!(report.total_items, 0);
        assert_eq!(report.total_size, "0 B");
        assert_eq!(report.hit_rate, "0%");
        assert_eq!(report.oldest_entry, "N/A");
        assert_eq!(report.newest_entry, "N/A");
    }
}
