//! Eviction Module
//!
//! Least-value eviction: entries are ranked by access frequency over time
//! since their last access, and the lowest-ranked ones are dropped.

use std::collections::HashMap;

use crate::cache::CacheEntry;
use crate::config::MS_PER_HOUR;

/// Age substituted for an entry touched in the current instant, in hours.
pub const MIN_AGE_HOURS: f64 = 1e-6;

// == Value Score ==
/// Computes `access_count / hours_since_last_access` for an entry.
///
/// Entries read often and recently score high. An age of zero is replaced
/// with [`MIN_AGE_HOURS`], so a just-touched entry scores very high but finite.
pub fn value_score<V>(entry: &CacheEntry<V>, now_ms: u64) -> f64 {
    let idle_ms = now_ms.saturating_sub(entry.last_accessed_at);
    let age_hours = (idle_ms as f64 / MS_PER_HOUR as f64).max(MIN_AGE_HOURS);
    entry.access_count as f64 / age_hours
}

// == Eviction Count ==
/// Number of entries an eviction pass removes for a cache holding `len` entries.
///
/// Zero while within capacity; otherwise the overflow plus `overshoot`,
/// never more than `len`.
pub fn eviction_count(len: usize, max_entries: usize, overshoot: usize) -> usize {
    if len <= max_entries {
        return 0;
    }
    (len - max_entries).saturating_add(overshoot).min(len)
}

// == Select Victims ==
/// Returns the keys to evict, lowest value score first.
pub fn select_victims<V>(
    entries: &HashMap<String, CacheEntry<V>>,
    now_ms: u64,
    max_entries: usize,
    overshoot: usize,
) -> Vec<String> {
    let count = eviction_count(entries.len(), max_entries, overshoot);
    if count == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(&String, f64)> = entries
        .iter()
        .map(|(key, entry)| (key, value_score(entry, now_ms)))
        .collect();
    scored.sort_by(|(_, a), (_, b)| a.total_cmp(b));

    scored
        .into_iter()
        .take(count)
        .map(|(key, _)| key.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: u64 = 3_600_000;

    fn entry_with(access_count: u64, last_accessed_at: u64) -> CacheEntry<()> {
        CacheEntry {
            data: (),
            created_at: 0,
            access_count,
            last_accessed_at,
        }
    }

    #[test]
    fn test_value_score_blends_frequency_and_recency() {
        let now = 100 * HOUR;

        // 10 reads, idle 2h -> 5/h
        assert_eq!(value_score(&entry_with(10, now - 2 * HOUR), now), 5.0);
        // 1 read, idle 50h -> 0.02/h
        assert_eq!(value_score(&entry_with(1, now - 50 * HOUR), now), 0.02);
    }

    #[test]
    fn test_value_score_zero_age_is_finite() {
        let score = value_score(&entry_with(1, 1_000), 1_000);

        assert!(score.is_finite());
        assert_eq!(score, 1.0 / MIN_AGE_HOURS);
    }

    #[test]
    fn test_eviction_count() {
        assert_eq!(eviction_count(500, 500, 50), 0);
        assert_eq!(eviction_count(501, 500, 50), 51);
        assert_eq!(eviction_count(4, 3, 0), 1);
        // Clamped to what exists
        assert_eq!(eviction_count(3, 2, 50), 3);
        assert_eq!(eviction_count(1, 0, 0), 1);
    }

    #[test]
    fn test_select_victims_lowest_score_first() {
        let now = 100 * HOUR;
        let mut entries = HashMap::new();
        entries.insert("hot".to_string(), entry_with(20, now - HOUR));
        entries.insert("warm".to_string(), entry_with(5, now - 10 * HOUR));
        entries.insert("cold".to_string(), entry_with(1, now - 90 * HOUR));
        entries.insert("new".to_string(), entry_with(1, now));

        let victims = select_victims(&entries, now, 2, 0);
        assert_eq!(victims, vec!["cold".to_string(), "warm".to_string()]);
    }

    #[test]
    fn test_select_victims_within_capacity() {
        let mut entries = HashMap::new();
        entries.insert("a".to_string(), entry_with(1, 0));

        assert!(select_victims(&entries, HOUR, 1, 50).is_empty());
    }
}
