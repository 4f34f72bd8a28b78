//! Expiring in-memory store for county records
//!
//! Provides a `CountyCache` keyed by normalized county name. Each entry keeps
//! the time it was stored; entries 24 hours or older are treated as absent.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

use super::clock::{Clock, SystemClock};
use super::normalize::normalize;
use crate::data::CountyRecord;

/// Age in hours at which an entry stops being served
pub const EXPIRY_WINDOW_HOURS: i64 = 24;

/// A stored record and the time it was written
#[derive(Debug, Clone, Serialize)]
struct CacheEntry {
    /// The cached record
    value: CountyRecord,
    /// When the record was stored
    stored_at: DateTime<Utc>,
}

impl CacheEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.stored_at >= Duration::hours(EXPIRY_WINDOW_HOURS)
    }
}

/// Snapshot of cache contents for diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of entries, including expired ones not yet purged
    pub size: usize,
    /// Record name of the entry stored first
    pub oldest_entry_name: Option<String>,
    /// Record name of the entry stored last
    pub newest_entry_name: Option<String>,
    /// Rough serialized size of all entries in bytes
    pub approx_byte_size: usize,
}

/// Expiring cache of county records
///
/// One instance is created at startup and shared (via `Arc`) by every fetcher
/// for the lifetime of the process. Writes are last-writer-wins. None of the
/// operations fail; a poisoned lock reads as an empty cache.
pub struct CountyCache {
    /// Entries keyed by normalized county name
    entries: RwLock<HashMap<String, CacheEntry>>,
    /// Time source for timestamps and expiry
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for CountyCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountyCache")
            .field("size", &self.size())
            .finish()
    }
}

impl Default for CountyCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CountyCache {
    /// Creates an empty cache using wall-clock time
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty cache with a custom time source
    ///
    /// Useful for testing expiry without waiting.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Stores a record under the normalized form of `key`
    ///
    /// Any existing entry for the same key is replaced and its timestamp reset.
    pub fn set(&self, key: &str, record: CountyRecord) {
        let key = normalize(key);
        let entry = CacheEntry {
            value: record,
            stored_at: self.clock.now(),
        };

        if let Ok(mut entries) = self.entries.write() {
            let replaced = entries.insert(key.clone(), entry).is_some();
            debug!(key = %key, replaced, "Stored county record");
        }
    }

    /// Reads a record by key
    ///
    /// Returns `None` if the entry is missing or expired. An expired entry is
    /// removed as part of the lookup.
    pub fn get(&self, key: &str) -> Option<CountyRecord> {
        let key = normalize(key);
        let now = self.clock.now();

        {
            let entries = self.entries.read().ok()?;
            let entry = entries.get(&key)?;
            if !entry.is_expired(now) {
                return Some(entry.value.clone());
            }
        }

        // Re-check under the write lock; the entry may have been refreshed
        // between the two locks.
        if let Ok(mut entries) = self.entries.write() {
            if entries.get(&key).is_some_and(|entry| entry.is_expired(now)) {
                entries.remove(&key);
                debug!(key = %key, "Purged expired county record");
            } else if let Some(entry) = entries.get(&key) {
                return Some(entry.value.clone());
            }
        }
        None
    }

    /// Checks whether any entry exists for `key`, expired or not
    pub fn has(&self, key: &str) -> bool {
        let key = normalize(key);
        self.entries
            .read()
            .ok()
            .is_some_and(|entries| entries.contains_key(&key))
    }

    /// Removes the entry for `key`
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove(&self, key: &str) -> bool {
        let key = normalize(key);
        self.entries
            .write()
            .ok()
            .is_some_and(|mut entries| entries.remove(&key).is_some())
    }

    /// Removes every entry
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            let cleared = entries.len();
            entries.clear();
            info!(cleared, "Cleared county cache");
        }
    }

    /// Number of entries, including expired ones not yet purged
    pub fn size(&self) -> usize {
        self.entries
            .read()
            .map(|entries| entries.len())
            .unwrap_or(0)
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Display names of all cached records, in no particular order
    pub fn list_names(&self) -> Vec<String> {
        self.entries
            .read()
            .map(|entries| entries.values().map(|e| e.value.name.clone()).collect())
            .unwrap_or_default()
    }

    /// Summarizes the cache contents
    pub fn stats(&self) -> CacheStats {
        let Ok(entries) = self.entries.read() else {
            return CacheStats::default();
        };

        let oldest = entries.values().min_by_key(|e| e.stored_at);
        let newest = entries.values().max_by_key(|e| e.stored_at);
        let approx_byte_size = entries
            .iter()
            .map(|(key, entry)| {
                key.len() + serde_json::to_string(entry).map(|s| s.len()).unwrap_or(0)
            })
            .sum();

        CacheStats {
            size: entries.len(),
            oldest_entry_name: oldest.map(|e| e.value.name.clone()),
            newest_entry_name: newest.map(|e| e.value.name.clone()),
            approx_byte_size,
        }
    }

    /// Removes all expired entries
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        let now = self.clock.now();
        let Ok(mut entries) = self.entries.write() else {
            return 0;
        };

        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - entries.len();

        if removed > 0 {
            info!(removed, remaining = entries.len(), "Removed expired county records");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;

    fn record(name: &str, population: i64) -> CountyRecord {
        CountyRecord {
            name: name.to_string(),
            population,
            median_household_income: 60_000,
            median_home_value: 200_000,
            total_commute_time: 1_000,
            bachelors_degree_pop: 500,
            owner_occupied_housing: 300,
            renter_occupied_housing: 200,
            state_code: "48".to_string(),
            county_code: "001".to_string(),
        }
    }

    fn create_test_cache() -> (CountyCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::default());
        let cache = CountyCache::with_clock(clock.clone());
        (cache, clock)
    }

    #[test]
    fn test_get_returns_none_for_missing_key() {
        let (cache, _clock) = create_test_cache();

        assert!(cache.get("harris").is_none());
    }

    #[test]
    fn test_set_then_get_across_spellings() {
        let (cache, _clock) = create_test_cache();
        let harris = record("Harris County, Texas", 4_731_145);

        cache.set("HARRIS COUNTY", harris.clone());

        assert_eq!(cache.get("Harris"), Some(harris.clone()));
        assert_eq!(cache.get("  harris "), Some(harris.clone()));
        assert_eq!(cache.get("Harris County, Texas"), Some(harris));
        assert_eq!(cache.size(), 1);
    }

    #[test]
    fn test_overwrite_existing_entry() {
        let (cache, _clock) = create_test_cache();

        cache.set("harris", record("Harris County, Texas", 1));
        cache.set("Harris County", record("Harris County, Texas", 2));

        assert_eq!(cache.size(), 1);
        assert_eq!(cache.get("harris").map(|r| r.population), Some(2));
    }

    #[test]
    fn test_entry_valid_just_before_expiry() {
        let (cache, clock) = create_test_cache();
        cache.set("harris", record("Harris County, Texas", 1));

        clock.advance(Duration::hours(23) + Duration::minutes(59));

        assert!(cache.get("harris").is_some());
    }

    #[test]
    fn test_entry_absent_at_exact_expiry() {
        let (cache, clock) = create_test_cache();
        cache.set("harris", record("Harris County, Texas", 1));

        clock.advance(Duration::hours(EXPIRY_WINDOW_HOURS));

        assert!(cache.get("harris").is_none());
    }

    #[test]
    fn test_expired_entry_is_purged_on_get() {
        let (cache, clock) = create_test_cache();
        cache.set("harris", record("Harris County, Texas", 1));

        clock.advance(Duration::hours(24) + Duration::seconds(1));

        assert!(cache.has("harris"), "has() ignores expiry");
        assert_eq!(cache.size(), 1);
        assert!(cache.get("harris").is_none());
        assert!(!cache.has("harris"), "get() purges expired entries");
        assert_eq!(cache.size(), 0);
    }

    #[test]
    fn test_reset_timestamp_on_overwrite() {
        let (cache, clock) = create_test_cache();
        cache.set("harris", record("Harris County, Texas", 1));

        clock.advance(Duration::hours(20));
        cache.set("harris", record("Harris County, Texas", 2));
        clock.advance(Duration::hours(20));

        assert_eq!(cache.get("harris").map(|r| r.population), Some(2));
    }

    #[test]
    fn test_remove_and_clear() {
        let (cache, _clock) = create_test_cache();
        cache.set("harris", record("Harris County, Texas", 1));
        cache.set("travis", record("Travis County, Texas", 2));

        assert!(cache.remove("HARRIS COUNTY"));
        assert!(!cache.remove("harris"));
        assert_eq!(cache.size(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_list_names_uses_record_names() {
        let (cache, _clock) = create_test_cache();
        cache.set("harris", record("Harris County, Texas", 1));
        cache.set("travis", record("Travis County, Texas", 2));

        let mut names = cache.list_names();
        names.sort();

        assert_eq!(names, vec!["Harris County, Texas", "Travis County, Texas"]);
    }

    #[test]
    fn test_stats_oldest_and_newest() {
        let (cache, clock) = create_test_cache();
        cache.set("harris", record("Harris County, Texas", 1));
        clock.advance(Duration::minutes(5));
        cache.set("travis", record("Travis County, Texas", 2));
        clock.advance(Duration::minutes(5));
        cache.set("bexar", record("Bexar County, Texas", 3));

        let stats = cache.stats();

        assert_eq!(stats.size, 3);
        assert_eq!(stats.oldest_entry_name.as_deref(), Some("Harris County, Texas"));
        assert_eq!(stats.newest_entry_name.as_deref(), Some("Bexar County, Texas"));
        assert!(stats.approx_byte_size > 0);
    }

    #[test]
    fn test_stats_empty_cache() {
        let (cache, _clock) = create_test_cache();

        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_cleanup_expired_removes_only_old_entries() {
        let (cache, clock) = create_test_cache();
        cache.set("harris", record("Harris County, Texas", 1));
        clock.advance(Duration::hours(12));
        cache.set("travis", record("Travis County, Texas", 2));
        clock.advance(Duration::hours(13));

        assert_eq!(cache.cleanup_expired(), 1);
        assert_eq!(cache.cleanup_expired(), 0, "second sweep finds nothing new");
        assert!(cache.get("travis").is_some());
        assert!(!cache.has("harris"));
    }

    #[test]
    fn test_cleanup_expired_on_empty_cache() {
        let (cache, _clock) = create_test_cache();

        assert_eq!(cache.cleanup_expired(), 0);
    }
}
