//! Keyed response cache with time-to-live expiry.
//!
//! Entries are owned copies: `set` takes the value by value and `get` hands back a clone, so a
//! caller mutating what it got back can never reach into the cache. An expired entry is a miss
//! and is evicted on the lookup that discovers it.
//!
//! When built with [`TtlCache::persistent`], the whole table is mirrored into [`Storage`] as a
//! single JSON blob. Persistence is best-effort: a rejected write (quota, I/O) is logged and the
//! in-memory table keeps serving.

use crate::core::clock::Clock;
use crate::core::storage::Storage;
use chrono::{DateTime, TimeDelta, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A cached value and the moment it was stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<V> {
    /// The cached value.
    pub value: V,
    /// When `value` was written.
    #[serde(rename = "storedAt")]
    pub stored_at: DateTime<Utc>,
    /// Per-entry TTL; falls back to the cache's default when `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl_ms: Option<i64>,
}

impl<V> CacheEntry<V> {
    fn is_expired(&self, now: DateTime<Utc>, default_ttl: TimeDelta) -> bool {
        let ttl = self.ttl_ms.map_or(default_ttl, TimeDelta::milliseconds);
        now - self.stored_at > ttl
    }
}

#[derive(Debug)]
struct Persisted {
    storage: Arc<dyn Storage>,
    key: String,
}

/// A thread-safe TTL cache over string keys.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: Mutex<HashMap<String, CacheEntry<V>>>,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
    persisted: Option<Persisted>,
}

fn to_delta(d: Duration) -> TimeDelta {
    TimeDelta::from_std(d).unwrap_or(TimeDelta::MAX)
}

impl<V> TtlCache<V>
where
    V: Clone + Serialize + DeserializeOwned,
{
    /// Creates an in-memory cache whose entries live for `ttl`.
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: to_delta(ttl),
            clock,
            persisted: None,
        }
    }

    /// Creates a cache mirrored into `storage` under `key`.
    ///
    /// Any previously persisted table is loaded immediately; expired entries are dropped and a
    /// blob that does not decode is discarded.
    pub fn persistent(
        ttl: Duration,
        clock: Arc<dyn Clock>,
        storage: Arc<dyn Storage>,
        key: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let ttl = to_delta(ttl);
        let now = clock.now();
        let mut entries: HashMap<String, CacheEntry<V>> = match storage.get(&key) {
            Ok(Some(blob)) => serde_json::from_str(&blob).unwrap_or_else(|e| {
                tracing::warn!(key = %key, error = %e, "discarding unreadable persisted cache");
                HashMap::new()
            }),
            Ok(None) => HashMap::new(),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "persisted cache unavailable; starting empty");
                HashMap::new()
            }
        };
        entries.retain(|_, e| !e.is_expired(now, ttl));

        let cache = Self {
            entries: Mutex::new(entries),
            ttl,
            clock,
            persisted: Some(Persisted { storage, key }),
        };
        let guard = cache.lock();
        cache.write_through(&guard);
        drop(guard);
        cache
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_through(&self, entries: &HashMap<String, CacheEntry<V>>) {
        let Some(p) = &self.persisted else {
            return;
        };
        let result = if entries.is_empty() {
            p.storage.remove(&p.key)
        } else {
            match serde_json::to_string(entries) {
                Ok(blob) => p.storage.set(&p.key, &blob),
                Err(e) => {
                    tracing::warn!(key = %p.key, error = %e, "cache table did not serialize");
                    return;
                }
            }
        };
        if let Err(e) = result {
            tracing::warn!(key = %p.key, error = %e, "cache write-through failed; continuing in memory");
        }
    }

    /// Returns a copy of the value under `key` if it has not expired.
    ///
    /// An expired entry is removed before returning `None`, so a later `get` misses too.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let mut entries = self.lock();
        let expired = entries.get(key)?.is_expired(now, self.ttl);
        if expired {
            entries.remove(key);
            tracing::debug!(key, "cache entry expired; evicted");
            self.write_through(&entries);
            return None;
        }
        tracing::debug!(key, "cache hit");
        entries.get(key).map(|e| e.value.clone())
    }

    /// Stores `value` under `key` with the cache's default TTL.
    pub fn set(&self, key: impl Into<String>, value: V) {
        self.insert(key.into(), value, None);
    }

    /// Stores `value` under `key` with its own TTL.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        self.insert(key.into(), value, Some(to_delta(ttl).num_milliseconds()));
    }

    fn insert(&self, key: String, value: V, ttl_ms: Option<i64>) {
        let entry = CacheEntry {
            value,
            stored_at: self.clock.now(),
            ttl_ms,
        };
        let mut entries = self.lock();
        entries.insert(key, entry);
        self.write_through(&entries);
    }

    /// Removes `key`, returning whether it was present.
    pub fn invalidate(&self, key: &str) -> bool {
        let mut entries = self.lock();
        let removed = entries.remove(key).is_some();
        if removed {
            self.write_through(&entries);
        }
        removed
    }

    /// Removes every entry.
    pub fn clear(&self) {
        let mut entries = self.lock();
        entries.clear();
        self.write_through(&entries);
    }

    /// Evicts every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired(now, self.ttl));
        let removed = before - entries.len();
        if removed > 0 {
            self.write_through(&entries);
        }
        removed
    }

    /// Number of stored entries, including ones that have expired but not yet been looked up.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds the canonical cache key for an endpoint call: `endpoint?k1=v1&k2=v2` with the
/// parameters sorted by name so argument order never splits the cache.
pub fn cache_key<'a, I>(endpoint: &str, params: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut params: Vec<(&str, String)> = params.into_iter().collect();
    if params.is_empty() {
        return endpoint.to_string();
    }
    params.sort_by(|a, b| a.0.cmp(b.0).then_with(|| a.1.cmp(&b.1)));
    let query = params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    format!("{endpoint}?{query}")
}
