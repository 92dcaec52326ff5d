use std::sync::Arc;

use super::bounded::{BoundedList, Keyed};
use crate::core::models::SearchResult;
use crate::core::storage::Storage;

/// How many recent searches are kept.
pub const RECENT_SEARCHES_CAPACITY: usize = 5;

/// Storage key of the recent-searches list.
pub const RECENT_SEARCHES_KEY: &str = "coinfeed:recent-searches";

impl Keyed for SearchResult {
    fn key(&self) -> &str {
        &self.id
    }
}

/// The search results a user picked most recently, newest first and unique by `id`.
///
/// Cloning is cheap; clones read and write the same persisted list.
#[derive(Debug, Clone)]
pub struct RecentSearches {
    list: BoundedList<SearchResult>,
}

impl RecentSearches {
    /// Opens the list with the default capacity.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self::with_capacity(storage, RECENT_SEARCHES_CAPACITY)
    }

    /// Opens the list keeping at most `capacity` entries.
    pub fn with_capacity(storage: Arc<dyn Storage>, capacity: usize) -> Self {
        Self {
            list: BoundedList::new(storage, RECENT_SEARCHES_KEY, capacity),
        }
    }

    /// Maximum number of entries kept.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.list.capacity()
    }

    /// The stored entries, most recent first. Unreadable state loads as empty.
    #[must_use]
    pub fn load(&self) -> Vec<SearchResult> {
        self.list.load()
    }

    /// Puts `item` at the front, removing an older entry with the same `id` and evicting the
    /// oldest entry beyond capacity. Returns the updated list.
    pub fn record(&self, item: SearchResult) -> Vec<SearchResult> {
        tracing::debug!(id = %item.id, "recording recent search");
        self.list.push_front(item)
    }

    /// Forgets one entry.
    pub fn remove(&self, id: &str) -> bool {
        self.list.remove(id)
    }

    /// Forgets everything.
    pub fn clear(&self) {
        self.list.clear();
    }
}
