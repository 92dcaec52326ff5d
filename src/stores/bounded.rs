use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::core::storage::Storage;

/// Items that carry a natural de-duplication key.
pub trait Keyed {
    /// The key two items are considered the same by.
    fn key(&self) -> &str;
}

/// A most-recent-first list persisted as one JSON array.
///
/// Every operation is a read-modify-write against [`Storage`]. Read failures and undecodable
/// blobs yield an empty list; write failures are logged and dropped. Neither reaches the caller.
#[derive(Debug)]
pub(crate) struct BoundedList<T> {
    storage: Arc<dyn Storage>,
    key: String,
    capacity: usize,
    _item: PhantomData<fn() -> T>,
}

impl<T> Clone for BoundedList<T> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            key: self.key.clone(),
            capacity: self.capacity,
            _item: PhantomData,
        }
    }
}

impl<T> BoundedList<T>
where
    T: Keyed + Serialize + DeserializeOwned,
{
    pub(crate) fn new(storage: Arc<dyn Storage>, key: impl Into<String>, capacity: usize) -> Self {
        Self {
            storage,
            key: key.into(),
            capacity,
            _item: PhantomData,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn load(&self) -> Vec<T> {
        let blob = match self.storage.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read persisted list");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<T>>(&blob) {
            Ok(mut items) => {
                items.truncate(self.capacity);
                items
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "persisted list is corrupt; treating as empty");
                Vec::new()
            }
        }
    }

    fn save(&self, items: &[T]) {
        let blob = match serde_json::to_string(items) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "list did not serialize");
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.key, &blob) {
            tracing::warn!(key = %self.key, error = %e, "failed to persist list");
        }
    }

    /// Moves `item` to the front, dropping any earlier entry with the same key and anything
    /// beyond capacity. Returns the new list.
    pub(crate) fn push_front(&self, item: T) -> Vec<T> {
        let mut items = self.load();
        items.retain(|existing| existing.key() != item.key());
        items.insert(0, item);
        items.truncate(self.capacity);
        self.save(&items);
        items
    }

    /// Removes the entry with `key`; returns whether one was present.
    pub(crate) fn remove(&self, key: &str) -> bool {
        let mut items = self.load();
        let before = items.len();
        items.retain(|existing| existing.key() != key);
        let removed = items.len() != before;
        if removed {
            self.save(&items);
        }
        removed
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.load().iter().any(|existing| existing.key() == key)
    }

    pub(crate) fn clear(&self) {
        if let Err(e) = self.storage.remove(&self.key) {
            tracing::warn!(key = %self.key, error = %e, "failed to clear persisted list");
        }
    }
}
