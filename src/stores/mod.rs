//! Persisted, bounded, de-duplicated lists: recent searches and bookmarks.

mod bookmarks;
mod bounded;
mod recent;

pub use bookmarks::{BOOKMARKS_CAPACITY, Bookmarks, bookmarks_key};
pub use bounded::Keyed;
pub use recent::{RECENT_SEARCHES_CAPACITY, RECENT_SEARCHES_KEY, RecentSearches};
