use std::sync::Arc;

use super::bounded::{BoundedList, Keyed};
use crate::core::models::Article;
use crate::core::storage::Storage;

/// How many bookmarks a user can keep.
pub const BOOKMARKS_CAPACITY: usize = 100;

impl Keyed for Article {
    fn key(&self) -> &str {
        &self.url
    }
}

/// A user's bookmarked articles, newest first and unique by `url`.
#[derive(Debug, Clone)]
pub struct Bookmarks {
    user: String,
    list: BoundedList<Article>,
}

/// Storage key holding `user`'s bookmarks.
#[must_use]
pub fn bookmarks_key(user: &str) -> String {
    format!("coinfeed:bookmarks:{user}")
}

impl Bookmarks {
    /// Opens `user`'s bookmark list.
    pub fn new(storage: Arc<dyn Storage>, user: impl Into<String>) -> Self {
        let user = user.into();
        let list = BoundedList::new(storage, bookmarks_key(&user), BOOKMARKS_CAPACITY);
        Self { user, list }
    }

    /// The user these bookmarks belong to.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The bookmarked articles, most recent first.
    #[must_use]
    pub fn list(&self) -> Vec<Article> {
        self.list.load()
    }

    /// Bookmarks `article`, moving it to the front if it was already saved.
    pub fn add(&self, article: Article) -> Vec<Article> {
        self.list.push_front(article)
    }

    /// Removes the bookmark for `url`; returns whether it existed.
    pub fn remove(&self, url: &str) -> bool {
        self.list.remove(url)
    }

    /// Whether `url` is bookmarked.
    #[must_use]
    pub fn contains(&self, url: &str) -> bool {
        self.list.contains(url)
    }

    /// Adds `article` if absent, removes it if present. Returns `true` when it ends up bookmarked.
    pub fn toggle(&self, article: Article) -> bool {
        if self.list.remove(&article.url) {
            false
        } else {
            self.list.push_front(article);
            true
        }
    }

    /// Removes every bookmark.
    pub fn clear(&self) {
        self.list.clear();
    }
}
