//! Core components of the `coinfeed-rs` client.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`CfClient`] and its builder.
//! - The primary [`CfError`] type.
//! - Shared data models like [`SearchResult`] and [`Article`].
//! - The injected capabilities: [`Storage`], [`Clock`] and the service traits.

/// The main client (`CfClient`), builder, and configuration.
pub mod client;
/// Wall-clock capability (`Clock`, `SystemClock`, `ManualClock`).
pub mod clock;
/// The primary error type (`CfError`) for the crate.
pub mod error;
/// Shared data models used across multiple modules.
pub mod models;
/// Service traits for abstracting the remote search and news calls.
pub mod services;
/// Persisted key/value capability (`Storage`, `MemoryStorage`, `FileStorage`).
pub mod storage;

pub(crate) mod net;
pub(crate) mod wire;

// convenient re-exports so most code can just `use crate::core::CfClient`
pub use client::{CacheMode, CfClient, CfClientBuilder, RetryConfig};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CfError, ErrorKind, StorageError};
pub use models::{Article, CategoryCount, SearchResult};
pub use services::{NewsService, SearchService, ServiceFuture};
pub use storage::{FileStorage, MemoryStorage, Storage};
