//! Centralized constants for default endpoints and UA.

/// Identifies this library to the API.
pub(crate) const USER_AGENT: &str = concat!("coinfeed-rs/", env!("CARGO_PKG_VERSION"));

/// Versioned REST base; every endpoint path is relative to it.
pub(crate) const DEFAULT_BASE_API: &str = "https://api.coinfeed.io/api/v1/";
