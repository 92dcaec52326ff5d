//! Public client surface + builder.
//! Internals are split into `constants` (UA + defaults) and `retry` (retry and cache policy).

mod constants;
mod retry;

pub use retry::{Backoff, CacheMode, RetryConfig};

use crate::cache::TtlCache;
use crate::core::CfError;
use crate::core::clock::{Clock, SystemClock};
use crate::core::storage::Storage;
use constants::{DEFAULT_BASE_API, USER_AGENT};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Storage key under which the response cache is persisted.
pub const RESPONSE_CACHE_KEY: &str = "coinfeed:response-cache";

/// HTTP client for the coinfeed REST API.
///
/// Cloning is cheap: clones share the connection pool and the response cache.
#[derive(Debug, Clone)]
pub struct CfClient {
    http: Client,
    base_api: Url,
    retry: RetryConfig,
    clock: Arc<dyn Clock>,
    cache: Option<Arc<TtlCache<String>>>,
}

impl Default for CfClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl CfClient {
    /// Create a new builder.
    #[must_use]
    pub fn builder() -> CfClientBuilder {
        CfClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn base_api(&self) -> &Url {
        &self.base_api
    }

    /// The clock this client stamps cache entries with.
    #[must_use]
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.clock)
    }

    /// Whether responses are cached.
    #[must_use]
    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Drops every cached response.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// Drops one cached response, returning whether it was present.
    pub fn invalidate_cached(&self, key: &str) -> bool {
        self.cache.as_ref().is_some_and(|c| c.invalidate(key))
    }

    pub(crate) fn cache_get(&self, key: &str) -> Option<String> {
        self.cache.as_ref()?.get(key)
    }

    pub(crate) fn cache_put(&self, key: &str, body: &str) {
        if let Some(cache) = &self.cache {
            cache.set(key, body.to_string());
        }
    }

    /// Sends `req`, retrying transient failures according to the client's (or the override) policy.
    ///
    /// Statuses listed in `retry_on_status` are retried until the budget is spent; the last
    /// response is then returned as-is for the caller to map.
    pub(crate) async fn send_with_retry(
        &self,
        req: reqwest::RequestBuilder,
        retry_override: Option<&RetryConfig>,
    ) -> Result<reqwest::Response, CfError> {
        let cfg = retry_override.unwrap_or(&self.retry);
        if !cfg.enabled {
            return Ok(req.send().await?);
        }

        let mut attempt: u32 = 0;
        loop {
            let this_try = req
                .try_clone()
                .ok_or_else(|| CfError::Data("request body cannot be retried".into()))?;

            match this_try.send().await {
                Ok(resp) => {
                    let code = resp.status().as_u16();
                    if attempt < cfg.max_retries && cfg.retry_on_status.contains(&code) {
                        tracing::debug!(status = code, attempt, "retrying after transient status");
                    } else {
                        return Ok(resp);
                    }
                }
                Err(e) => {
                    let retryable = (e.is_timeout() && cfg.retry_on_timeout)
                        || (e.is_connect() && cfg.retry_on_connect);
                    if !retryable || attempt >= cfg.max_retries {
                        return Err(e.into());
                    }
                    tracing::debug!(error = %e, attempt, "retrying after transport error");
                }
            }

            tokio::time::sleep(cfg.backoff.delay(attempt)).await;
            attempt += 1;
        }
    }
}

/* ----------------------- Builder ----------------------- */

/// Configures and builds a [`CfClient`].
#[derive(Default)]
pub struct CfClientBuilder {
    user_agent: Option<String>,
    base_api: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry: Option<RetryConfig>,
    cache_ttl: Option<Duration>,
    cache_storage: Option<Arc<dyn Storage>>,
    clock: Option<Arc<dyn Clock>>,
}

impl CfClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the API base (e.g., `https://api.coinfeed.io/api/v1/`).
    ///
    /// Endpoint paths are appended to it, so it should end with `/`.
    #[must_use]
    pub fn base_api(mut self, url: Url) -> Self {
        self.base_api = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub const fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Replace the default retry policy.
    #[must_use]
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Turn retries on or off while keeping the rest of the policy.
    #[must_use]
    pub fn retry_enabled(mut self, enabled: bool) -> Self {
        let mut cfg = self.retry.take().unwrap_or_default();
        cfg.enabled = enabled;
        self.retry = Some(cfg);
        self
    }

    /// Enable response caching with a default TTL.
    /// If not set, caching is disabled.
    #[must_use]
    pub const fn cache_ttl(mut self, dur: Duration) -> Self {
        self.cache_ttl = Some(dur);
        self
    }

    /// Mirror the response cache into `storage` so it survives restarts.
    /// Has no effect unless [`cache_ttl`](Self::cache_ttl) is also set.
    #[must_use]
    pub fn cache_storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.cache_storage = Some(storage);
        self
    }

    /// Use `clock` for cache ages instead of the system clock.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the default base URL fails to parse or the HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<CfClient, CfError> {
        let base_api = match self.base_api {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_API)?,
        };

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let cache = self.cache_ttl.map(|ttl| {
            let cache = match self.cache_storage {
                Some(storage) => {
                    TtlCache::persistent(ttl, Arc::clone(&clock), storage, RESPONSE_CACHE_KEY)
                }
                None => TtlCache::new(ttl, Arc::clone(&clock)),
            };
            Arc::new(cache)
        });

        Ok(CfClient {
            http,
            base_api,
            retry: self.retry.unwrap_or_default(),
            clock,
            cache,
        })
    }
}
