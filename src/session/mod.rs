//! Incremental search session: debounced dispatch, race-safe result delivery and keyboard
//! navigation over the results.
//!
//! A session goes `Idle -> Searching -> {Results | NoResults | Error}` and back on every new
//! query. Each remote dispatch is numbered; a response is applied only if its number is still
//! the highest one dispatched, so a slow reply to an old query can never replace the results of
//! a newer one. Stale replies are not cancelled on the wire, they are ignored on arrival.
//!
//! State changes are published on a [`tokio::sync::watch`] channel; see
//! [`SearchSession::subscribe`].

mod debounce;
mod selection;

pub use debounce::Debouncer;
pub use selection::Selection;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;

use crate::core::models::SearchResult;
use crate::core::services::SearchService;
use crate::stores::RecentSearches;

/// Tuning knobs for a [`SearchSession`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// How long the query must stay unchanged before it is sent.
    pub quiet_period: Duration,
    /// Queries shorter than this (after trimming, in characters) are never sent.
    pub min_query_chars: usize,
    /// Keep at most this many results from each response.
    pub max_results: Option<usize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(300),
            min_query_chars: 2,
            max_results: None,
        }
    }
}

/// Where a session is in its search cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// No query in flight and nothing to show.
    Idle,
    /// A query has been dispatched and its response is pending.
    Searching,
    /// The latest query returned at least one result.
    Results,
    /// The latest query returned nothing.
    NoResults,
    /// The latest query failed. Displayed like `NoResults`.
    Error,
}

/// What a subscriber sees after every state change.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// The text as last typed, untrimmed.
    pub query: String,
    /// Current status.
    pub status: SearchStatus,
    /// Results of the latest applied response.
    pub results: Vec<SearchResult>,
    /// Highlighted row, if any.
    pub selected_index: Option<usize>,
    /// Failure message when `status` is `Error`.
    pub error: Option<String>,
    /// Set once the session was committed or cancelled.
    pub closed: bool,
}

impl SessionSnapshot {
    /// The highlighted result.
    #[must_use]
    pub fn selected(&self) -> Option<&SearchResult> {
        self.selected_index.and_then(|i| self.results.get(i))
    }
}

#[derive(Debug)]
struct State {
    query: String,
    status: SearchStatus,
    results: Vec<SearchResult>,
    selection: Selection,
    error: Option<String>,
    closed: bool,
    /// Highest dispatch number handed out; only its response may be applied.
    latest_seq: u64,
    /// Bumped on every query change; a debounced dispatch runs only for its own generation.
    query_gen: u64,
}

impl State {
    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            query: self.query.clone(),
            status: self.status,
            results: self.results.clone(),
            selected_index: self.selection.index(),
            error: self.error.clone(),
            closed: self.closed,
        }
    }
}

struct Shared<S> {
    service: S,
    recent: RecentSearches,
    config: SessionConfig,
    state: Mutex<State>,
    tx: watch::Sender<SessionSnapshot>,
}

impl<S: SearchService + 'static> Shared<S> {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &State) {
        self.tx.send_replace(state.snapshot());
    }

    /// Numbers the query, flips to `Searching` and spawns the request.
    fn dispatch(this: &Arc<Self>, query: String, query_gen: u64) {
        let seq = {
            let mut state = this.lock();
            if state.closed || state.query_gen != query_gen {
                return;
            }
            state.latest_seq += 1;
            state.status = SearchStatus::Searching;
            state.error = None;
            this.publish(&state);
            state.latest_seq
        };
        tracing::debug!(seq, query = %query, "dispatching search");

        let shared = Arc::clone(this);
        tokio::spawn(async move {
            let outcome = shared.service.search_assets(&query).await;
            shared.apply(seq, &query, outcome);
        });
    }

    fn apply(&self, seq: u64, query: &str, outcome: Result<Vec<SearchResult>, crate::CfError>) {
        let mut state = self.lock();
        if state.closed || seq != state.latest_seq {
            tracing::debug!(seq, latest = state.latest_seq, query, "discarding stale search response");
            return;
        }
        match outcome {
            Ok(mut results) => {
                if let Some(max) = self.config.max_results {
                    results.truncate(max);
                }
                state.status = if results.is_empty() {
                    SearchStatus::NoResults
                } else {
                    SearchStatus::Results
                };
                state.results = results;
                state.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, query, "search failed; showing no results");
                state.status = SearchStatus::Error;
                state.results.clear();
                state.error = Some(e.to_string());
            }
        }
        state.selection.reset();
        self.publish(&state);
    }
}

/// An open search overlay.
///
/// All methods take `&self`. [`set_query`](Self::set_query) schedules work on the Tokio runtime
/// and must be called from within one. Dropping the session cancels any pending dispatch and
/// discards responses still in flight.
pub struct SearchSession<S: SearchService + 'static> {
    shared: Arc<Shared<S>>,
    debouncer: Mutex<Debouncer>,
}

impl<S: SearchService + 'static> std::fmt::Debug for SearchSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("state", &*self.shared.lock())
            .field("config", &self.shared.config)
            .finish_non_exhaustive()
    }
}

impl<S: SearchService + 'static> SearchSession<S> {
    /// Opens a session with the default configuration.
    pub fn new(service: S, recent: RecentSearches) -> Self {
        Self::with_config(service, recent, SessionConfig::default())
    }

    /// Opens a session with `config`.
    pub fn with_config(service: S, recent: RecentSearches, config: SessionConfig) -> Self {
        let state = State {
            query: String::new(),
            status: SearchStatus::Idle,
            results: Vec::new(),
            selection: Selection::default(),
            error: None,
            closed: false,
            latest_seq: 0,
            query_gen: 0,
        };
        let (tx, _rx) = watch::channel(state.snapshot());
        let debouncer = Debouncer::new(config.quiet_period);
        Self {
            shared: Arc::new(Shared {
                service,
                recent,
                config,
                state: Mutex::new(state),
                tx,
            }),
            debouncer: Mutex::new(debouncer),
        }
    }

    fn debouncer(&self) -> MutexGuard<'_, Debouncer> {
        self.debouncer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// A receiver that observes every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.shared.tx.subscribe()
    }

    /// The current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.lock().snapshot()
    }

    /// Whether the session was committed or cancelled.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.shared.lock().closed
    }

    /// Records new query text.
    ///
    /// The highlight is cleared. A query shorter than `min_query_chars` clears the results,
    /// returns to `Idle` and abandons any request in flight; anything longer is dispatched once
    /// the quiet period passes without another call.
    pub fn set_query(&self, text: impl Into<String>) {
        let text = text.into();
        let trimmed = text.trim().to_string();
        let too_short = trimmed.chars().count() < self.shared.config.min_query_chars;

        let query_gen = {
            let mut state = self.shared.lock();
            if state.closed {
                return;
            }
            state.query_gen += 1;
            state.query = text;
            state.selection.reset();
            if too_short {
                // Bumping the counter makes any in-flight reply stale.
                state.latest_seq += 1;
                state.status = SearchStatus::Idle;
                state.results.clear();
                state.error = None;
            }
            self.shared.publish(&state);
            state.query_gen
        };

        let mut debouncer = self.debouncer();
        if too_short {
            debouncer.cancel();
            return;
        }
        let shared = Arc::clone(&self.shared);
        debouncer.schedule(move || Shared::dispatch(&shared, trimmed, query_gen));
    }

    /// Moves the highlight down, stopping at the last result.
    pub fn select_next(&self) {
        let mut state = self.shared.lock();
        let len = state.results.len();
        state.selection.next(len);
        self.shared.publish(&state);
    }

    /// Moves the highlight up; from the first result the highlight is cleared.
    pub fn select_previous(&self) {
        let mut state = self.shared.lock();
        state.selection.previous();
        self.shared.publish(&state);
    }

    /// Highlights `index` (pointer hover). Out-of-range indices are ignored.
    pub fn hover(&self, index: usize) -> bool {
        let mut state = self.shared.lock();
        let len = state.results.len();
        let moved = state.selection.set(index, len);
        if moved {
            self.shared.publish(&state);
        }
        moved
    }

    /// Selects the highlighted result, if any, and closes the session.
    ///
    /// Returns `None` (and stays open) when nothing valid is highlighted.
    pub fn commit_selection(&self) -> Option<SearchResult> {
        let chosen = {
            let state = self.shared.lock();
            if state.closed {
                return None;
            }
            let i = state.selection.committable(state.results.len())?;
            state.results[i].clone()
        };
        self.select(chosen.clone());
        Some(chosen)
    }

    /// Records `result` as the most recent search and closes the session. No request is made.
    ///
    /// Ignored once the session is closed.
    pub fn select(&self, result: SearchResult) {
        if self.is_closed() {
            return;
        }
        tracing::debug!(id = %result.id, "search result selected");
        self.shared.recent.record(result);
        self.close();
    }

    /// Closes the session without selecting anything.
    pub fn cancel(&self) {
        self.close();
    }

    fn close(&self) {
        {
            let mut state = self.shared.lock();
            if state.closed {
                return;
            }
            state.closed = true;
            self.shared.publish(&state);
        }
        self.debouncer().cancel();
    }

    /// Recently selected results, newest first.
    #[must_use]
    pub fn recent(&self) -> Vec<SearchResult> {
        self.shared.recent.load()
    }

    /// Forgets the recent selections.
    pub fn clear_recent(&self) {
        self.shared.recent.clear();
    }
}

impl<S: SearchService + 'static> Drop for SearchSession<S> {
    fn drop(&mut self) {
        let mut state = self.shared.lock();
        if !state.closed {
            state.closed = true;
            self.shared.publish(&state);
        }
    }
}
