use coinfeed_rs::{Debouncer, MemoryStorage, RecentSearches, SearchSession, SearchStatus};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::common::FakeSearch;

fn session(fake: &Arc<FakeSearch>) -> SearchSession<Arc<FakeSearch>> {
    let recent = RecentSearches::new(Arc::new(MemoryStorage::new()));
    SearchSession::new(Arc::clone(fake), recent)
}

#[tokio::test(start_paused = true)]
async fn burst_of_keystrokes_dispatches_once_with_final_text() {
    let fake = Arc::new(FakeSearch::new());
    let s = session(&fake);

    for q in ["bi", "bit", "bitc", "bitco"] {
        s.set_query(q);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert!(fake.calls().is_empty(), "nothing may be sent while typing");

    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(fake.calls(), vec!["bitco".to_string()]);
    let snap = s.snapshot();
    assert_eq!(snap.status, SearchStatus::Results);
    assert_eq!(snap.results[0].id, "bitco-1");
}

#[tokio::test(start_paused = true)]
async fn status_stays_idle_until_quiet_period_elapses() {
    let fake = Arc::new(FakeSearch::new().delay("eth", Duration::from_millis(200)));
    let s = session(&fake);

    s.set_query("eth");
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(s.snapshot().status, SearchStatus::Idle);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(s.snapshot().status, SearchStatus::Searching);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(s.snapshot().status, SearchStatus::Results);
}

#[tokio::test(start_paused = true)]
async fn queries_shorter_than_two_chars_are_never_sent() {
    let fake = Arc::new(FakeSearch::new());
    let s = session(&fake);

    for q in ["", "b", " b ", "  "] {
        s.set_query(q);
        tokio::time::sleep(Duration::from_secs(1)).await;
        let snap = s.snapshot();
        assert_eq!(snap.status, SearchStatus::Idle);
        assert!(snap.results.is_empty());
    }
    assert!(fake.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn shortening_the_query_clears_results_and_cancels_pending_dispatch() {
    let fake = Arc::new(FakeSearch::new());
    let s = session(&fake);

    s.set_query("sol");
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(s.snapshot().results.len(), 3);

    s.set_query("sola");
    s.set_query("s");
    tokio::time::sleep(Duration::from_secs(1)).await;

    let snap = s.snapshot();
    assert_eq!(snap.status, SearchStatus::Idle);
    assert!(snap.results.is_empty());
    assert_eq!(fake.calls(), vec!["sol".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn debouncer_runs_only_the_last_action() {
    let hits = Arc::new(AtomicUsize::new(0));
    let last = Arc::new(AtomicUsize::new(0));
    let mut d = Debouncer::new(Duration::from_millis(50));

    for i in 1..=5 {
        let hits = Arc::clone(&hits);
        let last = Arc::clone(&last);
        d.schedule(move || {
            hits.fetch_add(1, Ordering::SeqCst);
            last.store(i, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(d.is_pending());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(last.load(Ordering::SeqCst), 5);
    assert!(!d.is_pending());
}

#[tokio::test(start_paused = true)]
async fn dropping_debouncer_cancels_pending_action() {
    let hits = Arc::new(AtomicUsize::new(0));
    {
        let mut d = Debouncer::new(Duration::from_millis(50));
        let hits = Arc::clone(&hits);
        d.schedule(move || {
            hits.fetch_add(1, Ordering::SeqCst);
        });
    }
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn short_query_always_wins_over_a_firing_dispatch() {
    use coinfeed_rs::SessionConfig;

    for round in 0..40u64 {
        let fake = Arc::new(FakeSearch::new());
        let s = SearchSession::with_config(
            Arc::clone(&fake),
            RecentSearches::new(Arc::new(MemoryStorage::new())),
            SessionConfig {
                quiet_period: Duration::from_millis(1),
                ..SessionConfig::default()
            },
        );

        s.set_query("abc");
        // Land the short query around the moment the timer fires.
        tokio::time::sleep(Duration::from_micros(500 + (round % 5) * 250)).await;
        s.set_query("a");
        tokio::time::sleep(Duration::from_millis(30)).await;

        let snap = s.snapshot();
        assert_eq!(snap.status, SearchStatus::Idle, "round {round}");
        assert!(snap.results.is_empty(), "round {round}");
    }
}
