use chrono::TimeDelta;
use coinfeed_rs::cache::cache_key;
use coinfeed_rs::{ManualClock, TtlCache};
use std::sync::Arc;
use std::time::Duration;

use crate::common::fixed_now;

fn cache(ttl_secs: u64) -> (TtlCache<Vec<String>>, ManualClock) {
    let clock = ManualClock::new(fixed_now());
    let cache = TtlCache::new(Duration::from_secs(ttl_secs), Arc::new(clock.clone()));
    (cache, clock)
}

#[test]
fn value_is_served_until_ttl_elapses() {
    let (cache, clock) = cache(60);
    cache.set("news/latest", vec!["a".to_string()]);

    clock.advance(TimeDelta::seconds(60));
    assert_eq!(cache.get("news/latest"), Some(vec!["a".to_string()]));

    clock.advance(TimeDelta::milliseconds(1));
    assert_eq!(cache.get("news/latest"), None);
}

#[test]
fn expired_entry_is_evicted_on_lookup() {
    let (cache, clock) = cache(5);
    cache.set("k", vec![]);
    clock.advance(TimeDelta::seconds(6));

    assert_eq!(cache.len(), 1, "expired entries linger until looked up");
    assert_eq!(cache.get("k"), None);
    assert_eq!(cache.len(), 0);

    // Rewinding time does not resurrect it.
    clock.set(fixed_now());
    assert_eq!(cache.get("k"), None);
}

#[test]
fn missing_key_is_a_miss() {
    let (cache, _) = cache(60);
    assert_eq!(cache.get("nope"), None);
    assert!(cache.is_empty());
}

#[test]
fn per_entry_ttl_overrides_default() {
    let (cache, clock) = cache(60);
    cache.set_with_ttl("short", vec!["s".to_string()], Duration::from_secs(1));
    cache.set("long", vec!["l".to_string()]);

    clock.advance(TimeDelta::seconds(2));
    assert_eq!(cache.get("short"), None);
    assert_eq!(cache.get("long"), Some(vec!["l".to_string()]));
}

#[test]
fn overwriting_resets_the_age() {
    let (cache, clock) = cache(10);
    cache.set("k", vec!["old".to_string()]);
    clock.advance(TimeDelta::seconds(8));
    cache.set("k", vec!["new".to_string()]);
    clock.advance(TimeDelta::seconds(8));

    assert_eq!(cache.get("k"), Some(vec!["new".to_string()]));
}

#[test]
fn returned_value_is_an_independent_copy() {
    let (cache, _) = cache(60);
    cache.set("k", vec!["a".to_string()]);

    let mut got = cache.get("k").unwrap();
    got.push("mutated".to_string());

    assert_eq!(cache.get("k"), Some(vec!["a".to_string()]));
}

#[test]
fn invalidate_clear_and_purge() {
    let (cache, clock) = cache(10);
    cache.set("a", vec![]);
    cache.set_with_ttl("b", vec![], Duration::from_secs(1));
    cache.set("c", vec![]);

    assert!(cache.invalidate("a"));
    assert!(!cache.invalidate("a"));

    clock.advance(TimeDelta::seconds(2));
    assert_eq!(cache.purge_expired(), 1);
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn cache_key_sorts_parameters() {
    let a = cache_key("news", [("page", "2".to_string()), ("limit", "10".to_string())]);
    let b = cache_key("news", [("limit", "10".to_string()), ("page", "2".to_string())]);
    assert_eq!(a, b);
    assert_eq!(a, "news?limit=10&page=2");
    assert_eq!(cache_key("news/categories", []), "news/categories");
}
