use std::num::NonZeroUsize;

use super::HistoryStore;
use crate::domain::models::OutOfRangeError;
use crate::domain::models::TranslationRecord;
use crate::domain::models::TranslationRequest;

fn record(text: &str) -> TranslationRecord {
    return TranslationRecord::new(
        TranslationRequest::new(text, "english", "french"),
        &format!("{text}-fr"),
    );
}

fn originals(store: &HistoryStore) -> Vec<String> {
    return store
        .list()
        .iter()
        .map(|e| return e.original_text.to_string())
        .collect();
}

fn capacity(n: usize) -> NonZeroUsize {
    return NonZeroUsize::new(n).unwrap();
}

#[test]
fn it_starts_empty() {
    let store = HistoryStore::default();
    assert!(store.is_empty());
    assert_eq!(store.capacity(), 5);
    assert!(store.list().is_empty());
}

#[test]
fn it_never_exceeds_capacity() {
    let mut store = HistoryStore::new(capacity(3));
    for i in 0..10 {
        store.append(record(&format!("r{i}")));
        assert!(store.len() <= 3);
        assert!(store.list().len() <= 3);
    }
}

#[test]
fn it_evicts_oldest_first() {
    let mut store = HistoryStore::new(capacity(3));
    for i in 1..=7 {
        store.append(record(&format!("r{i}")));
    }

    assert_eq!(originals(&store), vec!["r7", "r6", "r5"]);
}

#[test]
fn it_clears() {
    let mut store = HistoryStore::new(capacity(3));
    store.append(record("a"));
    store.append(record("b"));
    store.clear();

    assert!(store.list().is_empty());
    assert_eq!(store.capacity(), 3);
}

#[test]
fn it_returns_snapshots() {
    let mut store = HistoryStore::new(capacity(2));
    store.append(record("a"));
    let snapshot = store.list();
    store.append(record("b"));
    store.clear();

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].original_text, "a");
}

#[test]
fn it_replays_newest_first() {
    let mut store = HistoryStore::new(capacity(5));
    store.append(record("a"));
    store.append(record("b"));
    store.append(record("c"));

    let list = store.list();
    for (idx, entry) in list.iter().enumerate() {
        assert_eq!(store.replay(idx), Ok(entry.original_text.to_string()));
    }

    assert_eq!(store.replay(0), Ok("c".to_string()));
    assert_eq!(store.replay(0), Ok("c".to_string()));
    assert_eq!(store.replay(2), Ok("a".to_string()));
}

#[test]
fn it_fails_replay_out_of_range() {
    let mut store = HistoryStore::new(capacity(5));
    assert_eq!(store.replay(0), Err(OutOfRangeError { index: 0, len: 0 }));

    store.append(record("a"));
    assert_eq!(store.replay(1), Err(OutOfRangeError { index: 1, len: 1 }));
}

#[test]
fn it_shrinks_capacity_immediately() {
    let mut store = HistoryStore::new(capacity(2));
    store.append(record("A"));
    store.append(record("B"));
    store.append(record("C"));
    assert_eq!(originals(&store), vec!["C", "B"]);

    store.set_capacity(capacity(1));
    assert_eq!(originals(&store), vec!["C"]);
    assert_eq!(store.capacity(), 1);
}

#[test]
fn it_shrinks_by_more_than_one() {
    let mut store = HistoryStore::new(capacity(10));
    for i in 1..=8 {
        store.append(record(&format!("r{i}")));
    }

    store.set_capacity(capacity(3));
    assert_eq!(originals(&store), vec!["r8", "r7", "r6"]);
}

#[test]
fn it_grows_capacity_without_eviction() {
    let mut store = HistoryStore::new(capacity(2));
    store.append(record("a"));
    store.append(record("b"));
    store.set_capacity(capacity(4));
    store.append(record("c"));

    assert_eq!(originals(&store), vec!["c", "b", "a"]);
}
