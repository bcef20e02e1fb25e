//! Tests for the append-only snapshot store.

use std::io::Write;

use serde_json::json;
use tempfile::tempdir;

use crate::errors::{Error, StoreError};
use crate::snapshot::{SnapshotRepositoryTrait, SnapshotStore};
use crate::table::Table;

fn one_row_table(name: &str, holdings: f64) -> Table {
    serde_json::from_value(json!([{"name": name, "total_holdings": holdings}])).unwrap()
}

#[test]
fn test_missing_file_is_an_empty_history() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::open(dir.path().join("treasury_snapshots.jsonl")).unwrap();

    assert!(store.load_all().unwrap().is_empty());
    assert!(store.latest(None).unwrap().is_none());
    assert!(store.latest(Some("bitcoin")).unwrap().is_none());
}

#[test]
fn test_append_then_load_all_round_trips_in_order() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::open(dir.path().join("treasury_snapshots.jsonl")).unwrap();

    let tables = [
        ("bitcoin", one_row_table("A", 1.0)),
        ("ethereum", one_row_table("B", 2.0)),
        ("bitcoin", one_row_table("C", 3.0)),
    ];
    for (tag, table) in &tables {
        store.append(table.clone(), tag).unwrap();
    }

    let all = store.load_all().unwrap();
    assert_eq!(all.len(), 3);
    for (snapshot, (tag, table)) in all.iter().zip(&tables) {
        assert_eq!(snapshot.coin, *tag);
        assert_eq!(&snapshot.data, table);
    }
}

#[test]
fn test_latest_ranks_by_insertion_order_per_tag() {
    let dir = tempdir().unwrap();
    let store = SnapshotStore::open(dir.path().join("treasury_snapshots.jsonl")).unwrap();

    store.append(one_row_table("A", 1.0), "bitcoin").unwrap();
    store.append(one_row_table("B", 2.0), "ethereum").unwrap();
    store.append(one_row_table("C", 3.0), "bitcoin").unwrap();

    // the third append wins for bitcoin, not the first
    let latest_btc = store.latest(Some("bitcoin")).unwrap().unwrap();
    assert_eq!(latest_btc.data, one_row_table("C", 3.0));

    let latest_any = store.latest(None).unwrap().unwrap();
    assert_eq!(latest_any.coin, "bitcoin");
    assert_eq!(latest_any.data, one_row_table("C", 3.0));

    assert!(store.latest(Some("dogecoin")).unwrap().is_none());
}

#[test]
fn test_history_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("treasury_snapshots.jsonl");

    {
        let store = SnapshotStore::open(&path).unwrap();
        store.append(one_row_table("A", 1.0), "bitcoin").unwrap();
        store.append(one_row_table("B", 2.0), "ethereum").unwrap();
    }

    let reopened = SnapshotStore::open(&path).unwrap();
    assert_eq!(reopened.load_all().unwrap().len(), 2);

    // index rebuilt by the open-time scan
    let latest = reopened.latest(Some("ethereum")).unwrap().unwrap();
    assert_eq!(latest.data, one_row_table("B", 2.0));

    // appends continue after the existing records
    reopened.append(one_row_table("C", 3.0), "bitcoin").unwrap();
    assert_eq!(reopened.load_all().unwrap().len(), 3);
}

#[test]
fn test_corrupt_record_is_fatal_on_open() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("treasury_snapshots.jsonl");
    std::fs::write(&path, "{ not valid json\n").unwrap();

    match SnapshotStore::open(&path) {
        Err(Error::Store(StoreError::Corrupt { .. })) => {}
        other => panic!("expected corrupt store error, got {:?}", other.err()),
    }
}

#[test]
fn test_corrupt_record_is_fatal_on_load_all() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("treasury_snapshots.jsonl");

    let store = SnapshotStore::open(&path).unwrap();
    store.append(one_row_table("A", 1.0), "bitcoin").unwrap();

    // a second writer scribbles a bad record
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(&path)
        .unwrap();
    writeln!(file, "garbage").unwrap();

    match store.load_all() {
        Err(Error::Store(StoreError::Corrupt { .. })) => {}
        other => panic!("expected corrupt store error, got {:?}", other.err()),
    }
}

#[test]
fn test_timestamps_are_rfc3339_utc_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("treasury_snapshots.jsonl");

    let store = SnapshotStore::open(&path).unwrap();
    store.append(one_row_table("A", 1.0), "bitcoin").unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let record: serde_json::Value = serde_json::from_str(raw.lines().next().unwrap()).unwrap();
    let timestamp = record["timestamp"].as_str().unwrap();
    assert!(
        chrono::DateTime::parse_from_rfc3339(timestamp).is_ok(),
        "not RFC 3339: {timestamp}"
    );
    assert_eq!(record["coin"], "bitcoin");
}
