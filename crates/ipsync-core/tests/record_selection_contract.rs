//! Contract test: record selection
//!
//! The synchronizer selects the first record in provider order whose
//! (name, type) equals the requested key, matches case-sensitively, and
//! treats a missing record as a terminal failure with no write call.

mod common;

use common::*;
use ipsync_core::{RecordKey, RecordType, SyncError, SyncOutcome, SyncTarget, Synchronizer};
use std::sync::Arc;

fn target() -> SyncTarget {
    SyncTarget::new("example.com", RecordKey::new("home", RecordType::A))
}

#[tokio::test]
async fn first_match_in_provider_order_wins() {
    // Two records share the same (name, type) with different data; the
    // synchronizer must act on the first one the provider returned.
    let store = FakeRecordStore::new(vec![
        record("1", "home", RecordType::A, "198.51.100.9", 3600),
        record("2", "home", RecordType::A, "192.0.2.77", 600),
    ]);
    let store_probe = Arc::new(FakeRecordStore::sharing_counters_with(&store));

    let synchronizer = Synchronizer::new(
        Box::new(StaticIpSource::new("203.0.113.5")),
        Box::new(store),
    );

    let outcome = synchronizer.sync(&target()).await.expect("sync succeeds");

    assert_eq!(
        outcome,
        SyncOutcome::Updated {
            previous: "198.51.100.9".to_string(),
            current: "203.0.113.5".to_string(),
        }
    );

    let edits = store_probe.edits();
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].record_id, "1", "the duplicate must be ignored");
    assert_eq!(edits[0].request.ttl, 3600);
}

#[tokio::test]
async fn matching_skips_records_of_other_types_and_names() {
    let store = FakeRecordStore::new(vec![
        record("1", "home", RecordType::Aaaa, "2001:db8::1", 3600),
        record("2", "office", RecordType::A, "192.0.2.8", 3600),
        record("3", "home", RecordType::A, "198.51.100.9", 1800),
    ]);
    let store_probe = Arc::new(FakeRecordStore::sharing_counters_with(&store));

    let synchronizer = Synchronizer::new(
        Box::new(StaticIpSource::new("203.0.113.5")),
        Box::new(store),
    );

    synchronizer.sync(&target()).await.expect("sync succeeds");

    let edits = store_probe.edits();
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].record_id, "3");
}

#[tokio::test]
async fn missing_record_is_terminal_with_no_write() {
    // Scenario C: no record named "home" of type "A" exists
    let store = FakeRecordStore::new(vec![
        record("1", "home", RecordType::Aaaa, "2001:db8::1", 3600),
        record("2", "office", RecordType::A, "192.0.2.8", 3600),
    ]);
    let store_probe = Arc::new(FakeRecordStore::sharing_counters_with(&store));

    let synchronizer = Synchronizer::new(
        Box::new(StaticIpSource::new("203.0.113.5")),
        Box::new(store),
    );

    let err = synchronizer.sync(&target()).await.unwrap_err();

    match err {
        SyncError::RecordNotFound {
            domain,
            name,
            record_type,
        } => {
            assert_eq!(domain, "example.com");
            assert_eq!(name, "home");
            assert_eq!(record_type, RecordType::A);
        }
        other => panic!("expected RecordNotFound, got {other:?}"),
    }
    assert_eq!(store_probe.edit_call_count(), 0);
}

#[tokio::test]
async fn name_matching_is_case_sensitive() {
    // Provider APIs are expected to normalize case themselves; the core
    // performs no additional normalization.
    let store = FakeRecordStore::new(vec![record(
        "1",
        "Home",
        RecordType::A,
        "198.51.100.9",
        3600,
    )]);

    let synchronizer = Synchronizer::new(
        Box::new(StaticIpSource::new("203.0.113.5")),
        Box::new(store),
    );

    let err = synchronizer.sync(&target()).await.unwrap_err();
    assert!(matches!(err, SyncError::RecordNotFound { .. }));
}
