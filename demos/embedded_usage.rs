//! Minimal embedding example for ipsync-core
//!
//! This example demonstrates using ipsync-core as a library in a custom
//! application, with both capabilities supplied in-process. No network
//! calls are made; the synchronizer runs one pass over fixed data.

use ipsync_core::traits::{DomainRecord, IpSource, RecordStore, RecordType, UpdateRequest};
use ipsync_core::{RecordKey, Result, SyncOutcome, SyncTarget, Synchronizer};
use std::sync::Mutex;

/// IP source that answers with a fixed address
struct EmbeddedIpSource {
    ip: String,
}

#[async_trait::async_trait]
impl IpSource for EmbeddedIpSource {
    async fn current(&self) -> Result<String> {
        Ok(self.ip.clone())
    }
}

/// Record store over an in-memory zone
struct EmbeddedStore {
    records: Mutex<Vec<DomainRecord>>,
}

#[async_trait::async_trait]
impl RecordStore for EmbeddedStore {
    async fn list_records(&self, _domain: &str) -> Result<Vec<DomainRecord>> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn edit_record(
        &self,
        _domain: &str,
        record_id: &str,
        request: &UpdateRequest,
    ) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.iter_mut().find(|r| r.id == record_id) {
            record.data = request.data.clone();
            record.ttl = request.ttl;
        }
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "embedded"
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let store = EmbeddedStore {
        records: Mutex::new(vec![DomainRecord {
            id: "1".to_string(),
            name: "home".to_string(),
            record_type: RecordType::A,
            data: "198.51.100.9".to_string(),
            ttl: 3600,
        }]),
    };

    let synchronizer = Synchronizer::new(
        Box::new(EmbeddedIpSource {
            ip: "203.0.113.5".to_string(),
        }),
        Box::new(store),
    );

    let target = SyncTarget::new("example.com", RecordKey::new("home", RecordType::A));

    match synchronizer.sync(&target).await? {
        SyncOutcome::Updated { previous, current } => {
            println!("updated: {previous} -> {current}");
        }
        SyncOutcome::AlreadyCurrent { current } => {
            println!("already current: {current}");
        }
    }

    // A second run against the same zone is a no-op
    match synchronizer.sync(&target).await? {
        SyncOutcome::AlreadyCurrent { current } => {
            println!("second run was a no-op at {current}");
        }
        SyncOutcome::Updated { .. } => unreachable!("record was just updated"),
    }

    Ok(())
}
