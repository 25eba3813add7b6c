//! Test doubles and common utilities for synchronizer contract tests
//!
//! These doubles count and record every capability call so the tests can
//! assert not only on outcomes but on which remote operations ran.

use ipsync_core::error::{Error, Result};
use ipsync_core::traits::{DomainRecord, IpSource, RecordStore, RecordType, UpdateRequest};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// An IP source that always returns a fixed address
pub struct StaticIpSource {
    ip: String,
    call_count: Arc<AtomicUsize>,
}

impl StaticIpSource {
    pub fn new(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times current() was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Create a new StaticIpSource that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            ip: other.ip.clone(),
            call_count: Arc::clone(&other.call_count),
        }
    }
}

#[async_trait::async_trait]
impl IpSource for StaticIpSource {
    async fn current(&self) -> Result<String> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        Ok(self.ip.clone())
    }
}

/// An IP source whose transport always fails
pub struct FailingIpSource;

#[async_trait::async_trait]
impl IpSource for FailingIpSource {
    async fn current(&self) -> Result<String> {
        Err(Error::ip_source("simulated transport failure"))
    }
}

/// A recorded edit_record() invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEdit {
    pub domain: String,
    pub record_id: String,
    pub request: UpdateRequest,
}

/// A record store over a fixed record list that records every call
pub struct FakeRecordStore {
    records: Vec<DomainRecord>,
    list_call_count: Arc<AtomicUsize>,
    edit_call_count: Arc<AtomicUsize>,
    edits: Arc<std::sync::Mutex<Vec<RecordedEdit>>>,
    fail_list: bool,
    fail_edit: bool,
}

impl FakeRecordStore {
    pub fn new(records: Vec<DomainRecord>) -> Self {
        Self {
            records,
            list_call_count: Arc::new(AtomicUsize::new(0)),
            edit_call_count: Arc::new(AtomicUsize::new(0)),
            edits: Arc::new(std::sync::Mutex::new(Vec::new())),
            fail_list: false,
            fail_edit: false,
        }
    }

    /// A store whose list_records() always fails
    pub fn failing_list() -> Self {
        Self {
            fail_list: true,
            ..Self::new(Vec::new())
        }
    }

    /// A store whose edit_record() always fails
    pub fn failing_edit(records: Vec<DomainRecord>) -> Self {
        Self {
            fail_edit: true,
            ..Self::new(records)
        }
    }

    /// Get the number of times list_records() was called
    pub fn list_call_count(&self) -> usize {
        self.list_call_count.load(Ordering::SeqCst)
    }

    /// Get the number of times edit_record() was called
    pub fn edit_call_count(&self) -> usize {
        self.edit_call_count.load(Ordering::SeqCst)
    }

    /// Get the recorded edit invocations
    pub fn edits(&self) -> Vec<RecordedEdit> {
        self.edits.lock().unwrap().clone()
    }

    /// Create a new FakeRecordStore that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            records: other.records.clone(),
            list_call_count: Arc::clone(&other.list_call_count),
            edit_call_count: Arc::clone(&other.edit_call_count),
            edits: Arc::clone(&other.edits),
            fail_list: other.fail_list,
            fail_edit: other.fail_edit,
        }
    }
}

#[async_trait::async_trait]
impl RecordStore for FakeRecordStore {
    async fn list_records(&self, _domain: &str) -> Result<Vec<DomainRecord>> {
        self.list_call_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_list {
            return Err(Error::record_store("simulated list failure"));
        }
        Ok(self.records.clone())
    }

    async fn edit_record(
        &self,
        domain: &str,
        record_id: &str,
        request: &UpdateRequest,
    ) -> Result<()> {
        self.edit_call_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_edit {
            return Err(Error::record_store("simulated edit failure"));
        }
        self.edits.lock().unwrap().push(RecordedEdit {
            domain: domain.to_string(),
            record_id: record_id.to_string(),
            request: request.clone(),
        });
        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "fake"
    }
}

/// Helper to build a DomainRecord for tests
pub fn record(id: &str, name: &str, record_type: RecordType, data: &str, ttl: u32) -> DomainRecord {
    DomainRecord {
        id: id.to_string(),
        name: name.to_string(),
        record_type,
        data: data.to_string(),
        ttl,
    }
}
