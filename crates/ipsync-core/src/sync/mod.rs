//! Core synchronization logic
//!
//! The Synchronizer is responsible for one run of:
//! - Resolving the current public IP via IpSource
//! - Listing the zone's records via RecordStore
//! - Selecting the record matching the requested (name, type) key
//! - Comparing and, only when the data differs, issuing a TTL-preserving
//!   update
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐       ┌──────────────┐       ┌──────────────┐
//! │  IpSource   │──ip──▶│ Synchronizer │──────▶│ RecordStore  │
//! └─────────────┘       └──────────────┘       │ list / edit  │
//!                              │               └──────────────┘
//!                              ▼
//!                        SyncOutcome
//! ```
//!
//! Each run owns its own values; nothing carries over between runs and
//! concurrent runs against the same record are not coordinated (the
//! provider's own last-write-wins consistency governs).

use crate::error::Error;
use crate::traits::{DomainRecord, IpSource, RecordStore, RecordType, UpdateRequest};
use tracing::debug;

/// The (name, type) pair that selects one record out of a zone
///
/// At most one record in a well-kept zone matches a given key; if the
/// provider returns several, the first in provider order is used.
/// Matching is case-sensitive on the name, exactly as the provider
/// returned it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKey {
    /// The record name ("www", or "@" for the zone apex)
    pub name: String,
    /// The record type
    pub record_type: RecordType,
}

impl RecordKey {
    /// Create a new record key
    pub fn new(name: impl Into<String>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
        }
    }

    /// Whether `record` matches this key
    pub fn matches(&self, record: &DomainRecord) -> bool {
        record.name == self.name && record.record_type == self.record_type
    }
}

/// The invocation parameters for one synchronization run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    /// The zone the record belongs to (e.g. "example.com")
    pub domain: String,
    /// The key selecting the record within the zone
    pub record: RecordKey,
}

impl SyncTarget {
    /// Create a new synchronization target
    pub fn new(domain: impl Into<String>, record: RecordKey) -> Self {
        Self {
            domain: domain.into(),
            record,
        }
    }
}

/// Terminal outcome of a successful synchronization run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The record carried stale data and was updated
    Updated {
        /// The record data before the update
        previous: String,
        /// The freshly observed public IP now stored in the record
        current: String,
    },
    /// The record already carried the current IP; no write was issued
    AlreadyCurrent {
        /// The IP both sides agree on
        current: String,
    },
}

/// A synchronization failure, tagged with the step that failed
///
/// Every failure is surfaced to the immediate caller; the core performs
/// no retry and nothing needs rolling back (writes are single remote
/// calls). The caller decides how to report the failure and exit.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The public IP could not be resolved; no further steps were taken
    #[error("public IP lookup failed")]
    IpLookup {
        #[source]
        source: Error,
    },

    /// The zone's records could not be listed
    #[error("failed to list records for domain '{domain}'")]
    ListRecords {
        domain: String,
        #[source]
        source: Error,
    },

    /// No record in the zone matches the requested (name, type) key
    ///
    /// This is permanent and non-retryable: the named record must
    /// pre-exist, the synchronizer never creates records.
    #[error("record '{name}' of type '{record_type}' not found in domain '{domain}'")]
    RecordNotFound {
        domain: String,
        name: String,
        record_type: RecordType,
    },

    /// The provider rejected or failed the update call
    #[error("failed to update record {record_id} in domain '{domain}'")]
    EditRecord {
        domain: String,
        record_id: String,
        #[source]
        source: Error,
    },
}

/// One-shot DNS record synchronizer
///
/// Obtains the current public IP, matches the target record among the
/// zone's records and issues an idempotent, TTL-preserving update when
/// the value differs.
///
/// ## Lifecycle
///
/// 1. Create with [`Synchronizer::new()`] over injected capabilities
/// 2. Call [`Synchronizer::sync()`] once per process run
/// 3. The structured outcome is returned to the caller, which decides
///    how to log it; the synchronizer itself reports nothing
///
/// The three capability calls run strictly sequentially on one logical
/// task; they are the only suspension points. A caller-side cancellation
/// that fails an in-flight call is treated like any other failure at
/// that step.
pub struct Synchronizer {
    /// Source of the current public IP
    ip_source: Box<dyn IpSource>,
    /// Remote record read/write capability
    store: Box<dyn RecordStore>,
}

impl Synchronizer {
    /// Create a new synchronizer over the given capabilities
    pub fn new(ip_source: Box<dyn IpSource>, store: Box<dyn RecordStore>) -> Self {
        Self { ip_source, store }
    }

    /// Run one synchronization pass for `target`
    ///
    /// # Returns
    ///
    /// - `Ok(SyncOutcome::Updated { .. })`: the record was stale and the
    ///   provider confirmed the update
    /// - `Ok(SyncOutcome::AlreadyCurrent { .. })`: the record already
    ///   carries the current IP; no write call was issued
    /// - `Err(SyncError)`: the step that failed, with the underlying error
    pub async fn sync(&self, target: &SyncTarget) -> Result<SyncOutcome, SyncError> {
        let ip = self
            .ip_source
            .current()
            .await
            .map_err(|source| SyncError::IpLookup { source })?;
        debug!(ip = %ip, "resolved current public IP");

        let records = self
            .store
            .list_records(&target.domain)
            .await
            .map_err(|source| SyncError::ListRecords {
                domain: target.domain.clone(),
                source,
            })?;
        debug!(
            store = self.store.store_name(),
            domain = %target.domain,
            count = records.len(),
            "listed zone records"
        );

        // First match in provider order wins; duplicate keys are not an
        // error the synchronizer detects.
        let record = records
            .iter()
            .find(|r| target.record.matches(r))
            .ok_or_else(|| SyncError::RecordNotFound {
                domain: target.domain.clone(),
                name: target.record.name.clone(),
                record_type: target.record.record_type,
            })?;

        // Byte-for-byte equality: re-running with an unchanged IP must
        // never mutate provider state.
        if record.data == ip {
            debug!(record = %record.name, data = %record.data, "record already current");
            return Ok(SyncOutcome::AlreadyCurrent { current: ip });
        }

        let request = UpdateRequest::for_record(record, ip.as_str());
        self.store
            .edit_record(&target.domain, &record.id, &request)
            .await
            .map_err(|source| SyncError::EditRecord {
                domain: target.domain.clone(),
                record_id: record.id.clone(),
                source,
            })?;

        debug!(
            record = %record.name,
            previous = %record.data,
            current = %ip,
            ttl = record.ttl,
            "record updated"
        );
        Ok(SyncOutcome::Updated {
            previous: record.data.clone(),
            current: ip,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, record_type: RecordType, data: &str) -> DomainRecord {
        DomainRecord {
            id: "1".to_string(),
            name: name.to_string(),
            record_type,
            data: data.to_string(),
            ttl: 300,
        }
    }

    #[test]
    fn key_matches_on_name_and_type() {
        let key = RecordKey::new("home", RecordType::A);

        assert!(key.matches(&record("home", RecordType::A, "198.51.100.9")));
        assert!(!key.matches(&record("home", RecordType::Aaaa, "2001:db8::1")));
        assert!(!key.matches(&record("office", RecordType::A, "198.51.100.9")));
    }

    #[test]
    fn key_matching_is_case_sensitive() {
        let key = RecordKey::new("home", RecordType::A);
        assert!(!key.matches(&record("Home", RecordType::A, "198.51.100.9")));
    }
}
