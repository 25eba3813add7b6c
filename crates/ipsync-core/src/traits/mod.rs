//! Capability traits for the ipsync system
//!
//! The synchronizer depends on two injected capabilities: an [`IpSource`]
//! that answers "what is my public IP right now" and a [`RecordStore`]
//! that can list and edit the DNS records of a zone. Both are implemented
//! by separate crates so the core can be tested with deterministic fakes.

pub mod ip_source;
pub mod record_store;

pub use ip_source::IpSource;
pub use record_store::{DomainRecord, RecordStore, RecordType, UpdateRequest};
