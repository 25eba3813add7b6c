// # ipsync-core
//
// Core library for the ipsync dynamic DNS updater.
//
// ## Architecture Overview
//
// This library provides the decision logic for one-shot DNS record
// synchronization:
// - **IpSource**: Trait for detecting the current public IP address
// - **RecordStore**: Trait for listing and editing DNS records at a provider
// - **Synchronizer**: Orchestrates one IP lookup → record lookup → compare →
//   conditional update run
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Decision logic is separate from transports
// 2. **Single-Shot**: One invocation performs exactly one synchronization
//    attempt; there is no retry, no scheduling and no persisted state
// 3. **Idempotency**: A record that already carries the current IP is never
//    written to again
// 4. **Library-First**: All core functionality can be embedded without the CLI

pub mod error;
pub mod sync;
pub mod traits;

// Re-export core types for convenience
pub use error::{Error, Result};
pub use sync::{RecordKey, SyncError, SyncOutcome, SyncTarget, Synchronizer};
pub use traits::{DomainRecord, IpSource, RecordStore, RecordType, UpdateRequest};
