// # Record Store Trait
//
// Defines the interface for reading and editing DNS records at a provider.
//
// ## Implementations
//
// - DigitalOcean: `ipsync-provider-digitalocean` crate
// - Future: Cloudflare, Route53, Gandi, etc.
//
// ## Usage
//
// ```rust,ignore
// use ipsync_core::{RecordStore, UpdateRequest};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let store = /* RecordStore implementation */;
//
//     let records = store.list_records("example.com").await?;
//     let target = &records[0];
//
//     let request = UpdateRequest::for_record(target, "203.0.113.5");
//     store.edit_record("example.com", &target.id, &request).await?;
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// DNS record type
///
/// The variants cover the record types DigitalOcean-style zone APIs
/// return. `Display` and `FromStr` use the exact uppercase wire form;
/// parsing is case-sensitive because provider APIs are expected to
/// normalize case themselves and the core performs no normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    A,
    Aaaa,
    Caa,
    Cname,
    Mx,
    Ns,
    Soa,
    Srv,
    Txt,
}

impl RecordType {
    /// The uppercase wire form of this record type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Caa => "CAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Ns => "NS",
            Self::Soa => "SOA",
            Self::Srv => "SRV",
            Self::Txt => "TXT",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CAA" => Ok(Self::Caa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "NS" => Ok(Self::Ns),
            "SOA" => Ok(Self::Soa),
            "SRV" => Ok(Self::Srv),
            "TXT" => Ok(Self::Txt),
            other => Err(crate::Error::invalid_input(format!(
                "unknown DNS record type: '{}'",
                other
            ))),
        }
    }
}

/// A single DNS record as returned by a provider
///
/// All fields are transient; nothing is persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// Provider-assigned record identifier (opaque to the core)
    pub id: String,
    /// The record name ("www", or "@" for the zone apex)
    pub name: String,
    /// The record type
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// The record payload (for A/AAAA this is the IP address)
    pub data: String,
    /// Time-to-live in seconds
    pub ttl: u32,
}

/// Payload for editing an existing record
///
/// Built via [`UpdateRequest::for_record`] so the TTL is always carried
/// forward from the matched record; the synchronizer never invents or
/// alters a TTL, to avoid silently changing resolver caching behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    /// The record type (unchanged from the existing record)
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// The record name (unchanged from the existing record)
    pub name: String,
    /// The new record payload
    pub data: String,
    /// TTL copied verbatim from the existing record
    pub ttl: u32,
}

impl UpdateRequest {
    /// Build an update request that replaces `record`'s data while keeping
    /// its name, type and TTL
    pub fn for_record(record: &DomainRecord, data: impl Into<String>) -> Self {
        Self {
            record_type: record.record_type,
            name: record.name.clone(),
            data: data.into(),
            ttl: record.ttl,
        }
    }
}

/// Trait for record store implementations
///
/// A record store exposes the two remote operations the synchronizer
/// needs: list the records of a zone and overwrite one record by id.
/// Implementations handle the specifics of each provider's API.
///
/// # Responsibilities
///
/// Record stores are transports, not decision-makers:
/// - One logical remote transaction per call, no partial-failure state
/// - No retry or backoff (single attempt per invocation is the contract)
/// - No caching of records between calls
/// - Never decide whether an update is needed (the synchronizer does)
///
/// Transport errors and provider-reported errors are both surfaced as
/// failures; the core does not distinguish 4xx from 5xx.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// List all records for a zone, in provider-defined order
    ///
    /// A provider that paginates must collect every page into the one
    /// returned sequence before returning.
    async fn list_records(&self, domain: &str) -> Result<Vec<DomainRecord>, crate::Error>;

    /// Overwrite the record identified by `record_id` with `request`
    ///
    /// The provider applies the edit atomically: either it confirms
    /// success or the call fails.
    async fn edit_record(
        &self,
        domain: &str,
        record_id: &str,
        request: &UpdateRequest,
    ) -> Result<(), crate::Error>;

    /// Get the store name (for logging/debugging)
    fn store_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_type_roundtrips_through_wire_form() {
        for ty in [
            RecordType::A,
            RecordType::Aaaa,
            RecordType::Caa,
            RecordType::Cname,
            RecordType::Mx,
            RecordType::Ns,
            RecordType::Soa,
            RecordType::Srv,
            RecordType::Txt,
        ] {
            assert_eq!(ty.as_str().parse::<RecordType>().unwrap(), ty);
        }
    }

    #[test]
    fn record_type_parsing_is_case_sensitive() {
        assert!("a".parse::<RecordType>().is_err());
        assert!("aaaa".parse::<RecordType>().is_err());
        assert!("Cname".parse::<RecordType>().is_err());
        assert!("PTR".parse::<RecordType>().is_err());
    }

    #[test]
    fn domain_record_deserializes_from_provider_json() {
        let record: DomainRecord = serde_json::from_str(
            r#"{"id":"3352896","name":"home","type":"A","data":"198.51.100.9","ttl":3600}"#,
        )
        .unwrap();

        assert_eq!(record.id, "3352896");
        assert_eq!(record.name, "home");
        assert_eq!(record.record_type, RecordType::A);
        assert_eq!(record.data, "198.51.100.9");
        assert_eq!(record.ttl, 3600);
    }

    #[test]
    fn update_request_carries_existing_ttl_and_identity() {
        let record: DomainRecord = serde_json::from_str(
            r#"{"id":"7","name":"home","type":"AAAA","data":"2001:db8::1","ttl":1800}"#,
        )
        .unwrap();

        let request = UpdateRequest::for_record(&record, "2001:db8::2");
        assert_eq!(request.record_type, RecordType::Aaaa);
        assert_eq!(request.name, "home");
        assert_eq!(request.data, "2001:db8::2");
        assert_eq!(request.ttl, 1800);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["type"], "AAAA");
        assert_eq!(json["ttl"], 1800);
    }
}
