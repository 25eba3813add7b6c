// # DigitalOcean Record Store
//
// This crate implements the `RecordStore` capability against the
// DigitalOcean v2 API.
//
// ## API Reference
//
// - List records: GET `/v2/domains/:domain/records?page=N&per_page=M`
// - Edit record:  PUT `/v2/domains/:domain/records/:record_id`
//
// The list endpoint paginates; every page is collected into one sequence
// before returning, so the synchronizer always scans the full zone in
// provider order.
//
// ## Security
//
// - The API token NEVER appears in logs
// - The Debug implementation redacts the token
// - Construction fails fast on an empty token

use async_trait::async_trait;
use ipsync_core::traits::{DomainRecord, RecordStore, RecordType, UpdateRequest};
use ipsync_core::{Error, Result};
use serde::Deserialize;
use std::time::Duration;

/// DigitalOcean API base URL
const DIGITALOCEAN_API_BASE: &str = "https://api.digitalocean.com/v2";

/// Default HTTP timeout for API requests
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Records requested per page (DigitalOcean caps per_page at 200)
const RECORDS_PER_PAGE: u32 = 200;

/// DigitalOcean record store
///
/// Stateless and single-shot: one logical remote transaction per call,
/// no retry, no caching. All coordination is owned by the synchronizer.
pub struct DigitalOceanStore {
    /// DigitalOcean API token. Never logged.
    api_token: String,

    /// HTTP client for API requests
    client: reqwest::Client,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for DigitalOceanStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitalOceanStore")
            .field("api_token", &"<REDACTED>")
            .finish()
    }
}

/// One page of the record-list response
#[derive(Debug, Deserialize)]
struct RecordsPage {
    domain_records: Vec<WireRecord>,
    #[serde(default)]
    meta: Option<PageMeta>,
}

#[derive(Debug, Deserialize)]
struct PageMeta {
    total: u64,
}

/// A record as DigitalOcean returns it
///
/// Record ids are numeric on the wire; the core treats them as opaque
/// strings, so they are rendered with `to_string` during conversion.
#[derive(Debug, Deserialize)]
struct WireRecord {
    id: u64,
    name: String,
    #[serde(rename = "type")]
    record_type: RecordType,
    data: String,
    ttl: u32,
}

impl From<WireRecord> for DomainRecord {
    fn from(wire: WireRecord) -> Self {
        Self {
            id: wire.id.to_string(),
            name: wire.name,
            record_type: wire.record_type,
            data: wire.data,
            ttl: wire.ttl,
        }
    }
}

impl DigitalOceanStore {
    /// Create a new DigitalOcean store
    ///
    /// # Parameters
    ///
    /// - `api_token`: DigitalOcean personal access token with write scope
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the token is empty.
    pub fn new(api_token: impl Into<String>) -> Result<Self> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(Error::config("DigitalOcean API token cannot be empty"));
        }

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { api_token, client })
    }

    /// Map a non-success API response to an error kind
    ///
    /// The synchronizer treats every kind as a plain failure; the mapping
    /// only makes logs actionable (bad token vs. missing domain vs.
    /// transient provider trouble).
    async fn response_error(context: &str, response: reqwest::Response) -> Error {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read error response".to_string());

        match status.as_u16() {
            401 | 403 => Error::auth(format!(
                "{}: invalid API token or insufficient permissions (status {})",
                context, status
            )),
            404 => Error::not_found(format!("{}: {}", context, body)),
            429 => Error::rate_limited(format!("{}: status {}", context, status)),
            500..=599 => Error::provider(
                "digitalocean",
                format!("{}: server error (transient): {} - {}", context, status, body),
            ),
            _ => Error::provider(
                "digitalocean",
                format!("{}: {} - {}", context, status, body),
            ),
        }
    }

    /// Fetch one page of the zone's records
    async fn fetch_page(&self, domain: &str, page: u32) -> Result<RecordsPage> {
        let url = format!(
            "{}/domains/{}/records?page={}&per_page={}",
            DIGITALOCEAN_API_BASE, domain, page, RECORDS_PER_PAGE
        );

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| Error::provider("digitalocean", format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::response_error(
                &format!("listing records for domain '{}'", domain),
                response,
            )
            .await);
        }

        response
            .json::<RecordsPage>()
            .await
            .map_err(|e| Error::provider("digitalocean", format!("failed to parse response: {}", e)))
    }
}

#[async_trait]
impl RecordStore for DigitalOceanStore {
    /// List all records for `domain`, collecting every page
    async fn list_records(&self, domain: &str) -> Result<Vec<DomainRecord>> {
        tracing::debug!(domain, "listing DigitalOcean records");

        let mut records: Vec<DomainRecord> = Vec::new();
        let mut page: u32 = 1;

        loop {
            let batch = self.fetch_page(domain, page).await?;
            let total = batch.meta.as_ref().map(|m| m.total);
            let fetched = batch.domain_records.len();

            records.extend(batch.domain_records.into_iter().map(DomainRecord::from));

            // Stop on a short or empty page, or once the advertised total
            // is reached. Provider order is preserved across pages.
            let done = fetched == 0
                || fetched < RECORDS_PER_PAGE as usize
                || total.is_some_and(|t| records.len() as u64 >= t);
            if done {
                break;
            }
            page += 1;
        }

        tracing::debug!(domain, count = records.len(), "collected zone records");
        Ok(records)
    }

    /// Overwrite the record identified by `record_id`
    async fn edit_record(
        &self,
        domain: &str,
        record_id: &str,
        request: &UpdateRequest,
    ) -> Result<()> {
        tracing::debug!(
            domain,
            record_id,
            record = %request.name,
            ttl = request.ttl,
            "updating DigitalOcean record"
        );

        let url = format!(
            "{}/domains/{}/records/{}",
            DIGITALOCEAN_API_BASE, domain, record_id
        );

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.api_token)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| Error::provider("digitalocean", format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::response_error(
                &format!("updating record {} in domain '{}'", record_id, domain),
                response,
            )
            .await);
        }

        Ok(())
    }

    fn store_name(&self) -> &'static str {
        "digitalocean"
    }
}
