// # HTTP IP Source
//
// This crate provides the HTTP-based public IP source for ipsync.
//
// ## Transport contract
//
// A GET against a plain-text IP-detection endpoint (e.g. ifconfig.co,
// api.ipify.org) is expected to answer `200 OK` with a body containing
// only the textual IP address, optionally followed by a single trailing
// newline, which is stripped. Any other status code is a failure.
//
// One outbound request per `current()` call; no retries, no caching.

use ipsync_core::traits::IpSource;
use ipsync_core::{Error, Result};

use std::net::IpAddr;
use std::time::Duration;

/// Default IP-detection endpoint
pub const DEFAULT_LOOKUP_URL: &str = "https://ifconfig.co/ip";

/// Alternative plain-text endpoints known to honor the same contract
pub const KNOWN_LOOKUP_URLS: &[&str] = &[
    "https://ifconfig.co/ip",
    "https://api.ipify.org",
    "https://icanhazip.com",
];

/// Request timeout for the lookup call
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-based public IP source
pub struct HttpIpSource {
    /// URL to fetch the IP from
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source against `url`
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::builder()
                .timeout(DEFAULT_HTTP_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    /// The endpoint this source queries
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpIpSource {
    fn default() -> Self {
        Self::new(DEFAULT_LOOKUP_URL)
    }
}

/// Strip the transport-added line terminator and reject bodies that are
/// not a bare IP address
fn normalize_body(body: &str) -> Result<String> {
    let text = body.trim();
    if text.is_empty() {
        return Err(Error::ip_source("IP endpoint returned an empty body"));
    }

    // The endpoint contract is a bare textual address; anything else
    // (HTML error pages, multi-line output) is rejected here rather than
    // written into a DNS record later.
    text.parse::<IpAddr>()
        .map_err(|_| Error::ip_source(format!("IP endpoint returned a non-IP body: '{}'", text)))?;

    Ok(text.to_string())
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<String> {
        tracing::debug!(url = %self.url, "fetching public IP");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::ip_source(format!("request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ip_source(format!(
                "IP lookup failed: {} responded {}",
                self.url, status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::ip_source(format!("failed to read response body: {}", e)))?;

        normalize_body(&body)
    }
}
