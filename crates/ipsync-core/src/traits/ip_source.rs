// # IP Source Trait
//
// Defines the interface for detecting the caller's current public IP.
//
// ## Implementations
//
// - HTTP-based: `ipsync-ip-http` crate (GET against a plain-text endpoint)
// - Future: STUN, router/UPnP queries, interface inspection
//
// ## Usage
//
// ```rust,ignore
// use ipsync_core::IpSource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* IpSource implementation */;
//     let ip = source.current().await?;
//     println!("public IP: {ip}");
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// Trait for IP source implementations
///
/// An IP source answers a single question: what is the caller's current
/// public-facing IP address? The answer is produced fresh on every call;
/// the synchronizer never caches it across runs.
///
/// Implementations must be thread-safe and usable across async tasks.
///
/// # Responsibilities
///
/// IP sources are observers, not decision-makers:
/// - They perform exactly one outbound request per `current()` call
/// - They do not retry internally (a failed attempt is a failed call)
/// - They never touch DNS records (that is the `RecordStore`'s job)
/// - They never decide whether an update is needed (the synchronizer does)
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Get the current public IP address as text
    ///
    /// The returned string is a bare IPv4/IPv6 address with no trailing
    /// newline or surrounding whitespace; implementations are responsible
    /// for stripping any transport-added line terminator.
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The current public IP address
    /// - `Err(Error)`: If the transport failed or the endpoint responded
    ///   with a non-success status. The error carries enough context
    ///   (status code/text) to be logged usefully.
    async fn current(&self) -> Result<String, crate::Error>;
}
