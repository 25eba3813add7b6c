// # ipsync - one-shot dynamic DNS updater
//
// Thin integration layer over ipsync-core:
// 1. Parse and validate invocation parameters
// 2. Initialize tracing
// 3. Construct the HTTP IP source and the DigitalOcean record store
// 4. Run one synchronization pass and report the outcome
//
// All synchronization logic lives in ipsync-core; this binary only wires
// capabilities together and turns the structured outcome into logs and
// an exit code.
//
// ## Example
//
// ```bash
// export IPSYNC_API_TOKEN=dop_v1_...
// ipsync --domain example.com --record home
// ipsync --domain example.com --record home --type AAAA
// ```

use anyhow::Result;
use clap::Parser;
use ipsync_core::{RecordKey, SyncOutcome, SyncTarget, Synchronizer};
use ipsync_ip_http::{DEFAULT_LOOKUP_URL, HttpIpSource};
use ipsync_provider_digitalocean::DigitalOceanStore;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for the different termination scenarios
///
/// - 0: Record updated or already current
/// - 1: Configuration or startup error
/// - 2: Synchronization failure (lookup, listing, matching or update)
#[derive(Debug, Clone, Copy)]
enum IpsyncExitCode {
    /// Record updated or already current
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Synchronization failed
    SyncFailed = 2,
}

impl From<IpsyncExitCode> for ExitCode {
    fn from(code: IpsyncExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Keep a DNS record pointed at the caller's current public IP
#[derive(Debug, Parser)]
#[command(name = "ipsync", version, about)]
struct Cli {
    /// DigitalOcean API token
    #[arg(long, env = "IPSYNC_API_TOKEN", hide_env_values = true)]
    token: String,

    /// Domain the record belongs to (e.g. example.com)
    #[arg(long)]
    domain: String,

    /// DNS record name ("www", or "@" for the zone apex)
    #[arg(long)]
    record: String,

    /// DNS record type
    #[arg(long = "type", default_value = "A")]
    record_type: String,

    /// URL of a plain-text public IP endpoint
    #[arg(long, default_value = DEFAULT_LOOKUP_URL)]
    ip_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "IPSYNC_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Validate the invocation parameters before any network call
    fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            anyhow::bail!(
                "API token is required. Pass --token or set IPSYNC_API_TOKEN."
            );
        }

        // Catch obvious placeholder tokens (common mistake)
        let token_lower = self.token.to_lowercase();
        if token_lower.contains("your_token")
            || token_lower.contains("replace_me")
            || token_lower == "token"
        {
            anyhow::bail!(
                "API token appears to be a placeholder. \
                Use an actual token from your DNS provider."
            );
        }

        validate_domain_name(&self.domain)?;

        if self.record.is_empty() {
            anyhow::bail!("Record name cannot be empty. Use '@' for the zone apex.");
        }

        if !self.ip_url.starts_with("https://") && !self.ip_url.starts_with("http://") {
            anyhow::bail!("--ip-url must use an HTTP or HTTPS scheme. Got: {}", self.ip_url);
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => anyhow::bail!(
                "Log level '{}' is not valid. Valid levels: trace, debug, info, warn, error",
                other
            ),
        }

        Ok(())
    }

    fn max_level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }
}

/// Validate that a string is a plausible DNS domain name
///
/// Basic RFC 1035 checks; not comprehensive but catches the common
/// mistakes before a confusing provider error does.
fn validate_domain_name(domain: &str) -> Result<()> {
    if domain.is_empty() {
        anyhow::bail!("Domain name cannot be empty");
    }

    if domain.len() > 253 {
        anyhow::bail!(
            "Domain name too long: {} chars (max 253). Got: {}",
            domain.len(),
            domain
        );
    }

    for label in domain.split('.') {
        if label.is_empty() {
            anyhow::bail!("Domain name has empty label: '{}'", domain);
        }

        if label.len() > 63 {
            anyhow::bail!(
                "Domain label too long: {} chars (max 63). Label: '{}'",
                label.len(),
                label
            );
        }

        if !label.chars().all(|c| c.is_alphanumeric() || c == '-') {
            anyhow::bail!(
                "Domain label contains invalid characters. Label: '{}'. \
                Valid: alphanumeric and hyphen only.",
                label
            );
        }

        if label.starts_with('-') || label.ends_with('-') {
            anyhow::bail!(
                "Domain label cannot start or end with hyphen. Label: '{}'",
                label
            );
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = cli.validate() {
        eprintln!("Configuration error: {}", e);
        return IpsyncExitCode::ConfigError.into();
    }

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.max_level())
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return IpsyncExitCode::ConfigError.into();
    }

    // The record type defaults to "A" here at the caller layer; the
    // synchronizer always receives an explicit type.
    let record_type = match cli.record_type.parse() {
        Ok(ty) => ty,
        Err(e) => {
            error!("Invalid --type value: {}", e);
            return IpsyncExitCode::ConfigError.into();
        }
    };

    let store = match DigitalOceanStore::new(cli.token.clone()) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to construct record store: {}", e);
            return IpsyncExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return IpsyncExitCode::ConfigError.into();
        }
    };

    let target = SyncTarget::new(&cli.domain, RecordKey::new(&cli.record, record_type));
    let synchronizer = Synchronizer::new(
        Box::new(HttpIpSource::new(&cli.ip_url)),
        Box::new(store),
    );

    rt.block_on(async {
        match synchronizer.sync(&target).await {
            Ok(SyncOutcome::Updated { previous, current }) => {
                info!(
                    domain = %cli.domain,
                    record = %cli.record,
                    record_type = %record_type,
                    previous = %previous,
                    current = %current,
                    "DNS record updated"
                );
                IpsyncExitCode::Success.into()
            }
            Ok(SyncOutcome::AlreadyCurrent { current }) => {
                info!(
                    domain = %cli.domain,
                    record = %cli.record,
                    record_type = %record_type,
                    current = %current,
                    "DNS record already current, nothing to do"
                );
                IpsyncExitCode::Success.into()
            }
            Err(e) => {
                // Log the step-tagged failure with its full source chain
                error!(
                    domain = %cli.domain,
                    record = %cli.record,
                    record_type = %record_type,
                    error = %format_error_chain(&e),
                    "synchronization failed"
                );
                IpsyncExitCode::SyncFailed.into()
            }
        }
    })
}

/// Render an error and its source chain on one line
fn format_error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        out.push_str(": ");
        out.push_str(&cause.to_string());
        source = cause.source();
    }
    out
}
