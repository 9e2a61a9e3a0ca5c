//! DNSBL query engine.
//!
//! A check normalizes the address once, then queries every configured
//! blacklist concurrently and joins the answers back in list order. A
//! failing blacklist only ever affects its own entry in the report.

use crate::config::CheckerConfig;
use crate::dnsbl::normalize::{normalize, query_name};
use crate::dnsbl::resolver::{BlacklistResolver, DnsResolver, RecordType};
use crate::dnsbl::server::{is_valid_hostname, BlacklistServer};
use crate::dnsbl::types::{CheckReport, IpVersion, QueryOutcome, Stats};
use crate::error::{Error, Result};
use futures::stream::{self, StreamExt};
use std::time::Instant;
use tokio::time::timeout;

/// Message of a successful report when no blacklists are configured.
pub const NO_SERVERS_MESSAGE: &str = "No DNSBL servers configured";

/// Checks IP addresses against a fixed set of blacklists.
///
/// # Example
///
/// ```ignore
/// let checker = Checker::from_config(ConfigLoader::builtin().servers, CheckerConfig::default())?;
/// let report = checker.check("192.0.2.1").await;
/// println!("{}", report.message);
/// ```
pub struct Checker<R = DnsResolver> {
    servers: Vec<BlacklistServer>,
    config: CheckerConfig,
    resolver: R,
}

impl Checker<DnsResolver> {
    /// Create a checker backed by a real DNS resolver.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolver cannot be initialized.
    pub fn from_config(servers: Vec<BlacklistServer>, config: CheckerConfig) -> Result<Self> {
        let config = config.normalized();
        let resolver = DnsResolver::new(&config.nameservers, config.timeout())?;
        Ok(Self::new(servers, config, resolver))
    }
}

impl<R: BlacklistResolver> Checker<R> {
    /// Create a checker with an explicit resolver.
    pub fn new(servers: Vec<BlacklistServer>, config: CheckerConfig, resolver: R) -> Self {
        Self {
            servers,
            config: config.normalized(),
            resolver,
        }
    }

    #[must_use]
    pub fn servers(&self) -> &[BlacklistServer] {
        &self.servers
    }

    #[must_use]
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// Check `ip` against the configured blacklists.
    pub async fn check(&self, ip: &str) -> CheckReport {
        self.check_with(ip, &self.servers).await
    }

    /// Check `ip` against an explicit list of blacklists.
    ///
    /// Never fails: invalid input yields a report with `success == false`,
    /// and lookup failures are reported per server as unknown.
    pub async fn check_with(&self, ip: &str, servers: &[BlacklistServer]) -> CheckReport {
        let normalized = match normalize(ip) {
            Ok(n) => n,
            Err(e) => {
                tracing::debug!("Rejected input {ip:?}: {e}");
                return CheckReport::failure(e.to_string());
            }
        };

        if normalized.version == IpVersion::V6 && !self.config.ipv6_enabled {
            return CheckReport::failure(Error::Ipv6Disabled.to_string());
        }

        if servers.is_empty() {
            return CheckReport::completed(
                normalized.canonical,
                normalized.version,
                Vec::new(),
                Stats::default(),
                NO_SERVERS_MESSAGE.to_string(),
            );
        }

        let label = normalized.reverse_label();
        let concurrency = self.config.max_concurrency.min(servers.len());
        let started = Instant::now();

        // `buffered` yields in submission order, so outcomes line up with `servers`
        let outcomes: Vec<QueryOutcome> = stream::iter(servers)
            .map(|server| self.query(server, &label))
            .buffered(concurrency)
            .collect()
            .await;

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        let stats = Stats::from_outcomes(&outcomes, elapsed_ms);
        let message = stats.summary_message();

        tracing::info!(
            "{} checked against {} DNSBLs in {:.2} ms: {} listed, {} clean, {} unknown",
            normalized.canonical,
            stats.total_servers,
            stats.total_time_ms,
            stats.listed_count,
            stats.clean_count,
            stats.unknown_count
        );

        CheckReport::completed(
            normalized.canonical,
            normalized.version,
            outcomes,
            stats,
            message,
        )
    }

    /// Query one blacklist and classify the answer.
    async fn query(&self, server: &BlacklistServer, label: &str) -> QueryOutcome {
        if !is_valid_hostname(&server.host) {
            return QueryOutcome::unknown(server, 0.0, format!("Invalid DNSBL host: {}", server.host));
        }

        let name = query_name(label, &server.host);
        let limit = self.config.timeout();
        let start = Instant::now();

        let result = timeout(limit, self.resolver.exists(&name, RecordType::A)).await;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        match result {
            Ok(Ok(listed)) => {
                tracing::debug!("{name}: {}", if listed { "listed" } else { "not listed" });
                QueryOutcome::classified(server, listed, elapsed_ms)
            }
            Ok(Err(Error::Timeout)) | Err(_) => {
                tracing::warn!("{name}: timed out");
                QueryOutcome::unknown(
                    server,
                    elapsed_ms,
                    format!("DNS query timed out after {}s", limit.as_secs()),
                )
            }
            Ok(Err(e)) => {
                tracing::warn!("{name}: {e}");
                QueryOutcome::unknown(server, elapsed_ms, e.to_string())
            }
        }
    }
}
