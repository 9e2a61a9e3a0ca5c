//! DNS resolution backend for blacklist queries.
//!
//! The checker only needs to know whether a name exists. That capability is
//! the [`BlacklistResolver`] trait; [`DnsResolver`] implements it on top of
//! the trust-dns async resolver.

#![allow(clippy::missing_errors_doc)]

use crate::error::{Error, Result};
use std::future::Future;
use std::net::IpAddr;
use std::time::Duration;
use trust_dns_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};
use trust_dns_resolver::proto::op::ResponseCode;
use trust_dns_resolver::TokioAsyncResolver;

pub use trust_dns_resolver::proto::rr::RecordType;

/// DNS existence check used by the checker.
///
/// `Ok(true)` means at least one record of `record_type` exists for `name`,
/// `Ok(false)` is an authoritative negative answer, and `Err` is anything
/// that prevented an answer (timeout, SERVFAIL, network failure).
pub trait BlacklistResolver: Send + Sync {
    fn exists(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> impl Future<Output = Result<bool>> + Send;
}

/// Resolver backed by `trust-dns-resolver`.
///
/// Configured for single-attempt queries: a failed lookup is reported, not
/// retried.
///
/// # Example
///
/// ```ignore
/// let resolver = DnsResolver::from_system_conf(Duration::from_secs(5))?;
/// let listed = resolver.exists("2.0.0.127.zen.spamhaus.org.", RecordType::A).await?;
/// ```
#[derive(Clone)]
pub struct DnsResolver {
    resolver: TokioAsyncResolver,
}

impl DnsResolver {
    /// Create a resolver from the system configuration (`/etc/resolv.conf`
    /// on Unix), falling back to Google Public DNS if it cannot be read.
    pub fn from_system_conf(timeout: Duration) -> Result<Self> {
        let (config, opts) = match trust_dns_resolver::system_conf::read_system_conf() {
            Ok(conf) => conf,
            Err(e) => {
                tracing::warn!("Failed to read system DNS configuration, using defaults: {e}");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };
        Self::build(config, opts, timeout)
    }

    /// Create a resolver that queries the given nameservers on port 53.
    pub fn with_nameservers(nameservers: &[IpAddr], timeout: Duration) -> Result<Self> {
        if nameservers.is_empty() {
            return Err(Error::config("At least one nameserver is required"));
        }
        let config = ResolverConfig::from_parts(
            None,
            vec![],
            NameServerConfigGroup::from_ips_clear(nameservers, 53, true),
        );
        Self::build(config, ResolverOpts::default(), timeout)
    }

    /// Create a resolver for the given nameservers, or the system resolver
    /// when the list is empty.
    pub fn new(nameservers: &[IpAddr], timeout: Duration) -> Result<Self> {
        if nameservers.is_empty() {
            Self::from_system_conf(timeout)
        } else {
            Self::with_nameservers(nameservers, timeout)
        }
    }

    fn build(config: ResolverConfig, mut opts: ResolverOpts, timeout: Duration) -> Result<Self> {
        opts.timeout = timeout;
        opts.attempts = 1;
        let resolver = TokioAsyncResolver::tokio(config, opts).map_err(Error::Resolver)?;
        Ok(Self { resolver })
    }
}

impl BlacklistResolver for DnsResolver {
    async fn exists(&self, name: &str, record_type: RecordType) -> Result<bool> {
        match self.resolver.lookup(name, record_type).await {
            Ok(lookup) => Ok(lookup.iter().next().is_some()),
            Err(e) => classify_error(e),
        }
    }
}

/// Map a failed lookup to a listing answer.
///
/// NXDOMAIN and NOERROR without records are authoritative negatives. Any
/// other response code, and every transport failure, is an error.
fn classify_error(err: ResolveError) -> Result<bool> {
    match err.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. }
            if matches!(response_code, ResponseCode::NXDomain | ResponseCode::NoError) =>
        {
            Ok(false)
        }
        ResolveErrorKind::Timeout => Err(Error::Timeout),
        _ => Err(Error::Resolver(err)),
    }
}
