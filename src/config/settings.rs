//! Checker options.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;

/// Default per-query timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Allowed per-query timeout range in seconds.
pub const TIMEOUT_RANGE_SECS: (u64, u64) = (1, 30);

/// Default number of blacklist queries in flight at once.
pub const DEFAULT_MAX_CONCURRENCY: usize = 16;

/// Upper bound on queries in flight at once.
pub const MAX_CONCURRENCY_LIMIT: usize = 64;

/// Options for a [`Checker`](crate::Checker).
///
/// Out-of-range values are clamped by the builder methods and by
/// [`CheckerConfig::normalized`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Per-query timeout, 1..=30 seconds
    pub timeout_secs: u64,
    /// Whether IPv6 addresses may be checked
    pub ipv6_enabled: bool,
    /// Maximum concurrent queries, 1..=64
    pub max_concurrency: usize,
    /// Nameservers to query; empty means the system resolver
    pub nameservers: Vec<IpAddr>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            ipv6_enabled: true,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            nameservers: Vec::new(),
        }
    }
}

impl CheckerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-query timeout, clamped to 1..=30 seconds.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs.clamp(TIMEOUT_RANGE_SECS.0, TIMEOUT_RANGE_SECS.1);
        self
    }

    #[must_use]
    pub fn with_ipv6(mut self, enabled: bool) -> Self {
        self.ipv6_enabled = enabled;
        self
    }

    /// Set the concurrency cap, clamped to 1..=64.
    #[must_use]
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.clamp(1, MAX_CONCURRENCY_LIMIT);
        self
    }

    #[must_use]
    pub fn with_nameservers(mut self, nameservers: Vec<IpAddr>) -> Self {
        self.nameservers = nameservers;
        self
    }

    /// Return a copy with every value clamped into its valid range.
    ///
    /// Used for configs that bypassed the builder, e.g. deserialized ones.
    #[must_use]
    pub fn normalized(self) -> Self {
        let timeout = self.timeout_secs;
        let concurrency = self.max_concurrency;
        self.with_timeout_secs(timeout)
            .with_max_concurrency(concurrency)
    }

    /// Per-query timeout as a `Duration`.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
