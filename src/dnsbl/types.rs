//! DNSBL result types.
//!
//! This module provides the per-server query outcome, the aggregated
//! statistics and the top-level report returned by a check.

use crate::dnsbl::server::BlacklistServer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// IP address family of a checked address.
///
/// Serialized as the bare number `4` or `6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpVersion {
    V4,
    V6,
}

impl IpVersion {
    /// Numeric version tag.
    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Self::V4 => 4,
            Self::V6 => 6,
        }
    }
}

impl std::fmt::Display for IpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IPv{}", self.as_u8())
    }
}

impl Serialize for IpVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for IpVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            4 => Ok(Self::V4),
            6 => Ok(Self::V6),
            other => Err(serde::de::Error::custom(format!(
                "invalid IP version: {other}"
            ))),
        }
    }
}

/// Tri-state listing result for one blacklist.
///
/// Serialized as `true`, `false` or `"unknown"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// The query name exists: the IP is on the list.
    Listed,
    /// Authoritative negative answer (NXDOMAIN or no A record).
    NotListed,
    /// The query could not be completed or classified.
    Unknown,
}

impl Listing {
    #[must_use]
    pub fn is_listed(self) -> bool {
        matches!(self, Self::Listed)
    }

    #[must_use]
    pub fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for Listing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Listed => write!(f, "listed"),
            Self::NotListed => write!(f, "clean"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl Serialize for Listing {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Listed => serializer.serialize_bool(true),
            Self::NotListed => serializer.serialize_bool(false),
            Self::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for Listing {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Flag(true) => Ok(Self::Listed),
            Raw::Flag(false) => Ok(Self::NotListed),
            Raw::Text(s) if s.eq_ignore_ascii_case("unknown") => Ok(Self::Unknown),
            Raw::Text(s) => Err(serde::de::Error::custom(format!(
                "invalid listing value: {s}"
            ))),
        }
    }
}

/// Result of querying a single blacklist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryOutcome {
    pub name: String,
    pub host: String,
    pub tier: Option<i64>,
    pub priority: Option<String>,
    pub listed: Listing,
    /// Wall-clock latency of the lookup, rounded to 2 decimals
    pub response_time_ms: f64,
    /// Why the outcome is unknown, if it is
    pub error_message: Option<String>,
}

impl QueryOutcome {
    /// Create a classified outcome (listed or not listed).
    #[must_use]
    pub fn classified(server: &BlacklistServer, listed: bool, response_time_ms: f64) -> Self {
        Self::build(
            server,
            if listed {
                Listing::Listed
            } else {
                Listing::NotListed
            },
            response_time_ms,
            None,
        )
    }

    /// Create an unknown outcome carrying the failure reason.
    pub fn unknown(
        server: &BlacklistServer,
        response_time_ms: f64,
        error: impl Into<String>,
    ) -> Self {
        Self::build(server, Listing::Unknown, response_time_ms, Some(error.into()))
    }

    fn build(
        server: &BlacklistServer,
        listed: Listing,
        response_time_ms: f64,
        error_message: Option<String>,
    ) -> Self {
        Self {
            name: server.name.clone(),
            host: server.host.clone(),
            tier: server.tier,
            priority: server.priority.clone(),
            listed,
            response_time_ms: round_to(response_time_ms, 2),
            error_message,
        }
    }
}

/// Aggregated statistics over all outcomes of one check.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Stats {
    pub total_servers: usize,
    pub listed_count: usize,
    pub clean_count: usize,
    pub unknown_count: usize,
    /// Wall-clock time of the whole batch
    pub total_time_ms: f64,
    pub avg_response_time_ms: f64,
    /// Share of listed servers in percent, one decimal
    pub listing_percentage: f64,
}

impl Stats {
    /// Aggregate statistics from outcomes and the batch wall-clock time.
    #[must_use]
    pub fn from_outcomes(outcomes: &[QueryOutcome], total_time_ms: f64) -> Self {
        let mut stats = Self {
            total_servers: outcomes.len(),
            total_time_ms: round_to(total_time_ms, 2),
            ..Self::default()
        };

        let mut latency_sum = 0.0;
        for outcome in outcomes {
            match outcome.listed {
                Listing::Listed => stats.listed_count += 1,
                Listing::NotListed => stats.clean_count += 1,
                Listing::Unknown => stats.unknown_count += 1,
            }
            latency_sum += outcome.response_time_ms;
        }

        if stats.total_servers > 0 {
            let total = stats.total_servers as f64;
            stats.avg_response_time_ms = round_to(latency_sum / total, 2);
            stats.listing_percentage = round_to(stats.listed_count as f64 / total * 100.0, 1);
        }

        stats
    }

    /// Human-readable one-line summary.
    #[must_use]
    pub fn summary_message(&self) -> String {
        if self.listed_count == 0 {
            format!(
                "IP is clean - not listed on any of {} DNSBL servers",
                self.total_servers
            )
        } else {
            format!(
                "IP is listed on {} out of {} DNSBL servers ({}%)",
                self.listed_count, self.total_servers, self.listing_percentage
            )
        }
    }
}

/// Top-level result of a blacklist check.
///
/// A failed request has `success == false`, no `data` and no `stats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckReport {
    pub success: bool,
    pub message: String,
    /// Canonical form of the checked address, when it could be parsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    pub data: Option<Vec<QueryOutcome>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Stats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_version: Option<IpVersion>,
    pub checked_at: DateTime<Utc>,
}

impl CheckReport {
    /// Create a failed report.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ip: None,
            data: None,
            stats: None,
            ip_version: None,
            checked_at: Utc::now(),
        }
    }

    /// Create a successful report from outcomes.
    #[must_use]
    pub fn completed(
        ip: String,
        version: IpVersion,
        outcomes: Vec<QueryOutcome>,
        stats: Stats,
        message: String,
    ) -> Self {
        Self {
            success: true,
            message,
            ip: Some(ip),
            data: Some(outcomes),
            stats: Some(stats),
            ip_version: Some(version),
            checked_at: Utc::now(),
        }
    }

    /// Outcomes of the check, empty for a failed report.
    #[must_use]
    pub fn outcomes(&self) -> &[QueryOutcome] {
        self.data.as_deref().unwrap_or_default()
    }

    /// Whether the IP is listed on at least one blacklist.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        self.stats.as_ref().is_some_and(|s| s.listed_count > 0)
    }
}

/// Round `value` to `decimals` places.
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(host: &str) -> BlacklistServer {
        BlacklistServer::new(host, host)
    }

    #[test]
    fn test_listing_serialization() {
        assert_eq!(serde_json::to_string(&Listing::Listed).unwrap(), "true");
        assert_eq!(serde_json::to_string(&Listing::NotListed).unwrap(), "false");
        assert_eq!(serde_json::to_string(&Listing::Unknown).unwrap(), "\"unknown\"");

        let parsed: Listing = serde_json::from_str("\"Unknown\"").unwrap();
        assert_eq!(parsed, Listing::Unknown);
        assert!(serde_json::from_str::<Listing>("\"maybe\"").is_err());
    }

    #[test]
    fn test_ip_version_serialization() {
        assert_eq!(serde_json::to_string(&IpVersion::V4).unwrap(), "4");
        assert_eq!(serde_json::to_string(&IpVersion::V6).unwrap(), "6");
        assert_eq!(serde_json::from_str::<IpVersion>("6").unwrap(), IpVersion::V6);
        assert!(serde_json::from_str::<IpVersion>("5").is_err());
    }

    #[test]
    fn test_outcome_rounds_latency() {
        let outcome = QueryOutcome::classified(&server("a.example.com"), true, 12.3456);
        assert_eq!(outcome.response_time_ms, 12.35);
        assert_eq!(outcome.listed, Listing::Listed);
        assert!(outcome.error_message.is_none());

        let unknown = QueryOutcome::unknown(&server("b.example.com"), 1.0, "timeout");
        assert_eq!(unknown.listed, Listing::Unknown);
        assert_eq!(unknown.error_message.as_deref(), Some("timeout"));
    }

    #[test]
    fn test_stats_aggregation() {
        let s = server("a.example.com");
        let outcomes = vec![
            QueryOutcome::classified(&s, true, 10.0),
            QueryOutcome::classified(&s, false, 20.0),
            QueryOutcome::classified(&s, false, 30.0),
            QueryOutcome::unknown(&s, 40.0, "boom"),
        ];

        let stats = Stats::from_outcomes(&outcomes, 55.556);
        assert_eq!(stats.total_servers, 4);
        assert_eq!(stats.listed_count, 1);
        assert_eq!(stats.clean_count, 2);
        assert_eq!(stats.unknown_count, 1);
        assert_eq!(
            stats.listed_count + stats.clean_count + stats.unknown_count,
            stats.total_servers
        );
        assert_eq!(stats.avg_response_time_ms, 25.0);
        assert_eq!(stats.listing_percentage, 25.0);
        assert_eq!(stats.total_time_ms, 55.56);
        assert_eq!(
            stats.summary_message(),
            "IP is listed on 1 out of 4 DNSBL servers (25%)"
        );
    }

    #[test]
    fn test_stats_percentage_rounding() {
        let s = server("a.example.com");
        let outcomes = vec![
            QueryOutcome::classified(&s, true, 1.0),
            QueryOutcome::classified(&s, false, 1.0),
            QueryOutcome::classified(&s, false, 1.0),
        ];
        let stats = Stats::from_outcomes(&outcomes, 3.0);
        assert_eq!(stats.listing_percentage, 33.3);
        assert_eq!(
            stats.summary_message(),
            "IP is listed on 1 out of 3 DNSBL servers (33.3%)"
        );
    }

    #[test]
    fn test_stats_empty() {
        let stats = Stats::from_outcomes(&[], 0.0);
        assert_eq!(stats.total_servers, 0);
        assert_eq!(stats.listing_percentage, 0.0);
        assert_eq!(stats.avg_response_time_ms, 0.0);
        assert_eq!(
            stats.summary_message(),
            "IP is clean - not listed on any of 0 DNSBL servers"
        );
    }

    #[test]
    fn test_failure_report_shape() {
        let report = CheckReport::failure("Invalid IP address");
        assert!(!report.success);
        assert!(report.data.is_none());
        assert!(report.stats.is_none());
        assert!(report.outcomes().is_empty());
        assert!(!report.is_listed());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid IP address");
        assert!(json["data"].is_null());
        assert!(json.get("stats").is_none());
    }
}
