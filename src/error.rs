//! Error types module.
//!
//! This module defines the error types used throughout dnsblcheck.
//! It uses `thiserror` for structured error handling and provides
//! a custom `Result` type alias for convenience.
//!
//! Note that a blacklist check itself never returns an error: bad input is
//! reported through [`CheckReport`](crate::CheckReport) and per-server DNS
//! failures become [`Listing::Unknown`](crate::Listing::Unknown). These
//! errors cover setup work such as building a resolver or reading config.

use thiserror::Error;

/// A specialized `Result` type for dnsblcheck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for dnsblcheck.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (config files, output files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error (configuration files, JSON output)
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// DNS resolver error (resolver setup or query failures)
    #[error("DNS resolver error: {0}")]
    Resolver(#[from] trust_dns_resolver::error::ResolveError),

    /// Configuration error (invalid config, missing files)
    #[error("Config error: {0}")]
    Config(String),

    /// Parse error (invalid input format, malformed data)
    #[error("Parse error: {0}")]
    Parse(String),

    /// The input could not be normalized into an IPv4 or IPv6 address.
    ///
    /// The display text is the exact message placed in failed reports.
    #[error("Invalid IP address")]
    InvalidIp(String),

    /// An IPv6 address was given while IPv6 lookups are disabled.
    #[error("IPv6 addresses are not supported in current configuration")]
    Ipv6Disabled,

    /// Operation timed out
    #[error("Operation timed out")]
    Timeout,
}

impl Error {
    /// Create a new configuration error with a message.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new parse error with a message.
    #[must_use]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create an invalid IP error, keeping the rejected input for logging.
    #[must_use]
    pub fn invalid_ip(input: impl Into<String>) -> Self {
        Self::InvalidIp(input.into())
    }
}

impl From<color_eyre::Report> for Error {
    fn from(e: color_eyre::Report) -> Self {
        Self::Config(e.to_string())
    }
}
