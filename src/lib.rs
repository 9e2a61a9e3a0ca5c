//! dnsblcheck - Check IP addresses against DNS-based blacklists.
//!
//! This crate provides both a library API and a CLI tool for:
//! - Looking up an IPv4 or IPv6 address on many DNSBL/RBL zones at once
//! - Classifying each answer as listed, not listed or unknown
//! - Aggregating the answers into a report with timing statistics
//! - Multiple output formats (table, JSON, CSV, TSV)
//!
//! # Library Usage
//!
//! ```ignore
//! use dnsblcheck::{Checker, CheckerConfig, ConfigLoader};
//!
//! let servers = ConfigLoader::builtin().servers;
//! let checker = Checker::from_config(servers, CheckerConfig::default())?;
//! let report = checker.check("192.0.2.1").await;
//! println!("{}", report.message);
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Check against the default lists
//! dnsblcheck check 192.0.2.1
//!
//! # Only the most trusted lists, JSON output
//! dnsblcheck --format json check 192.0.2.1 --max-tier 1
//!
//! # Ad-hoc lists
//! dnsblcheck check 192.0.2.1 --host zen.spamhaus.org#Spamhaus
//!
//! # Show and export the configured lists
//! dnsblcheck list
//! dnsblcheck export --output servers.json
//! ```

pub mod cli;
pub mod config;
pub mod dnsbl;
pub mod error;

// Re-export commonly used types
pub use cli::{Cli, Commands, OutputFormat};
pub use config::{BlacklistList, CheckerConfig, ConfigLoader};
pub use dnsbl::types::{CheckReport, IpVersion, Listing, QueryOutcome, Stats};
pub use dnsbl::{BlacklistResolver, BlacklistServer, Checker, DnsResolver};
pub use error::{Error, Result};
