//! Command-line interface (CLI) argument parsing module.
//!
//! This module provides CLI argument parsing using `clap`.
//! It supports checking an IP, listing and exporting blacklist servers,
//! and generating shell completions.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// CLI argument parser using clap derive macro.
///
/// # Example
///
/// ```ignore
/// let cli = Cli::parse();
/// match cli.command {
///     Commands::Check { ip, .. } => { /* ... */ }
///     Commands::List { .. } => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Parser, Debug)]
#[command(
    name = "dnsblcheck",
    version,
    about = "Check IP addresses against DNS-based blacklists",
    long_about = "Looks up an IP address on DNSBL/RBL zones concurrently and reports \
                  where it is listed",
    infer_subcommands = true
)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (only errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format (default, human-readable)
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated)
    Tsv,
}

impl OutputFormat {
    /// Get all available output format names.
    #[must_use]
    pub fn names() -> &'static [&'static str] {
        &["table", "json", "csv", "tsv"]
    }

    /// Field separator for delimited formats.
    #[must_use]
    pub fn separator(self) -> Option<char> {
        match self {
            Self::Csv => Some(','),
            Self::Tsv => Some('\t'),
            Self::Table | Self::Json => None,
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            _ => Err(format!(
                "Unknown format: {}. Valid options are: {:?}",
                s,
                Self::names()
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
        }
    }
}

/// Available commands for the dnsblcheck CLI.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check an IP address against blacklists
    ///
    /// Exits with status 1 when the address is listed anywhere and 2 when
    /// the request itself was rejected (invalid IP, IPv6 disabled).
    #[command(alias = "c")]
    Check {
        /// IPv4 or IPv6 address, optionally with a /N suffix
        ip: String,

        /// Blacklist file (JSON format)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Custom blacklist zones (format: HOST#Name)
        #[arg(long = "host")]
        hosts: Vec<String>,

        /// Only query lists with tier at most N
        #[arg(long)]
        max_tier: Option<i64>,

        /// Per-query timeout in seconds (1-30)
        #[arg(short, long, default_value = "5", env = "DNSBL_TIMEOUT")]
        timeout: u64,

        /// Reject IPv6 addresses
        #[arg(long, env = "DNSBL_NO_IPV6")]
        no_ipv6: bool,

        /// Maximum concurrent queries (1-64)
        #[arg(short, long, default_value = "16", env = "DNSBL_CONCURRENCY")]
        concurrency: usize,

        /// Nameservers to query instead of the system resolver
        #[arg(long = "nameserver")]
        nameservers: Vec<IpAddr>,
    },

    /// List configured blacklist servers
    #[command(alias = "l")]
    List {
        /// Blacklist file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Only show lists with tier at most N
        #[arg(long)]
        max_tier: Option<i64>,
    },

    /// Export the built-in blacklist list
    ///
    /// Writes the list as JSON, ready to be edited and placed in the config
    /// directory as servers.json.
    #[command(alias = "e")]
    Export {
        /// Output file path
        #[arg(short, long, default_value = "servers.json")]
        output: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Parse CLI arguments and return verbose flag.
///
/// # Returns
///
/// Returns a tuple of `(Cli, verbose)` where `verbose` indicates
/// whether verbose logging was enabled.
#[must_use]
pub fn parse_verbose() -> (Cli, bool) {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    (cli, verbose)
}
