//! Blacklist list configuration loader.
//!
//! This module loads DNSBL server lists from JSON files, command-line
//! arguments or the built-in defaults. Every source goes through the same
//! sanitation: malformed entries are dropped, never reported as errors.

use crate::config::defaults::builtin_servers;
use crate::dnsbl::{is_valid_hostname, sanitize_servers, BlacklistServer};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// File name of the user blacklist list inside the config directory.
const SERVERS_FILE: &str = "servers.json";

/// Blacklist server list container.
///
/// On disk this is `{"servers": [{"name": ..., "host": ..., "tier": ...,
/// "priority": ...}, ...]}`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct BlacklistList {
    pub servers: Vec<BlacklistServer>,
}

impl BlacklistList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_servers(servers: Vec<BlacklistServer>) -> Self {
        Self { servers }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

/// Raw file layout before sanitation.
#[derive(Debug, Deserialize)]
struct RawList {
    #[serde(default)]
    servers: Option<Vec<Value>>,
}

/// Blacklist list configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a blacklist list from a JSON file.
    ///
    /// A file without a `servers` key (or with `"servers": null`) yields an
    /// empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let list = ConfigLoader::load_from_file("servers.json")?;
    /// for server in &list.servers {
    ///     println!("{}: {}", server.name, server.host);
    /// }
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<BlacklistList> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse a blacklist list from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON.
    pub fn parse(content: &str) -> Result<BlacklistList> {
        let raw: RawList = serde_json::from_str(content)?;
        let entries = raw.servers.unwrap_or_default();
        Ok(BlacklistList::from_servers(sanitize_servers(&entries)))
    }

    /// Load the default blacklist list.
    ///
    /// Uses `$CONFIG_DIR/dnsblcheck/servers.json` when it exists and parses,
    /// otherwise the built-in list. Never fails.
    #[must_use]
    pub fn load_default() -> BlacklistList {
        let path = Self::config_dir().join(SERVERS_FILE);
        if path.exists() {
            match Self::load_from_file(&path) {
                Ok(list) => {
                    tracing::debug!("Loaded {} DNSBL servers from {}", list.len(), path.display());
                    return list;
                }
                Err(e) => {
                    tracing::warn!("Ignoring {}: {e}", path.display());
                }
            }
        }
        Self::builtin()
    }

    /// The built-in blacklist list.
    #[must_use]
    pub fn builtin() -> BlacklistList {
        BlacklistList::from_servers(builtin_servers())
    }

    /// Get the config directory path.
    #[must_use]
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dnsblcheck")
    }

    /// Create a blacklist list from command-line arguments.
    ///
    /// Each argument is `host` or `host#Name`.
    ///
    /// # Errors
    ///
    /// Returns an error if any host is not a valid hostname. Unlike config
    /// files, arguments were typed by the user, so they are not skipped
    /// silently.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let args = vec!["zen.spamhaus.org#Spamhaus".to_string()];
    /// let list = ConfigLoader::from_args(args)?;
    /// ```
    pub fn from_args(hosts: Vec<String>) -> Result<BlacklistList> {
        let mut servers = Vec::new();
        for s in hosts {
            let (host, name) = match s.split_once('#') {
                Some((host, name)) => (host.trim(), name.trim()),
                None => (s.trim(), ""),
            };

            if !is_valid_hostname(host) {
                return Err(Error::parse(format!("Invalid DNSBL host: {host}")));
            }

            let name = if name.is_empty() { host } else { name };
            servers.push(BlacklistServer::new(name, host));
        }
        Ok(BlacklistList::from_servers(servers))
    }

    /// Keep servers whose tier is at most `max_tier`.
    ///
    /// Servers without a tier are kept.
    #[must_use]
    pub fn filter_tier(list: BlacklistList, max_tier: i64) -> BlacklistList {
        BlacklistList::from_servers(
            list.servers
                .into_iter()
                .filter(|s| s.tier.map_or(true, |t| t <= max_tier))
                .collect(),
        )
    }
}
