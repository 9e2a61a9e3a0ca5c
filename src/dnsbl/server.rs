//! Blacklist server descriptors and configuration sanitation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Maximum length of a DNS hostname in presentation form.
const MAX_HOSTNAME_LEN: usize = 253;

/// Maximum length of a single DNS label.
const MAX_LABEL_LEN: usize = 63;

/// A single DNS-based blacklist.
///
/// `tier` and `priority` are reporting metadata only; they never influence
/// how the list is queried.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlacklistServer {
    /// Display name (e.g., "Spamhaus ZEN")
    pub name: String,
    /// DNSBL zone queried under, e.g. `zen.spamhaus.org`
    pub host: String,
    /// Trust tier, 1 being the most reputable
    #[serde(default)]
    pub tier: Option<i64>,
    /// Free-form priority label ("critical", "important", ...)
    #[serde(default)]
    pub priority: Option<String>,
}

impl BlacklistServer {
    /// Create a new blacklist server without tier or priority.
    ///
    /// ```ignore
    /// let server = BlacklistServer::new("SpamCop", "bl.spamcop.net");
    /// ```
    pub fn new(name: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            tier: None,
            priority: None,
        }
    }

    /// Set the tier.
    #[must_use]
    pub fn with_tier(mut self, tier: i64) -> Self {
        self.tier = Some(tier);
        self
    }

    /// Set the priority label.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Build a server from a loosely-typed config entry.
    ///
    /// Returns `None` when the entry has no usable `host`. Malformed `tier`
    /// and `priority` values are coerced or dropped rather than rejected.
    #[must_use]
    pub fn from_value(entry: &Value) -> Option<Self> {
        let host = entry.get("host")?.as_str()?.trim();
        if !is_valid_hostname(host) {
            return None;
        }

        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(host);

        Some(Self {
            name: name.to_string(),
            host: host.to_string(),
            tier: entry.get("tier").and_then(coerce_tier),
            priority: entry.get("priority").and_then(coerce_priority),
        })
    }
}

/// Sanitize raw configuration entries into usable servers.
///
/// Entries without a non-empty string `host`, or whose host is not a valid
/// hostname, are dropped. This never fails; dropped entries are logged.
#[must_use]
pub fn sanitize_servers(entries: &[Value]) -> Vec<BlacklistServer> {
    entries
        .iter()
        .filter_map(|entry| {
            let server = BlacklistServer::from_value(entry);
            if server.is_none() {
                tracing::warn!("Dropping invalid DNSBL entry: {entry}");
            }
            server
        })
        .collect()
}

/// Check hostname syntax.
///
/// The host must be at most 253 characters, must not start or end with a
/// dot, and every label must be 1-63 characters of ASCII letters, digits and
/// hyphens, not starting or ending with a hyphen.
#[must_use]
pub fn is_valid_hostname(host: &str) -> bool {
    if host.is_empty() || host.len() > MAX_HOSTNAME_LEN {
        return false;
    }
    if host.starts_with('.') || host.ends_with('.') {
        return false;
    }

    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}

fn coerce_tier(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_priority(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_hostnames() {
        assert!(is_valid_hostname("zen.spamhaus.org"));
        assert!(is_valid_hostname("dnsbl-1.uceprotect.net"));
        assert!(is_valid_hostname("localhost"));
        assert!(is_valid_hostname("this-should-not-exist-12345.invalid"));
    }

    #[test]
    fn test_invalid_hostnames() {
        assert!(!is_valid_hostname(""));
        assert!(!is_valid_hostname(".spamhaus.org"));
        assert!(!is_valid_hostname("zen.spamhaus.org."));
        assert!(!is_valid_hostname("zen..spamhaus.org"));
        assert!(!is_valid_hostname("-bad.example.com"));
        assert!(!is_valid_hostname("bad-.example.com"));
        assert!(!is_valid_hostname("bad host.example.com"));
        assert!(!is_valid_hostname("under_score.example.com"));
        assert!(!is_valid_hostname(&format!("{}.com", "a".repeat(64))));

        let long = vec!["abcdefghi"; 26].join(".");
        assert!(long.len() > MAX_HOSTNAME_LEN);
        assert!(!is_valid_hostname(&long));
    }

    #[test]
    fn test_sanitize_drops_malformed_entries() {
        let entries = vec![
            json!({"name": "Valid Server", "host": "valid.example.com"}),
            json!({"host": "missing-name.example.com"}),
            json!({"name": "Missing Host"}),
            json!({}),
            json!({"name": "Empty", "host": ""}),
            json!({"name": "Number", "host": 42}),
            json!({"name": "Bad", "host": "bad..example.com"}),
        ];

        let servers = sanitize_servers(&entries);
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0].name, "Valid Server");
        assert_eq!(servers[1].name, "missing-name.example.com");
        assert_eq!(servers[1].host, "missing-name.example.com");
    }

    #[test]
    fn test_sanitize_coerces_metadata() {
        let entries = vec![
            json!({"name": "A", "host": "a.example.com", "tier": 1, "priority": "critical"}),
            json!({"name": "B", "host": "b.example.com", "tier": "2", "priority": 3}),
            json!({"name": "C", "host": "c.example.com", "tier": "high", "priority": ["x"]}),
            json!({"name": "D", "host": "d.example.com", "tier": 1.5, "priority": null}),
        ];

        let servers = sanitize_servers(&entries);
        assert_eq!(servers.len(), 4);
        assert_eq!(servers[0].tier, Some(1));
        assert_eq!(servers[0].priority.as_deref(), Some("critical"));
        assert_eq!(servers[1].tier, Some(2));
        assert_eq!(servers[1].priority.as_deref(), Some("3"));
        assert_eq!(servers[2].tier, None);
        assert_eq!(servers[2].priority, None);
        assert_eq!(servers[3].tier, None);
        assert_eq!(servers[3].priority, None);
    }

    #[test]
    fn test_builder_methods() {
        let server = BlacklistServer::new("SpamCop", "bl.spamcop.net")
            .with_tier(1)
            .with_priority("critical");
        assert_eq!(server.tier, Some(1));
        assert_eq!(server.priority.as_deref(), Some("critical"));
    }
}
