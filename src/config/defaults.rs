//! Built-in blacklist list.
//!
//! Tier 1 lists are the most trusted and widely used by large mail
//! providers, tier 2 are reputable specialized lists, tier 3 are
//! supplementary or regional lists that can be more aggressive.
//! Some providers (Spamhaus, CBL) throttle or require registration for
//! high-volume use.

use crate::dnsbl::BlacklistServer;

/// `(name, host, tier, priority)` of every built-in blacklist.
const BUILTIN_SERVERS: &[(&str, &str, i64, &str)] = &[
    // Tier 1
    ("SpamCop Blocking List", "bl.spamcop.net", 1, "critical"),
    ("Barracuda Reputation Block List", "b.barracudacentral.org", 1, "critical"),
    ("UCEPROTECT Level 1", "dnsbl-1.uceprotect.net", 1, "critical"),
    // Tier 2
    ("DroneB Anti-Abuse", "dnsbl.dronebl.org", 2, "important"),
    ("Backscatterer IPS", "ips.backscatterer.org", 2, "important"),
    ("Blocklist.de", "bl.blocklist.de", 2, "important"),
    ("Mailspike Z", "z.mailspike.net", 2, "important"),
    ("Spamhaus ZEN", "zen.spamhaus.org", 2, "important"),
    ("Composite Blocking List (CBL)", "cbl.abuseat.org", 2, "important"),
    ("Mailspike BL", "bl.mailspike.net", 2, "important"),
    // Tier 3
    ("Policy Block List (PSBL)", "psbl.surriel.com", 3, "supplementary"),
    ("WPBL Write Protect Block List", "db.wpbl.info", 3, "supplementary"),
    ("Spamsources Fabel", "spamsources.fabel.dk", 3, "supplementary"),
    ("Korea Services", "korea.services.net", 3, "supplementary"),
    ("Cymru Bogons", "bogons.cymru.com", 3, "supplementary"),
    ("EFnet RBL", "rbl.efnetrbl.org", 3, "supplementary"),
    ("Tornevall DNSBL", "dnsbl.tornevall.org", 3, "supplementary"),
    ("SPFBL DNSBL", "dnsbl.spfbl.net", 3, "supplementary"),
    ("InterServer RBL", "rbl.interserver.net", 3, "supplementary"),
    ("GBUdb DNSBL", "dnsbl.gbudb.net", 3, "supplementary"),
];

/// The built-in blacklist servers, in tier order.
#[must_use]
pub fn builtin_servers() -> Vec<BlacklistServer> {
    BUILTIN_SERVERS
        .iter()
        .map(|&(name, host, tier, priority)| {
            BlacklistServer::new(name, host)
                .with_tier(tier)
                .with_priority(priority)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dnsbl::is_valid_hostname;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_hosts_are_valid_and_unique() {
        let servers = builtin_servers();
        assert_eq!(servers.len(), 20);

        let mut seen = HashSet::new();
        for server in &servers {
            assert!(is_valid_hostname(&server.host), "{}", server.host);
            assert!(seen.insert(server.host.clone()), "duplicate {}", server.host);
            assert!(matches!(server.tier, Some(1..=3)));
        }
    }
}
