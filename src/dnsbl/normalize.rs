//! IP address normalization and DNSBL query-name construction.
//!
//! DNSBL lookups put the address in reverse order in front of the list's
//! zone: `1.2.3.4` checked against `bl.example.org` becomes the query
//! `4.3.2.1.bl.example.org.`. IPv6 addresses use the nibble format, one hex
//! digit per label.

use crate::dnsbl::types::IpVersion;
use crate::error::{Error, Result};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// A validated address ready for querying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedIp {
    pub addr: IpAddr,
    /// Standard textual form (IPv6 compressed)
    pub canonical: String,
    pub version: IpVersion,
}

impl NormalizedIp {
    /// Reverse label for this address, see [`build_reverse_label`].
    #[must_use]
    pub fn reverse_label(&self) -> String {
        build_reverse_label(&self.addr)
    }
}

/// Validate and canonicalize an IP address string.
///
/// Accepts IPv4 dotted quads (optionally with a `/N` CIDR suffix, which is
/// discarded) and IPv6 in any compression form. Private, loopback,
/// link-local and multicast addresses are accepted.
///
/// # Errors
///
/// Returns [`Error::InvalidIp`] when the input is empty, contains characters
/// that cannot appear in an address, or does not parse.
pub fn normalize(raw: &str) -> Result<NormalizedIp> {
    let input = raw.trim();
    if input.is_empty() {
        return Err(Error::invalid_ip(raw));
    }
    if !input
        .chars()
        .all(|c| c.is_ascii_hexdigit() || matches!(c, ':' | '.' | '/'))
    {
        return Err(Error::invalid_ip(raw));
    }

    let (address, prefix) = match input.split_once('/') {
        Some((address, prefix)) => (address, Some(prefix)),
        None => (input, None),
    };

    let addr: IpAddr = address.parse().map_err(|_| Error::invalid_ip(raw))?;

    if let Some(prefix) = prefix {
        let max = if addr.is_ipv4() { 32 } else { 128 };
        match prefix.parse::<u8>() {
            Ok(bits) if bits <= max => {}
            _ => return Err(Error::invalid_ip(raw)),
        }
    }

    if !is_public(&addr) {
        tracing::debug!("{addr} is not globally routable, accepting as private/reserved");
    }

    let version = match addr {
        IpAddr::V4(_) => IpVersion::V4,
        IpAddr::V6(_) => IpVersion::V6,
    };

    Ok(NormalizedIp {
        addr,
        canonical: addr.to_string(),
        version,
    })
}

/// Build the reversed query prefix for an address.
///
/// - IPv4: octets reversed, `1.2.3.4` → `4.3.2.1`.
/// - IPv6: the fully expanded 32 hex digits in reverse order, one per label,
///   `2001:db8::1` → `1.0.0.0. ... .8.b.d.0.1.0.0.2`.
///
/// Many DNSBLs only publish IPv4 zones; an IPv6 query against such a list
/// simply comes back negative. Check a provider's documentation before
/// relying on its IPv6 answers.
#[must_use]
pub fn build_reverse_label(addr: &IpAddr) -> String {
    match addr {
        IpAddr::V4(v4) => {
            let o = v4.octets();
            format!("{}.{}.{}.{}", o[3], o[2], o[1], o[0])
        }
        IpAddr::V6(v6) => {
            let expanded: String = v6
                .segments()
                .iter()
                .map(|segment| format!("{segment:04x}"))
                .collect();
            let nibbles: Vec<String> = expanded.chars().rev().map(String::from).collect();
            nibbles.join(".")
        }
    }
}

/// Build the absolute DNS name to query: `label.host.`.
#[must_use]
pub fn query_name(reverse_label: &str, host: &str) -> String {
    format!("{reverse_label}.{host}.")
}

/// Whether the address is globally routable.
fn is_public(addr: &IpAddr) -> bool {
    match addr {
        IpAddr::V4(v4) => is_public_v4(v4),
        IpAddr::V6(v6) => {
            if let Some(mapped) = v6.to_ipv4_mapped() {
                return is_public_v4(&mapped);
            }
            is_public_v6(v6)
        }
    }
}

fn is_public_v4(v4: &Ipv4Addr) -> bool {
    !(v4.is_private()
        || v4.is_loopback()
        || v4.is_link_local()
        || v4.is_broadcast()
        || v4.is_documentation()
        || v4.is_unspecified()
        || v4.is_multicast()
        // 100.64.0.0/10 shared address space
        || (v4.octets()[0] == 100 && (v4.octets()[1] & 0xc0) == 64)
        // 240.0.0.0/4 reserved
        || v4.octets()[0] >= 240)
}

fn is_public_v6(v6: &Ipv6Addr) -> bool {
    let first = v6.segments()[0];
    !(v6.is_loopback()
        || v6.is_unspecified()
        || v6.is_multicast()
        // fc00::/7 unique local
        || (first & 0xfe00) == 0xfc00
        // fe80::/10 link local
        || (first & 0xffc0) == 0xfe80
        // 2001:db8::/32 documentation
        || (first == 0x2001 && v6.segments()[1] == 0x0db8))
}
