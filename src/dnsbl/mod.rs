//! DNSBL module.
//!
//! This module provides the blacklist lookup functionality:
//! - IP normalization and reverse query names
//! - The concurrent query engine
//! - The resolver seam and its trust-dns implementation
//! - Server descriptors and result types

pub mod checker;
pub mod normalize;
pub mod resolver;
pub mod server;
pub mod types;

pub use checker::{Checker, NO_SERVERS_MESSAGE};
pub use normalize::{build_reverse_label, normalize, query_name, NormalizedIp};
pub use resolver::{BlacklistResolver, DnsResolver, RecordType};
pub use server::{is_valid_hostname, sanitize_servers, BlacklistServer};
pub use types::*;
