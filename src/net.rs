//! IP address comparison
//!
//! Request peers can present the same address in several spellings:
//! IPv4-mapped IPv6 (`::ffff:192.168.0.1`), abbreviated IPv6, or plain
//! IPv4. [`is_same_ip`] compares after canonicalization so all spellings
//! of one address compare equal.

use std::net::IpAddr;

/// Compares two textual IP addresses for semantic equality.
///
/// Unparseable input compares `false`; this never errors.
pub fn is_same_ip(a: &str, b: &str) -> bool {
    match (parse_canonical(a), parse_canonical(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn parse_canonical(addr: &str) -> Option<IpAddr> {
    addr.trim().parse::<IpAddr>().ok().map(|ip| ip.to_canonical())
}
