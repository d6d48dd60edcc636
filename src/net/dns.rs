use std::net::{IpAddr, Ipv4Addr};

use dns_lookup::lookup_addr;

/// Reverse-resolve `ip` into a display name for its device record.
///
/// Falls back to a placeholder embedding the IP, so the name is never
/// empty even when the resolver knows nothing about the host.
pub fn device_name(ip: Ipv4Addr) -> String {
    reverse_lookup(ip).unwrap_or_else(|| fallback_name(ip))
}

/// Reverse DNS lookup. `None` on any resolver failure.
pub fn reverse_lookup(ip: Ipv4Addr) -> Option<String> {
    match lookup_addr(&IpAddr::V4(ip)) {
        // The resolver echoes the address back when there is no PTR
        // record; treat that the same as a failed lookup.
        Ok(hostname) if hostname != ip.to_string() => Some(hostname),
        _ => None,
    }
}

fn fallback_name(ip: Ipv4Addr) -> String {
    format!("Unknown Device ({ip})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_name_embeds_ip() {
        assert_eq!(
            fallback_name(Ipv4Addr::new(10, 0, 0, 5)),
            "Unknown Device (10.0.0.5)"
        );
    }
}
