use std::fs;

use ipnetwork::Ipv4Network;
use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;

use crate::error::{LanherdError, Result};

const ROUTE_TABLE_PATH: &str = "/proc/net/route";

/// RTF_GATEWAY bit in the kernel route flags column.
const RTF_GATEWAY: u32 = 0x2;

/// Return all available network interfaces.
pub fn list() -> Vec<NetworkInterface> {
    datalink::interfaces()
}

/// Resolve a network interface by name.
pub fn resolve(name: &str) -> Result<NetworkInterface> {
    datalink::interfaces()
        .into_iter()
        .find(|iface| iface.name == name)
        .ok_or_else(|| LanherdError::InterfaceNotFound(name.into()))
}

/// Get the first IPv4 network assigned to an interface.
pub fn ipv4_network(iface: &NetworkInterface) -> Result<Ipv4Network> {
    iface
        .ips
        .iter()
        .find_map(|ip| match ip {
            IpNetwork::V4(net) => Some(*net),
            _ => None,
        })
        .ok_or_else(|| LanherdError::NoIpv4Address(iface.name.clone()))
}

/// Resolve the interface that carries the default IPv4 route.
///
/// A host without a default gateway has no sensible interface to probe
/// through, so its absence is fatal.
pub fn default_route_interface() -> Result<NetworkInterface> {
    let table = fs::read_to_string(ROUTE_TABLE_PATH)
        .map_err(|e| LanherdError::Network(format!("failed to read {ROUTE_TABLE_PATH}: {e}")))?;
    let name = default_route_name(&table).ok_or(LanherdError::NoDefaultRoute)?;
    resolve(&name)
}

/// Find the interface name of the default route in kernel route-table text.
///
/// Columns are `Iface Destination Gateway Flags ...` with hex values; the
/// default route has destination `00000000` and the gateway flag set.
fn default_route_name(table: &str) -> Option<String> {
    for line in table.lines().skip(1) {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            continue;
        }
        let destination = match u32::from_str_radix(fields[1], 16) {
            Ok(d) => d,
            Err(_) => continue,
        };
        let flags = match u32::from_str_radix(fields[3], 16) {
            Ok(f) => f,
            Err(_) => continue,
        };
        if destination == 0 && flags & RTF_GATEWAY != 0 {
            return Some(fields[0].to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Iface\tDestination\tGateway \tFlags\tRefCnt\tUse\tMetric\tMask\t\tMTU\tWindow\tIRTT";

    #[test]
    fn default_route_name_finds_gateway_entry() {
        let table = format!(
            "{HEADER}\n\
             wlan0\t00000000\t0101A8C0\t0003\t0\t0\t600\t00000000\t0\t0\t0\n\
             wlan0\t0001A8C0\t00000000\t0001\t0\t0\t600\t00FFFFFF\t0\t0\t0\n"
        );
        assert_eq!(default_route_name(&table).as_deref(), Some("wlan0"));
    }

    #[test]
    fn default_route_name_skips_link_routes() {
        // A directly-connected route has destination 0 only for the
        // default entry; link routes carry their subnet and no gateway flag.
        let table = format!(
            "{HEADER}\n\
             eth0\t0001A8C0\t00000000\t0001\t0\t0\t100\t00FFFFFF\t0\t0\t0\n"
        );
        assert_eq!(default_route_name(&table), None);
    }

    #[test]
    fn default_route_name_empty_table() {
        assert_eq!(default_route_name(HEADER), None);
    }

    #[test]
    fn default_route_name_ignores_malformed_lines() {
        let table = format!(
            "{HEADER}\n\
             garbage\n\
             eth1\tzzzzzzzz\t0101A8C0\t0003\t0\t0\t100\t00000000\t0\t0\t0\n\
             eth0\t00000000\t0101A8C0\t0003\t0\t0\t100\t00000000\t0\t0\t0\n"
        );
        assert_eq!(default_route_name(&table).as_deref(), Some("eth0"));
    }
}
