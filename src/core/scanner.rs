use std::net::Ipv4Addr;
use std::time::{Duration, Instant};

use ipnetwork::Ipv4Network;
use pnet::datalink::{self, Config, DataLinkReceiver, DataLinkSender, MacAddr, NetworkInterface};

use crate::error::{LanherdError, Result};
use crate::net::{arp, dns, interface, Device};

/// Replies are collected until this window expires. The scan always
/// blocks for the full window: the responder count is unknown, so there
/// is no early exit.
const SCAN_WINDOW: Duration = Duration::from_secs(1);
const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// ARP scanner bound to a network interface resolved at construction.
pub struct Scanner {
    iface: NetworkInterface,
}

impl Scanner {
    /// Bind to the interface carrying the default IPv4 route.
    pub fn new() -> Result<Self> {
        Ok(Self {
            iface: interface::default_route_interface()?,
        })
    }

    /// Bind to a named interface instead of the default route's.
    pub fn on_interface(name: &str) -> Result<Self> {
        Ok(Self {
            iface: interface::resolve(name)?,
        })
    }

    /// The interface this scanner probes through.
    pub fn interface(&self) -> &NetworkInterface {
        &self.iface
    }

    /// The IPv4 subnet assigned to the scanner's interface.
    pub fn local_network(&self) -> Result<Ipv4Network> {
        interface::ipv4_network(&self.iface)
    }

    /// Probe every address in `range` via ARP and collect the devices
    /// that reply within the scan window.
    ///
    /// Records are returned in reply-arrival order, one per distinct
    /// (ip, mac) pair, with hostnames reverse-resolved afterwards.
    pub fn scan(&self, range: Ipv4Network) -> Result<Vec<Device>> {
        let our_mac = self
            .iface
            .mac
            .ok_or_else(|| LanherdError::Network("interface has no MAC address".into()))?;
        let our_ip = self.local_network()?.ip();

        let (mut tx, mut rx) = open_channel(&self.iface)?;

        let mut buffer = [0u8; arp::FRAME_SIZE];
        for ip in range.iter() {
            arp::build_probe(&mut buffer, our_mac, our_ip, ip);
            tx.send_to(&buffer, None)
                .ok_or_else(|| LanherdError::Network("send returned no result".into()))?
                .map_err(|e| LanherdError::Network(e.to_string()))?;
        }

        let mut seen: Vec<(Ipv4Addr, MacAddr)> = Vec::new();
        let deadline = Instant::now() + SCAN_WINDOW;

        while Instant::now() < deadline {
            let frame = match rx.next() {
                Ok(frame) => frame,
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => continue,
                Err(e) => return Err(LanherdError::Network(e.to_string())),
            };
            if let Some((mac, ip)) = arp::parse_reply(frame) {
                if should_record(&seen, range, ip, mac) {
                    seen.push((ip, mac));
                }
            }
        }

        // Name resolution happens after the window so slow lookups
        // cannot starve the reply collection.
        Ok(seen
            .into_iter()
            .map(|(ip, mac)| Device::observed(ip, mac, dns::device_name(ip)))
            .collect())
    }
}

/// A reply is recorded once per (ip, mac) pair, and only when the sender
/// address lies inside the scanned range.
fn should_record(
    seen: &[(Ipv4Addr, MacAddr)],
    range: Ipv4Network,
    ip: Ipv4Addr,
    mac: MacAddr,
) -> bool {
    range.contains(ip)
        && !seen
            .iter()
            .any(|&(seen_ip, seen_mac)| seen_ip == ip && seen_mac == mac)
}

/// Open an Ethernet datalink channel on the given interface.
fn open_channel(
    iface: &NetworkInterface,
) -> Result<(Box<dyn DataLinkSender>, Box<dyn DataLinkReceiver>)> {
    let config = Config {
        read_timeout: Some(READ_TIMEOUT),
        ..Default::default()
    };
    match datalink::channel(iface, config) {
        Ok(datalink::Channel::Ethernet(tx, rx)) => Ok((tx, rx)),
        Ok(_) => Err(LanherdError::Network("unsupported channel type".into())),
        Err(e) => Err(match e.kind() {
            std::io::ErrorKind::PermissionDenied => LanherdError::PermissionDenied,
            _ => LanherdError::Network(e.to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAC_A: MacAddr = MacAddr(0xaa, 0xbb, 0xcc, 0x00, 0x00, 0x01);
    const MAC_B: MacAddr = MacAddr(0xaa, 0xbb, 0xcc, 0x00, 0x00, 0x02);

    fn range() -> Ipv4Network {
        "192.168.1.0/24".parse().unwrap()
    }

    #[test]
    fn records_new_in_range_reply() {
        let seen = Vec::new();
        assert!(should_record(&seen, range(), "192.168.1.20".parse().unwrap(), MAC_A));
    }

    #[test]
    fn rejects_reply_outside_range() {
        let seen = Vec::new();
        assert!(!should_record(&seen, range(), "10.0.0.20".parse().unwrap(), MAC_A));
    }

    #[test]
    fn rejects_duplicate_pair() {
        let ip: Ipv4Addr = "192.168.1.20".parse().unwrap();
        let seen = vec![(ip, MAC_A)];
        assert!(!should_record(&seen, range(), ip, MAC_A));
        // Same IP under a different MAC is a distinct observation.
        assert!(should_record(&seen, range(), ip, MAC_B));
    }
}
