pub mod arp;
pub mod dns;
pub mod interface;
pub mod ports;
pub mod wol;

use std::net::Ipv4Addr;

use pnet::datalink::MacAddr;

/// Power state of a discovered device.
///
/// Only responding devices are recorded, so the only observable state
/// is `Online`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    Online,
}

impl DeviceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceStatus::Online => "online",
        }
    }
}

/// A discovered device on the local network.
#[derive(Debug, Clone)]
pub struct Device {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
    pub status: DeviceStatus,
    pub last_seen: String,
    pub name: String,
}

impl Device {
    /// Record a device observed in an ARP reply right now.
    pub fn observed(ip: Ipv4Addr, mac: MacAddr, name: String) -> Self {
        Self {
            ip,
            mac,
            status: DeviceStatus::Online,
            last_seen: "now".to_string(),
            name,
        }
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<16} {:<18} {:<8} {}",
            self.ip.to_string(),
            self.mac.to_string(),
            self.status.as_str(),
            self.name,
        )
    }
}
