use std::net::{Ipv4Addr, SocketAddrV4, UdpSocket};

use pnet::datalink::MacAddr;

use crate::error::{LanherdError, Result};

/// 6 bytes of 0xFF followed by the target MAC repeated 16 times.
pub const MAGIC_PACKET_SIZE: usize = 6 + 6 * 16;

/// Conventional Wake-on-LAN discard port.
const WOL_PORT: u16 = 9;

/// Build the Wake-on-LAN magic packet for `mac`.
pub fn magic_packet(mac: MacAddr) -> [u8; MAGIC_PACKET_SIZE] {
    let mut packet = [0xffu8; MAGIC_PACKET_SIZE];
    let octets = mac.octets();
    for repeat in 0..16 {
        let start = 6 + repeat * 6;
        packet[start..start + 6].copy_from_slice(&octets);
    }
    packet
}

/// Parse a MAC address, accepting colon- or dash-separated hex.
///
/// Separators are stripped before decoding, so the failure modes are an
/// odd digit count and non-hex characters.
pub fn parse_mac(s: &str) -> Result<MacAddr> {
    let hex: String = s.chars().filter(|c| !matches!(c, ':' | '-')).collect();
    if hex.len() != 12 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(LanherdError::InvalidMac(s.to_string()));
    }

    let mut octets = [0u8; 6];
    for (i, octet) in octets.iter_mut().enumerate() {
        *octet = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|_| LanherdError::InvalidMac(s.to_string()))?;
    }
    Ok(MacAddr::new(
        octets[0], octets[1], octets[2], octets[3], octets[4], octets[5],
    ))
}

/// Broadcast a magic packet for `mac` on the local segment.
///
/// Wake-on-LAN is fire-and-forget: success means the packet was handed
/// to the OS for transmission, not that the device woke.
pub fn send(mac: MacAddr) -> Result<()> {
    let socket = UdpSocket::bind("0.0.0.0:0")
        .map_err(|e| LanherdError::Network(format!("failed to bind WOL socket: {e}")))?;
    socket
        .set_broadcast(true)
        .map_err(|e| LanherdError::Network(format!("failed to enable broadcast: {e}")))?;

    let packet = magic_packet(mac);
    let dest = SocketAddrV4::new(Ipv4Addr::BROADCAST, WOL_PORT);
    socket
        .send_to(&packet, dest)
        .map_err(|e| LanherdError::Network(format!("failed to send magic packet: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAC: MacAddr = MacAddr(0x00, 0x11, 0x22, 0x33, 0x44, 0x55);

    #[test]
    fn magic_packet_layout() {
        let packet = magic_packet(MAC);

        assert_eq!(packet.len(), 102);
        assert!(packet[..6].iter().all(|&b| b == 0xff));
        for repeat in 0..16 {
            let start = 6 + repeat * 6;
            assert_eq!(&packet[start..start + 6], &[0x00, 0x11, 0x22, 0x33, 0x44, 0x55]);
        }
    }

    #[test]
    fn parse_mac_colon_separated() {
        assert_eq!(parse_mac("00:11:22:33:44:55").unwrap(), MAC);
    }

    #[test]
    fn parse_mac_dash_separated_and_bare() {
        assert_eq!(parse_mac("00-11-22-33-44-55").unwrap(), MAC);
        assert_eq!(parse_mac("001122334455").unwrap(), MAC);
    }

    #[test]
    fn parse_mac_rejects_odd_length() {
        assert!(parse_mac("00:11:22:33:44:5").is_err());
    }

    #[test]
    fn parse_mac_rejects_invalid_hex() {
        assert!(parse_mac("zz:11:22:33:44:55").is_err());
    }

    #[test]
    fn parse_mac_rejects_wrong_octet_count() {
        assert!(parse_mac("00:11:22:33:44").is_err());
        assert!(parse_mac("00:11:22:33:44:55:66").is_err());
    }
}
