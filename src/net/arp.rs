use std::net::Ipv4Addr;

use pnet::datalink::MacAddr;
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, ArpPacket, MutableArpPacket};
use pnet::packet::ethernet::{EtherTypes, EthernetPacket, MutableEthernetPacket};
use pnet::packet::{MutablePacket, Packet};

const ARP_PACKET_SIZE: usize = 28;
const ETHERNET_HEADER_SIZE: usize = 14;
const BROADCAST: MacAddr = MacAddr(0xff, 0xff, 0xff, 0xff, 0xff, 0xff);
const ZERO: MacAddr = MacAddr(0, 0, 0, 0, 0, 0);

/// Total buffer size for an ARP-over-Ethernet frame.
pub const FRAME_SIZE: usize = ETHERNET_HEADER_SIZE + ARP_PACKET_SIZE;

/// Build a broadcast ARP probe: "who has `target_ip`? tell `src_ip` at `src_mac`."
pub fn build_probe(buffer: &mut [u8], src_mac: MacAddr, src_ip: Ipv4Addr, target_ip: Ipv4Addr) {
    let mut eth = MutableEthernetPacket::new(buffer).expect("buffer too small for Ethernet header");
    eth.set_source(src_mac);
    eth.set_destination(BROADCAST);
    eth.set_ethertype(EtherTypes::Arp);

    let mut arp = MutableArpPacket::new(eth.payload_mut()).expect("buffer too small for ARP packet");
    arp.set_hardware_type(ArpHardwareTypes::Ethernet);
    arp.set_protocol_type(EtherTypes::Ipv4);
    arp.set_hw_addr_len(6);
    arp.set_proto_addr_len(4);
    arp.set_operation(ArpOperations::Request);
    arp.set_sender_hw_addr(src_mac);
    arp.set_sender_proto_addr(src_ip);
    arp.set_target_hw_addr(ZERO);
    arp.set_target_proto_addr(target_ip);
}

/// Parse an Ethernet frame containing an ARP reply.
///
/// Returns `(sender_mac, sender_ip)` if the frame is a valid ARP reply.
pub fn parse_reply(frame: &[u8]) -> Option<(MacAddr, Ipv4Addr)> {
    let eth = EthernetPacket::new(frame)?;
    if eth.get_ethertype() != EtherTypes::Arp {
        return None;
    }
    let arp = ArpPacket::new(eth.payload())?;
    if arp.get_operation() != ArpOperations::Reply {
        return None;
    }
    Some((arp.get_sender_hw_addr(), arp.get_sender_proto_addr()))
}
