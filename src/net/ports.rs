use std::net::{Ipv4Addr, SocketAddr, TcpStream};
use std::time::Duration;

/// Well-known service ports probed by [`scan_common`].
pub const COMMON_PORTS: [u16; 15] = [
    21, 22, 23, 25, 53, 80, 110, 143, 443, 465, 587, 993, 995, 3306, 5432,
];

const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// Check whether `ip:port` accepts a TCP connection within the timeout.
pub fn probe(ip: Ipv4Addr, port: u16) -> bool {
    let addr = SocketAddr::from((ip, port));
    TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT).is_ok()
}

/// Probe the well-known ports of `ip`, returning the open ones in order.
pub fn scan_common(ip: Ipv4Addr) -> Vec<u16> {
    COMMON_PORTS
        .iter()
        .copied()
        .filter(|&port| probe(ip, port))
        .collect()
}

/// Human-readable service name for a well-known port.
pub fn service_name(port: u16) -> &'static str {
    match port {
        21 => "FTP",
        22 => "SSH",
        23 => "Telnet",
        25 | 587 => "SMTP",
        53 => "DNS",
        80 => "HTTP",
        110 => "POP3",
        143 => "IMAP",
        443 => "HTTPS",
        465 => "SMTPS",
        993 => "IMAPS",
        995 => "POP3S",
        3306 => "MySQL",
        5432 => "PostgreSQL",
        _ => "Unknown",
    }
}
