use std::net::Ipv4Addr;

use clap::{Parser, Subcommand};
use ipnetwork::Ipv4Network;

#[derive(Debug, Parser)]
#[command(
    name = "lanherd",
    about = "LAN device discovery, Wake-on-LAN and remote shutdown",
    version
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List available network interfaces
    Interfaces,

    /// Scan an IPv4 range for active devices
    Scan {
        /// CIDR range to scan (defaults to the interface's own subnet)
        range: Option<Ipv4Network>,

        /// Network interface to scan on (defaults to the default route's)
        #[arg(short, long)]
        interface: Option<String>,
    },

    /// Send a Wake-on-LAN magic packet
    Wake {
        /// Target MAC address (colon-separated hex)
        mac: String,
    },

    /// Shut down a remote device
    Shutdown {
        /// Target IP address
        ip: Ipv4Addr,

        /// Remote username
        #[arg(short, long)]
        username: Option<String>,

        /// Remote password
        #[arg(short, long, requires = "username")]
        password: Option<String>,
    },

    /// Probe a host's well-known TCP ports
    Ports {
        /// Target IP address
        ip: Ipv4Addr,
    },
}
