pub mod args;

use std::process::ExitCode;

use clap::Parser;

use lanherd::core::power::{self, Credentials};
use lanherd::core::scanner::Scanner;
use lanherd::error::Result;
use lanherd::net::{interface, ports};

use crate::cli::args::{Args, Command};

pub fn run() -> Result<ExitCode> {
    let args = Args::parse();

    match args.command {
        Command::Interfaces => {
            println!("{:<12} {:<18} {}", "NAME", "MAC", "ADDRESSES");
            for iface in interface::list() {
                let mac = iface.mac.map(|m| m.to_string()).unwrap_or_else(|| "-".into());
                let ips = iface
                    .ips
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("{:<12} {:<18} {}", iface.name, mac, ips);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Scan { range, interface } => {
            let scanner = match interface {
                Some(name) => Scanner::on_interface(&name)?,
                None => Scanner::new()?,
            };
            let range = match range {
                Some(range) => range,
                None => scanner.local_network()?,
            };

            println!("[*] Scanning {range} on {}...\n", scanner.interface().name);

            let devices = scanner.scan(range)?;

            if devices.is_empty() {
                println!("No devices found.");
            } else {
                println!("{:<16} {:<18} {:<8} {}", "IP", "MAC", "STATUS", "NAME");
                println!("{}", "\u{2500}".repeat(60));
                for device in &devices {
                    println!("{device}");
                }
                println!("\n[*] Found {} device(s).", devices.len());
            }

            Ok(ExitCode::SUCCESS)
        }
        Command::Wake { mac } => {
            if power::wake(&mac) {
                println!("[*] Magic packet sent to {mac}.");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("[!] Failed to send magic packet to {mac}.");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Shutdown {
            ip,
            username,
            password,
        } => {
            let credentials = username.map(|username| Credentials { username, password });
            if power::shutdown(ip, credentials.as_ref()) {
                println!("[*] Shutdown command sent to {ip}.");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("[!] Failed to shut down {ip}.");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Ports { ip } => {
            println!("[*] Probing well-known ports on {ip}...\n");

            let open = ports::scan_common(ip);

            if open.is_empty() {
                println!("No open ports found.");
            } else {
                for &port in &open {
                    println!("{:>5}  {}", port, ports::service_name(port));
                }
                println!("\n[*] {} open port(s).", open.len());
            }

            Ok(ExitCode::SUCCESS)
        }
    }
}
