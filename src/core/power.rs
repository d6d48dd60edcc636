use std::net::Ipv4Addr;
use std::process::Command;

use log::warn;

use crate::error::{LanherdError, Result};
use crate::net::wol;

/// Login credentials for a remote shutdown target.
///
/// The password is carried for callers that have one; the SSH path
/// relies on key-based auth and never sends it.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

/// Send a Wake-on-LAN magic packet to `mac_address`.
///
/// Failures are logged and reported only as `false`; a malformed MAC,
/// a socket error and an unreachable network all look the same to the
/// caller. `true` means the packet was handed to the OS, not that the
/// device woke.
pub fn wake(mac_address: &str) -> bool {
    match try_wake(mac_address) {
        Ok(()) => true,
        Err(e) => {
            warn!("error sending WOL packet to {mac_address}: {e}");
            false
        }
    }
}

fn try_wake(mac_address: &str) -> Result<()> {
    let mac = wol::parse_mac(mac_address)?;
    wol::send(mac)
}

/// Ask the device at `ip` to shut down.
///
/// Same reporting policy as [`wake`]: failures are logged and surfaced
/// only as `false`. `true` confirms the local command exited cleanly,
/// never that the target actually powered off.
pub fn shutdown(ip: Ipv4Addr, credentials: Option<&Credentials>) -> bool {
    match try_shutdown(ip, credentials) {
        Ok(()) => true,
        Err(e) => {
            warn!("error shutting down {ip}: {e}");
            false
        }
    }
}

fn try_shutdown(ip: Ipv4Addr, credentials: Option<&Credentials>) -> Result<()> {
    let mut command = platform_shutdowner().command(ip, credentials);
    let status = command
        .status()
        .map_err(|e| LanherdError::ShutdownFailed(format!("failed to launch command: {e}")))?;
    if !status.success() {
        return Err(LanherdError::ShutdownFailed(format!(
            "command exited with {status}"
        )));
    }
    Ok(())
}

/// Builds the platform-specific remote shutdown command.
///
/// Arguments are passed as a vector, never through a shell, so target
/// addresses and usernames cannot smuggle in shell metacharacters.
pub trait RemoteShutdowner {
    fn command(&self, ip: Ipv4Addr, credentials: Option<&Credentials>) -> Command;
}

/// Remote shutdown over SSH: `ssh [user@]<ip> "sudo shutdown -h now"`.
pub struct SshShutdown;

impl RemoteShutdowner for SshShutdown {
    fn command(&self, ip: Ipv4Addr, credentials: Option<&Credentials>) -> Command {
        let destination = match credentials {
            Some(creds) => format!("{}@{ip}", creds.username),
            None => ip.to_string(),
        };
        let mut cmd = Command::new("ssh");
        cmd.arg(destination).arg("sudo shutdown -h now");
        cmd
    }
}

/// Remote shutdown via the Windows `shutdown` utility.
pub struct WindowsShutdown;

impl RemoteShutdowner for WindowsShutdown {
    // TODO: authenticated shutdown needs psexec or similar; credentials
    // are accepted but not applied to the command yet.
    fn command(&self, ip: Ipv4Addr, _credentials: Option<&Credentials>) -> Command {
        let mut cmd = Command::new("shutdown");
        cmd.args(["/s", "/m", &format!(r"\\{ip}"), "/t", "0"]);
        cmd
    }
}

/// Select the shutdown implementation for the running platform.
pub fn platform_shutdowner() -> Box<dyn RemoteShutdowner> {
    if cfg!(windows) {
        Box::new(WindowsShutdown)
    } else {
        Box::new(SshShutdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(cmd: &Command) -> Vec<&str> {
        cmd.get_args().map(|a| a.to_str().unwrap()).collect()
    }

    fn target() -> Ipv4Addr {
        "192.168.1.100".parse().unwrap()
    }

    #[test]
    fn wake_with_malformed_mac_returns_false() {
        assert!(!wake("not-a-mac"));
        assert!(!wake("00:11:22:33:44"));
    }

    #[test]
    fn ssh_command_with_credentials() {
        let creds = Credentials {
            username: "admin".to_string(),
            password: None,
        };
        let cmd = SshShutdown.command(target(), Some(&creds));

        assert_eq!(cmd.get_program(), "ssh");
        assert_eq!(args_of(&cmd), ["admin@192.168.1.100", "sudo shutdown -h now"]);
    }

    #[test]
    fn ssh_command_without_credentials_uses_bare_host() {
        let cmd = SshShutdown.command(target(), None);
        assert_eq!(args_of(&cmd), ["192.168.1.100", "sudo shutdown -h now"]);
    }

    #[test]
    fn windows_command_targets_unc_machine() {
        let cmd = WindowsShutdown.command(target(), None);

        assert_eq!(cmd.get_program(), "shutdown");
        assert_eq!(args_of(&cmd), ["/s", "/m", r"\\192.168.1.100", "/t", "0"]);
    }

    #[test]
    fn metacharacters_stay_inert_in_arguments() {
        // The destination is a single argv entry; nothing interprets it.
        let creds = Credentials {
            username: "user; rm -rf /".to_string(),
            password: None,
        };
        let cmd = SshShutdown.command(target(), Some(&creds));
        assert_eq!(args_of(&cmd)[0], "user; rm -rf /@192.168.1.100");
    }
}
