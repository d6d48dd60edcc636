use thiserror::Error;

#[derive(Debug, Error)]
pub enum LanherdError {
    #[error("no default IPv4 route found")]
    NoDefaultRoute,

    #[error("network interface '{0}' not found")]
    InterfaceNotFound(String),

    #[error("interface '{0}' has no IPv4 address")]
    NoIpv4Address(String),

    #[error("invalid MAC address '{0}'")]
    InvalidMac(String),

    #[error("remote shutdown failed: {0}")]
    ShutdownFailed(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("insufficient permissions — run with sudo")]
    PermissionDenied,
}

pub type Result<T> = std::result::Result<T, LanherdError>;
