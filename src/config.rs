//! Server configuration
//!
//! The server takes no arguments and reads no environment: every value comes
//! from the defaults below. Tests build a `Config` directly.

use serde::Deserialize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Directory holding the build output, relative to the invocation directory
pub const DOCUMENT_ROOT: &str = "build";

/// Listening port
pub const PORT: u16 = 8000;

/// All interfaces; IPv4 clients reach it through the dual-stack socket
pub const HOST: &str = "::";

/// Seconds a single connection may take before it is dropped
pub const CONNECTION_TIMEOUT: u64 = 30;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    pub root: PathBuf,
    pub host: IpAddr,
    pub port: u16,
    pub connection_timeout: u64,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .set_default("root", DOCUMENT_ROOT)?
            .set_default("host", HOST)?
            .set_default("port", PORT)?
            .set_default("connection_timeout", CONNECTION_TIMEOUT)?
            .build()?;

        settings.try_deserialize()
    }

    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub const fn connection_timeout(&self) -> Duration {
        Duration::from_secs(self.connection_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    #[test]
    fn test_load_uses_fixed_defaults() {
        let cfg = Config::load().unwrap();
        assert_eq!(cfg.root, PathBuf::from("build"));
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.host, IpAddr::V6(Ipv6Addr::UNSPECIFIED));
        assert_eq!(cfg.connection_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::load().unwrap();
        assert_eq!(cfg.socket_addr().to_string(), "[::]:8000");
    }
}
