//! Connectivity preflight.
//!
//! A TCP connect to a public DNS resolver is a cheap hint that the network is
//! up. It says nothing about the LLM service itself, so the real request still
//! handles its own failures.

use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

use tracing::{debug, error};

/// Google public DNS, TCP port 53.
pub const DEFAULT_PROBE_ADDR: SocketAddr = SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::new(8, 8, 8, 8)), 53);

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Reachability check run before every remote call.
pub trait Probe {
    fn is_connected(&self) -> bool;
}

/// Probe that opens (and immediately drops) a TCP connection.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    addr: SocketAddr,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(addr: SocketAddr, timeout: Duration) -> Self {
        Self { addr, timeout }
    }
}

impl Default for TcpProbe {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_ADDR, DEFAULT_PROBE_TIMEOUT)
    }
}

impl Probe for TcpProbe {
    fn is_connected(&self) -> bool {
        match TcpStream::connect_timeout(&self.addr, self.timeout) {
            Ok(_) => {
                debug!("Connection to {} successful", self.addr);
                true
            }
            Err(e) => {
                error!("No internet connection ({}: {}). Please check your network.", self.addr, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use super::*;

    #[test]
    fn test_probe_reaches_local_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let probe = TcpProbe::new(listener.local_addr().unwrap(), Duration::from_secs(1));
        assert!(probe.is_connected());
    }

    #[test]
    fn test_probe_refused() {
        // Bind then drop to get a port nobody listens on.
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        let probe = TcpProbe::new(addr, Duration::from_secs(1));
        assert!(!probe.is_connected());
    }

    #[test]
    fn test_default_target() {
        let probe = TcpProbe::default();
        assert_eq!(probe.addr.to_string(), "8.8.8.8:53");
        assert_eq!(probe.timeout, Duration::from_secs(5));
    }
}
