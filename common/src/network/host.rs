//! Value objects produced while a sweep is running.

use std::net::Ipv4Addr;
use std::time::Duration;

/// Rendered in place of a hostname when reverse resolution failed or was
/// disabled.
pub const UNKNOWN_HOSTNAME: &str = "unknown";

/// Outcome of a single liveness probe.
///
/// Created by the prober and folded into the sweep exactly once by the
/// coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub addr: Ipv4Addr,
    pub reachable: bool,
    /// How long the probe took to answer or to be given up on.
    pub elapsed: Duration,
}

impl ProbeResult {
    pub fn reachable(addr: Ipv4Addr, elapsed: Duration) -> Self {
        Self {
            addr,
            reachable: true,
            elapsed,
        }
    }

    pub fn unreachable(addr: Ipv4Addr, elapsed: Duration) -> Self {
        Self {
            addr,
            reachable: false,
            elapsed,
        }
    }
}

/// One host confirmed active during a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    pub addr: Ipv4Addr,
    /// Reverse-DNS name; `None` when resolution failed or was skipped.
    pub hostname: Option<String>,
    /// Position in completion order. Only meaningful for live progress;
    /// the reported set is sorted by address, not by this index.
    pub discovery_index: usize,
}

impl HostRecord {
    pub fn new(addr: Ipv4Addr, hostname: Option<String>, discovery_index: usize) -> Self {
        Self {
            addr,
            hostname,
            discovery_index,
        }
    }

    pub fn display_name(&self) -> &str {
        self.hostname.as_deref().unwrap_or(UNKNOWN_HOSTNAME)
    }
}
