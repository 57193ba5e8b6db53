//! # Network Range Model
//!
//! Validates CIDR input into an immutable [`NetworkRange`] and enumerates
//! its candidate host addresses in ascending order.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use ipnetwork::Ipv4Network;

use crate::error::InvalidRangeError;

/// Ranges holding at most this many addresses are swept in full, network
/// and broadcast addresses included. Stripping those two from a /30 or /31
/// would leave one target or none.
pub const SMALL_RANGE_MAX: u64 = 4;

/// A validated IPv4 CIDR block.
///
/// Parsing is non-strict: host bits in the input are masked away, so
/// `192.168.1.77/24` and `192.168.1.0/24` describe the same range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetworkRange {
    network: Ipv4Network,
}

impl NetworkRange {
    pub fn parse(input: &str) -> Result<Self, InvalidRangeError> {
        let parsed = Ipv4Network::from_str(input.trim())
            .map_err(|e| InvalidRangeError::new(input, e.to_string()))?;

        // Re-anchor on the masked network address. A bare address without a
        // prefix comes back as a /32.
        let network = Ipv4Network::new(parsed.network(), parsed.prefix())
            .map_err(|e| InvalidRangeError::new(input, e.to_string()))?;

        Ok(Self { network })
    }

    pub fn base_addr(&self) -> Ipv4Addr {
        self.network.network()
    }

    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }

    /// Every address the prefix covers, network and broadcast included.
    pub fn total_addresses(&self) -> u64 {
        1u64 << (32 - self.prefix())
    }

    /// How many addresses [`NetworkRange::hosts`] will yield.
    pub fn candidate_count(&self) -> u64 {
        let total = self.total_addresses();
        if total <= SMALL_RANGE_MAX {
            total
        } else {
            total - 2
        }
    }

    /// Candidate addresses in ascending order.
    ///
    /// Each call returns a fresh iterator over the same finite sequence.
    /// The network and broadcast addresses are skipped unless the range
    /// holds [`SMALL_RANGE_MAX`] addresses or fewer.
    pub fn hosts(&self) -> impl Iterator<Item = Ipv4Addr> {
        let first: u32 = self.network.network().into();
        let last: u32 = self.network.broadcast().into();

        let (start, end) = if self.total_addresses() <= SMALL_RANGE_MAX {
            (first, last)
        } else {
            (first + 1, last - 1)
        };

        (start..=end).map(Ipv4Addr::from)
    }
}

impl FromStr for NetworkRange {
    type Err = InvalidRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NetworkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base_addr(), self.prefix())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
