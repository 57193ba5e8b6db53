//! # Reverse-DNS Resolution
//!
//! Best-effort PTR lookups for hosts that answered a probe. Failures are
//! absorbed into a missing hostname; resolution can never fail a sweep.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;
use tracing::debug;

/// Upper bound on a single reverse lookup; a slow resolver must not stall
/// the sweep.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);

#[async_trait]
pub trait HostnameResolver: Send + Sync {
    /// Best-effort reverse lookup. `None` means no name could be resolved.
    async fn resolve(&self, addr: Ipv4Addr) -> Option<String>;
}

/// System-resolver backed PTR lookup.
///
/// The lookup itself blocks, so it runs on the blocking pool.
pub struct PtrResolver;

#[async_trait]
impl HostnameResolver for PtrResolver {
    async fn resolve(&self, addr: Ipv4Addr) -> Option<String> {
        let ip = IpAddr::V4(addr);
        let lookup = tokio::task::spawn_blocking(move || dns_lookup::lookup_addr(&ip));

        match timeout(LOOKUP_TIMEOUT, lookup).await {
            // getnameinfo echoes the address back when no PTR record exists.
            Ok(Ok(Ok(name))) if name != addr.to_string() => Some(name),
            Ok(Ok(Ok(_echoed))) => None,
            Ok(Ok(Err(e))) => {
                debug!("reverse lookup for {addr} failed: {e}");
                None
            }
            Ok(Err(join_err)) => {
                debug!("reverse lookup task for {addr} failed: {join_err}");
                None
            }
            Err(_elapsed) => {
                debug!("reverse lookup for {addr} timed out");
                None
            }
        }
    }
}

/// Used when resolution is disabled; every host stays unnamed.
pub struct NoopResolver;

#[async_trait]
impl HostnameResolver for NoopResolver {
    async fn resolve(&self, _addr: Ipv4Addr) -> Option<String> {
        None
    }
}
