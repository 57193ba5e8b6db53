//! # Liveness Probing
//!
//! One reachability check per candidate address. ICMP echo is preferred;
//! when the process cannot open an ICMP socket the sweep falls back to a
//! TCP connect probe. Whichever mechanism is chosen stays fixed for the
//! whole sweep, so results are comparable across addresses.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use surge_ping::{Client, Config as PingConfig, PingIdentifier, PingSequence};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, warn};

use sweepr_common::network::host::ProbeResult;

/// Extra slack past the configured timeout before a probe is abandoned
/// outright.
pub const PROBE_GRACE: Duration = Duration::from_secs(1);

const ICMP_PAYLOAD: [u8; 56] = [0u8; 56];
const CONNECT_PROBE_PORT: u16 = 443;

/// A single-shot reachability check.
///
/// Implementations must absorb every failure into a negative result and
/// must not touch shared sweep state; the coordinator folds the returned
/// value in.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, addr: Ipv4Addr) -> ProbeResult;
}

/// ICMP echo prober.
///
/// Requires permission to open an ICMP socket; construction fails without
/// it and the caller is expected to fall back to [`ConnectProber`].
pub struct IcmpProber {
    client: Client,
    probe_timeout: Duration,
}

impl IcmpProber {
    pub fn new(probe_timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::new(&PingConfig::default())?;
        Ok(Self {
            client,
            probe_timeout,
        })
    }
}

#[async_trait]
impl Prober for IcmpProber {
    async fn probe(&self, addr: Ipv4Addr) -> ProbeResult {
        let started = Instant::now();
        let mut pinger = self
            .client
            .pinger(IpAddr::V4(addr), PingIdentifier(rand::random()))
            .await;
        pinger.timeout(self.probe_timeout);

        let echo = timeout(
            self.probe_timeout + PROBE_GRACE,
            pinger.ping(PingSequence(0), &ICMP_PAYLOAD),
        )
        .await;

        match echo {
            Ok(Ok((_reply, rtt))) => ProbeResult::reachable(addr, rtt),
            Ok(Err(e)) => {
                debug!("no echo from {addr}: {e}");
                ProbeResult::unreachable(addr, started.elapsed())
            }
            Err(_elapsed) => ProbeResult::unreachable(addr, started.elapsed()),
        }
    }
}

/// TCP connect prober for unprivileged runs.
///
/// Only a completed handshake counts as reachable; a refused connection and
/// a timeout both report not reachable.
pub struct ConnectProber {
    probe_timeout: Duration,
    port: u16,
}

impl ConnectProber {
    pub fn new(probe_timeout: Duration) -> Self {
        Self {
            probe_timeout,
            port: CONNECT_PROBE_PORT,
        }
    }

    pub fn with_port(probe_timeout: Duration, port: u16) -> Self {
        Self {
            probe_timeout,
            port,
        }
    }
}

#[async_trait]
impl Prober for ConnectProber {
    async fn probe(&self, addr: Ipv4Addr) -> ProbeResult {
        let started = Instant::now();
        let socket_addr = SocketAddr::new(IpAddr::V4(addr), self.port);

        match timeout(
            self.probe_timeout + PROBE_GRACE,
            TcpStream::connect(socket_addr),
        )
        .await
        {
            Ok(Ok(_stream)) => ProbeResult::reachable(addr, started.elapsed()),
            Ok(Err(e)) => {
                debug!("connect probe to {socket_addr} failed: {e}");
                ProbeResult::unreachable(addr, started.elapsed())
            }
            Err(_elapsed) => ProbeResult::unreachable(addr, started.elapsed()),
        }
    }
}

/// Picks the probe mechanism for this sweep, once, so every probe measures
/// liveness the same way.
pub fn default_prober(probe_timeout: Duration) -> Arc<dyn Prober> {
    match IcmpProber::new(probe_timeout) {
        Ok(prober) => Arc::new(prober),
        Err(e) => {
            warn!("ICMP socket unavailable ({e}), falling back to TCP connect probes");
            Arc::new(ConnectProber::new(probe_timeout))
        }
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
