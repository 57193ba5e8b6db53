#![cfg(test)]
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use sweepr_common::network::host::{HostRecord, ProbeResult};
use sweepr_common::network::range::NetworkRange;
use sweepr_core::probe::Prober;
use sweepr_core::resolve::{HostnameResolver, NoopResolver};
use sweepr_core::report::SweepSummary;
use sweepr_core::sweep::{SweepProgress, Sweeper};

/// Deterministic prober that answers from a policy function and records
/// call counts plus the high-water mark of simultaneously in-flight probes.
struct StubProber {
    policy: fn(Ipv4Addr) -> bool,
    delay: Duration,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    high_water: AtomicUsize,
}

impl StubProber {
    fn new(policy: fn(Ipv4Addr) -> bool) -> Self {
        Self::with_delay(policy, Duration::ZERO)
    }

    fn with_delay(policy: fn(Ipv4Addr) -> bool, delay: Duration) -> Self {
        Self {
            policy,
            delay,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            high_water: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Prober for StubProber {
    async fn probe(&self, addr: Ipv4Addr) -> ProbeResult {
        let now_in_flight = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.high_water.fetch_max(now_in_flight, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if (self.policy)(addr) {
            ProbeResult::reachable(addr, self.delay)
        } else {
            ProbeResult::unreachable(addr, self.delay)
        }
    }
}

/// Resolver that records every address it is asked about.
#[derive(Default)]
struct CountingResolver {
    calls: Mutex<Vec<Ipv4Addr>>,
}

#[async_trait]
impl HostnameResolver for CountingResolver {
    async fn resolve(&self, addr: Ipv4Addr) -> Option<String> {
        self.calls.lock().unwrap().push(addr);
        Some(format!("host-{}", addr.octets()[3]))
    }
}

fn odd_last_octet(addr: Ipv4Addr) -> bool {
    addr.octets()[3] % 2 == 1
}

fn lowest_two_hosts(addr: Ipv4Addr) -> bool {
    matches!(addr.octets()[3], 1 | 2)
}

fn always_down(_addr: Ipv4Addr) -> bool {
    false
}

fn active_addrs(summary: &SweepSummary) -> Vec<Ipv4Addr> {
    summary.active.iter().map(|host| host.addr).collect()
}

#[tokio::test]
async fn sweep_is_idempotent_and_sorted() {
    let range = NetworkRange::parse("192.168.7.0/28").unwrap();
    let prober = Arc::new(StubProber::new(odd_last_octet));

    let first = Sweeper::new(prober.clone(), Arc::new(NoopResolver), 8)
        .run(&range)
        .await;
    let second = Sweeper::new(prober, Arc::new(NoopResolver), 8)
        .run(&range)
        .await;

    assert_eq!(active_addrs(&first), active_addrs(&second));
    assert_eq!(first.active.len(), 7);

    let mut sorted = active_addrs(&first);
    sorted.sort();
    assert_eq!(sorted, active_addrs(&first));
}

#[tokio::test]
async fn in_flight_probes_never_exceed_the_limit() {
    let range = NetworkRange::parse("10.4.0.0/26").unwrap();
    let limit = 5;
    let prober = Arc::new(StubProber::with_delay(
        odd_last_octet,
        Duration::from_millis(25),
    ));

    let summary = Sweeper::new(prober.clone(), Arc::new(NoopResolver), limit)
        .run(&range)
        .await;

    assert_eq!(summary.scanned, 62);
    assert_eq!(prober.calls.load(Ordering::SeqCst), 62);
    assert!(
        prober.high_water.load(Ordering::SeqCst) <= limit,
        "high-water mark {} exceeded limit {limit}",
        prober.high_water.load(Ordering::SeqCst)
    );
}

#[tokio::test]
async fn resolution_only_happens_for_reachable_hosts() {
    let range = NetworkRange::parse("10.9.0.0/29").unwrap();
    let resolver = Arc::new(CountingResolver::default());

    let summary = Sweeper::new(
        Arc::new(StubProber::new(lowest_two_hosts)),
        resolver.clone(),
        4,
    )
    .run(&range)
    .await;

    let mut resolved = resolver.calls.lock().unwrap().clone();
    resolved.sort();
    assert_eq!(
        resolved,
        vec![Ipv4Addr::new(10, 9, 0, 1), Ipv4Addr::new(10, 9, 0, 2)]
    );

    let names: Vec<&str> = summary
        .active
        .iter()
        .map(HostRecord::display_name)
        .collect();
    assert_eq!(names, vec!["host-1", "host-2"]);
}

#[tokio::test]
async fn tiny_range_is_probed_in_full() {
    let range = NetworkRange::parse("192.168.1.0/30").unwrap();

    let summary = Sweeper::new(
        Arc::new(StubProber::new(lowest_two_hosts)),
        Arc::new(NoopResolver),
        50,
    )
    .run(&range)
    .await;

    assert_eq!(summary.candidates, 4);
    assert_eq!(summary.scanned, 4);
    assert_eq!(
        active_addrs(&summary),
        vec![Ipv4Addr::new(192, 168, 1, 1), Ipv4Addr::new(192, 168, 1, 2)]
    );
    assert_eq!(summary.active[0].display_name(), "unknown");
}

#[tokio::test]
async fn silent_range_still_completes() {
    let range = NetworkRange::parse("172.20.0.0/29").unwrap();
    let resolver = Arc::new(CountingResolver::default());

    let summary = Sweeper::new(
        Arc::new(StubProber::with_delay(
            always_down,
            Duration::from_millis(5),
        )),
        resolver.clone(),
        3,
    )
    .run(&range)
    .await;

    assert_eq!(summary.candidates, 6);
    assert_eq!(summary.scanned, 6);
    assert!(summary.active.is_empty());
    assert!(resolver.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn progress_fires_once_per_completed_probe() {
    let range = NetworkRange::parse("192.168.40.0/28").unwrap();
    let snapshots: Arc<Mutex<Vec<SweepProgress>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = snapshots.clone();

    let summary = Sweeper::new(
        Arc::new(StubProber::new(odd_last_octet)),
        Arc::new(NoopResolver),
        4,
    )
    .with_progress(Box::new(move |progress| {
        sink.lock().unwrap().push(progress);
    }))
    .run(&range)
    .await;

    let snapshots = snapshots.lock().unwrap();
    assert_eq!(snapshots.len(), summary.scanned);

    let last = snapshots.last().unwrap();
    assert_eq!(last.scanned, 14);
    assert_eq!(last.total, 14);
    assert_eq!(last.active, 7);
}
