//! # Sweep Coordinator
//!
//! Fans candidate addresses out to the prober under a bounded-concurrency
//! discipline, folds results back in as they complete, and produces the
//! final ordered summary.
//!
//! All accumulation happens on the coordinator's own task while it drains
//! the join set; probe tasks only ever return values.

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::warn;

use sweepr_common::network::host::{HostRecord, ProbeResult};
use sweepr_common::network::range::NetworkRange;

use crate::probe::Prober;
use crate::report::{self, SweepSummary};
use crate::resolve::HostnameResolver;

/// Completion snapshot handed to the progress callback after every probe.
#[derive(Debug, Clone, Copy)]
pub struct SweepProgress {
    pub scanned: usize,
    pub total: usize,
    pub active: usize,
}

type ProgressFn = Box<dyn Fn(SweepProgress) + Send + Sync>;

/// Bounded-concurrency sweep engine.
///
/// Built fresh for every invocation; holds no state between runs.
pub struct Sweeper {
    prober: Arc<dyn Prober>,
    resolver: Arc<dyn HostnameResolver>,
    concurrency: usize,
    progress: Option<ProgressFn>,
}

impl Sweeper {
    pub fn new(
        prober: Arc<dyn Prober>,
        resolver: Arc<dyn HostnameResolver>,
        concurrency: usize,
    ) -> Self {
        Self {
            prober,
            resolver,
            concurrency: concurrency.max(1),
            progress: None,
        }
    }

    /// Registers a callback invoked after each completed probe.
    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Probes every candidate in `range` and returns the final summary.
    ///
    /// Runs to completion over the whole candidate set: per-host failures
    /// and crashed probe tasks are logged and counted as not reachable,
    /// never propagated.
    pub async fn run(&self, range: &NetworkRange) -> SweepSummary {
        let started = Instant::now();
        let candidates: Vec<Ipv4Addr> = range.hosts().collect();
        let limiter = Arc::new(Semaphore::new(self.concurrency));

        let mut probes: JoinSet<ProbeResult> = JoinSet::new();
        for addr in candidates.iter().copied() {
            let prober = Arc::clone(&self.prober);
            let limiter = Arc::clone(&limiter);
            probes.spawn(async move {
                let Ok(_permit) = limiter.acquire_owned().await else {
                    // The semaphore is never closed while probes run; a
                    // closed permit means teardown, so report silence.
                    return ProbeResult::unreachable(addr, Duration::ZERO);
                };
                prober.probe(addr).await
            });
        }

        let mut scanned: usize = 0;
        let mut active: Vec<HostRecord> = Vec::new();

        while let Some(joined) = probes.join_next().await {
            scanned += 1;
            match joined {
                Ok(result) if result.reachable => {
                    let hostname = self.resolver.resolve(result.addr).await;
                    active.push(HostRecord::new(result.addr, hostname, active.len()));
                }
                Ok(_silent) => {}
                Err(join_err) => {
                    // A crashed probe task counts the same as a silent host.
                    warn!("probe task failed: {join_err}");
                }
            }
            self.report_progress(scanned, candidates.len(), active.len());
        }

        active.sort_by_key(|host| host.addr);
        report::build(candidates.len(), scanned, active, started.elapsed())
    }

    fn report_progress(&self, scanned: usize, total: usize, active: usize) {
        if let Some(progress) = &self.progress {
            progress(SweepProgress {
                scanned,
                total,
                active,
            });
        }
    }
}
