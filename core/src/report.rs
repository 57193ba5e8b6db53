//! Final aggregation of a completed sweep.

use std::time::Duration;

use sweepr_common::network::host::HostRecord;

/// Aggregate outcome of one sweep invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepSummary {
    /// Addresses the range yielded for probing.
    pub candidates: usize,
    /// Probes that ran to completion, whether they answered or not.
    pub scanned: usize,
    /// Responding hosts, sorted by address ascending.
    pub active: Vec<HostRecord>,
    pub elapsed: Duration,
    /// Probes per second; 0.0 when the sweep finished too fast to measure.
    pub throughput: f64,
}

/// Builds the summary from the coordinator's terminal state. Pure.
pub fn build(
    candidates: usize,
    scanned: usize,
    active: Vec<HostRecord>,
    elapsed: Duration,
) -> SweepSummary {
    let secs = elapsed.as_secs_f64();
    let throughput = if secs > f64::EPSILON {
        scanned as f64 / secs
    } else {
        0.0
    };

    SweepSummary {
        candidates,
        scanned,
        active,
        elapsed,
        throughput,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn throughput_is_zero_for_instant_sweeps() {
        let summary = build(4, 4, Vec::new(), Duration::ZERO);
        assert_eq!(summary.throughput, 0.0);
    }

    #[test]
    fn throughput_is_scanned_over_seconds() {
        let summary = build(254, 254, Vec::new(), Duration::from_secs(2));
        assert_eq!(summary.throughput, 127.0);
    }

    #[test]
    fn summary_carries_the_terminal_state() {
        let active = vec![HostRecord::new(Ipv4Addr::new(10, 0, 0, 1), None, 0)];
        let summary = build(6, 6, active.clone(), Duration::from_secs(1));

        assert_eq!(summary.candidates, 6);
        assert_eq!(summary.scanned, 6);
        assert_eq!(summary.active, active);
    }
}
