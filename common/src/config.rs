use std::time::Duration;

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_CONCURRENCY: usize = 50;

/// Immutable settings for one sweep invocation.
///
/// A fresh value is built for every run; the engine holds no state between
/// sweeps.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Upper bound on how long a single liveness probe may wait.
    pub probe_timeout: Duration,
    /// Maximum number of probes in flight at any instant.
    pub concurrency: usize,
    /// Skip reverse-DNS resolution of responding hosts.
    pub no_dns: bool,
    /// Output reduction level.
    pub quiet: u8,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
            no_dns: false,
            quiet: 0,
        }
    }
}
