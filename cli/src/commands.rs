pub mod sweep;

use clap::Parser;
use sweepr_common::config::DEFAULT_CONCURRENCY;
use sweepr_common::network::range::NetworkRange;

#[derive(Parser)]
#[command(name = "sweepr")]
#[command(about = "Discover live hosts on an IPv4 network segment.")]
pub struct CommandLine {
    /// Network to sweep, in CIDR notation (e.g. 192.168.1.0/24)
    pub target: NetworkRange,

    /// Seconds to wait for each probe before giving up
    #[arg(short, long, default_value_t = 2)]
    pub timeout: u64,

    /// Maximum number of probes in flight at once
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Skip reverse-DNS resolution of responding hosts
    #[arg(long)]
    pub no_dns: bool,

    /// Reduce output; repeat to reduce further
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
