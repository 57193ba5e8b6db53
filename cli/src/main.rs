mod commands;
mod terminal;

use std::time::Duration;

use commands::{CommandLine, sweep};
use sweepr_common::config::SweepConfig;
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init();
    print::banner(commands.quiet);

    let cfg = SweepConfig {
        probe_timeout: Duration::from_secs(commands.timeout),
        concurrency: commands.concurrency,
        no_dns: commands.no_dns,
        quiet: commands.quiet,
    };

    sweep::sweep(commands.target, &cfg).await
}
