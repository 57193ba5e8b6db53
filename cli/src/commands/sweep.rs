use std::sync::Arc;

use colored::*;

use crate::terminal::{colors, format, print, spinner};
use sweepr_common::config::SweepConfig;
use sweepr_common::network::range::NetworkRange;
use sweepr_common::{info, success};
use sweepr_core::probe;
use sweepr_core::report::SweepSummary;
use sweepr_core::resolve::{HostnameResolver, NoopResolver, PtrResolver};
use sweepr_core::sweep::{SweepProgress, Sweeper};

pub async fn sweep(target: NetworkRange, cfg: &SweepConfig) -> anyhow::Result<()> {
    anyhow::ensure!(cfg.concurrency >= 1, "concurrency must be at least 1");

    info!(
        "Sweeping {target}: {} candidate addresses, {} workers",
        target.candidate_count(),
        cfg.concurrency
    );

    let prober = probe::default_prober(cfg.probe_timeout);
    let resolver: Arc<dyn HostnameResolver> = if cfg.no_dns {
        Arc::new(NoopResolver)
    } else {
        Arc::new(PtrResolver)
    };

    let sweeper = Sweeper::new(prober, resolver, cfg.concurrency).with_progress(Box::new(
        |progress: SweepProgress| spinner::report_sweep_progress(progress),
    ));

    let summary: SweepSummary = sweeper.run(&target).await;
    spinner::get_spinner().finish_and_clear();

    sweep_ends(&summary, cfg);
    Ok(())
}

fn sweep_ends(summary: &SweepSummary, cfg: &SweepConfig) {
    if summary.active.is_empty() {
        print::header("zero hosts detected", cfg.quiet);
        print::no_results();
        print_summary_block(summary);
        return;
    }

    print::header("network sweep report", cfg.quiet);
    print_hosts(summary, cfg);
    print_summary_block(summary);
    print_closing(summary, cfg);
}

fn print_hosts(summary: &SweepSummary, cfg: &SweepConfig) {
    if cfg.quiet > 1 {
        return;
    }

    for (idx, host) in summary.active.iter().enumerate() {
        print::tree_head(idx, &host.addr.to_string());
        print::as_tree_one_level(format::host_to_details(host));
    }
    print::blank();
}

fn print_summary_block(summary: &SweepSummary) {
    print::set_key_width(&["Active hosts", "Scanned", "Elapsed", "Throughput"]);
    print::aligned_line(
        "Active hosts",
        summary.active.len().to_string().bold().green(),
    );
    print::aligned_line("Scanned", summary.scanned.to_string().yellow());
    print::aligned_line(
        "Elapsed",
        format!("{:.2}s", summary.elapsed.as_secs_f64()).yellow(),
    );
    print::aligned_line(
        "Throughput",
        format!("{:.0} hosts/s", summary.throughput).yellow(),
    );
}

fn print_closing(summary: &SweepSummary, cfg: &SweepConfig) {
    let active: ColoredString = format!("{} active hosts", summary.active.len())
        .bold()
        .green();
    let elapsed: ColoredString = format!("{:.2}s", summary.elapsed.as_secs_f64())
        .bold()
        .yellow();
    let output: ColoredString =
        format!("Sweep complete: {active} identified in {elapsed}").color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
            print::end_of_program();
        }
        _ => success!("{output}"),
    }
}
