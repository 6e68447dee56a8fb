use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use sharecrawl_common::network::target;
use sharecrawl_common::pattern::PatternSet;
use sharecrawl_common::{success, warn};
use sharecrawl_core::label::{self, HostsFileResolver};
use sharecrawl_core::sampler::{ChanceSampler, Sampler, SeededSampler};
use sharecrawl_core::session::MountedShareConnector;
use sharecrawl_core::{ScanSummary, Scheduler, TaskContext};
use tracing::info;

use crate::commands::CommandLine;
use crate::terminal::{colors, print, spinner};

const KEY_WIDTH: usize = 18;

pub async fn spider(args: CommandLine) -> anyhow::Result<()> {
    let start_time: Instant = Instant::now();

    print::header("resolving targets");
    let targets = target::resolve(&args.target)
        .with_context(|| format!("Error reading file or IP address notation: {}", args.target))?;
    let config = args.scan_config().context("Invalid configuration")?;

    let patterns: PatternSet = args.patterns();
    if patterns.matches_everything() {
        warn!("No keyword given, every filename will be reported as a match");
    } else if patterns.is_empty() {
        warn!("No keywords configured, no filename will be reported as a match");
    } else {
        success!("Loaded {} keywords", patterns.len());
    }

    let sampler: Arc<dyn Sampler> = match args.seed {
        Some(seed) => Arc::new(SeededSampler::new(seed)),
        None => Arc::new(ChanceSampler),
    };

    let mut connector = MountedShareConnector::new(&args.mount_root);
    if args.skip_probe {
        connector = connector.without_probe();
    }

    let ctx = TaskContext {
        config: Arc::new(config),
        patterns: Arc::new(patterns),
        connector: Arc::new(connector),
        resolver: Arc::new(HostsFileResolver::load(&args.names)),
        sampler,
        local_label: label::local_label(),
    };

    let scheduler = Scheduler::new(ctx.config.max_concurrency)
        .on_progress(Arc::new(spinner::report_progress));

    print::header("spidering");
    info!(
        "Spidering {} hosts, {} at a time",
        targets.len(),
        scheduler.max_concurrency()
    );
    spinner::start(targets.len());

    let summary: ScanSummary = scheduler
        .run(targets, |target| ctx.task(target).run())
        .await;

    spinner::finish();
    print_summary(&summary, start_time.elapsed());
    Ok(())
}

fn print_summary(summary: &ScanSummary, total_time: Duration) {
    print::header("done spidering");
    print::aligned_line("Hosts attempted", summary.hosts_attempted, KEY_WIDTH);
    print::aligned_line("Hosts connected", summary.hosts_connected, KEY_WIDTH);
    print::aligned_line("Hosts failed", summary.hosts_failed, KEY_WIDTH);
    print::aligned_line("Folders listed", summary.walk.directories_listed, KEY_WIDTH);
    print::aligned_line("Unreadable folders", summary.walk.listing_failures, KEY_WIDTH);
    print::aligned_line("Matches", summary.walk.matches, KEY_WIDTH);
    print::aligned_line("Files collected", summary.walk.files_collected, KEY_WIDTH);
    print::aligned_line("Failed retrievals", summary.walk.retrieval_failures, KEY_WIDTH);

    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: String = format!("Completed in {total_time}")
        .color(colors::TEXT_DEFAULT)
        .to_string();

    print::fat_separator();
    print::centerln(&output);
}
