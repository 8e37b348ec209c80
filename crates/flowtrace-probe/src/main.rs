//! # flowtrace — host connection probe
//!
//! Tracks open and recently-closed TCP connections from kernel lifecycle
//! events and reports them periodically as JSON lines, falling back to
//! procfs scanning when the kernel tracer is unavailable.

mod replay;
mod reporter;
mod scanner;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use flowtrace_common::constants;
use flowtrace_tracker::ConnectionTracker;

use crate::reporter::Reporter;
use crate::scanner::ProcScanner;

/// Flowtrace — host TCP connection observability probe.
#[derive(Parser, Debug)]
#[command(name = constants::BIN_NAME, version, about, long_about = None)]
struct Cli {
    /// Reporting cadence in seconds.
    #[arg(long, default_value_t = constants::DEFAULT_REPORT_INTERVAL_SECS)]
    interval: u64,

    /// Procfs mount point used by the fallback scanner.
    #[arg(long, default_value = constants::DEFAULT_PROC_ROOT)]
    proc_root: PathBuf,

    /// Replay a JSON-lines event file into the tracker instead of
    /// attaching the kernel tracer.
    #[arg(long)]
    events: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
        )
        .init();

    let cli = Cli::parse();
    let tracker = Arc::new(ConnectionTracker::new());

    if let Some(events) = &cli.events {
        let applied = replay::replay_events(events, &tracker)?;
        tracing::info!(applied, "tracking replayed events");
    } else if let Err(error) = flowtrace_ebpf::tracer::start_tcp_tracer(&tracker) {
        tracing::warn!(%error, "falling back to proc-based tracking");
    }

    let reporter = Reporter::new(
        tracker,
        ProcScanner::new(cli.proc_root),
        Duration::from_secs(cli.interval),
    );
    reporter.run().await;
    Ok(())
}
