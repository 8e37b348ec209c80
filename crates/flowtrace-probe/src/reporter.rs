//! Periodic connection reporting.
//!
//! Drains connection state on a fixed cadence and emits one JSON line per
//! record. The source of each cycle depends on the tracker lifecycle: a
//! ready tracker is drained with its walk protocol (open set re-reported,
//! closed backlog reported once); an unattached or dead tracker is
//! bypassed in favor of a fresh procfs scan.

use std::sync::Arc;
use std::time::Duration;

use flowtrace_tracker::{Connection, ConnectionTracker};

use crate::scanner::ProcScanner;

/// The reporting role of the probe.
#[derive(Debug)]
pub struct Reporter {
    tracker: Arc<ConnectionTracker>,
    scanner: ProcScanner,
    interval: Duration,
}

impl Reporter {
    /// Creates a reporter draining the given tracker, with the scanner as
    /// its fallback source.
    #[must_use]
    pub fn new(tracker: Arc<ConnectionTracker>, scanner: ProcScanner, interval: Duration) -> Self {
        Self {
            tracker,
            scanner,
            interval,
        }
    }

    /// Collects one reporting cycle's worth of connections.
    ///
    /// Scanner failures are absorbed into an empty cycle: the probe keeps
    /// reporting on the next tick rather than dying with the source.
    pub fn snapshot(&self) -> Vec<Connection> {
        if self.tracker.is_ready() {
            let mut connections = Vec::new();
            self.tracker.walk_connections(|c| connections.push(c.clone()));
            connections
        } else {
            tracing::debug!(
                lifecycle = ?self.tracker.lifecycle(),
                "tracker not usable, scanning procfs"
            );
            match self.scanner.scan() {
                Ok(connections) => connections,
                Err(error) => {
                    tracing::warn!(%error, "fallback scan failed");
                    Vec::new()
                }
            }
        }
    }

    /// Emits one cycle as JSON lines on stdout.
    #[allow(clippy::print_stdout)]
    fn emit(&self) {
        let connections = self.snapshot();
        tracing::debug!(count = connections.len(), "reporting cycle");
        for connection in &connections {
            match serde_json::to_string(connection) {
                Ok(line) => println!("{line}"),
                Err(error) => tracing::warn!(%error, "unreportable connection"),
            }
        }
    }

    /// Runs the reporting loop until ctrl-c.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => self.emit(),
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("shutting down");
                    break;
                }
            }
        }
    }
}
