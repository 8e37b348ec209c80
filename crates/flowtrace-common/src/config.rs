//! Global configuration model for the Flowtrace probe.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Cadence at which the reporting loop drains connection state.
    pub report_interval: Duration,
    /// Procfs mount point used by the fallback scanner.
    pub proc_root: PathBuf,
    /// Optional JSON-lines event file replayed into the tracker instead
    /// of attaching the kernel tracer.
    pub replay_events: Option<PathBuf>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            report_interval: Duration::from_secs(crate::constants::DEFAULT_REPORT_INTERVAL_SECS),
            proc_root: PathBuf::from(crate::constants::DEFAULT_PROC_ROOT),
            replay_events: None,
        }
    }
}
