//! Recorded event replay.
//!
//! Feeds a JSON-lines file of [`TcpEvent`] records into the tracker, in
//! file order, as if the kernel tracer had delivered them. Useful for
//! developing against captured event streams on hosts without BPF.

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use flowtrace_common::error::{FlowtraceError, Result};
use flowtrace_tracker::{ConnectionTracker, TcpEvent};

/// Replays every event line of `path` into the tracker, marking it ready
/// first so the reporting loop drains the tracker rather than the
/// scanner.
///
/// Malformed lines are skipped with a warning; blank lines are ignored.
/// Returns the number of events applied.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn replay_events(path: &Path, tracker: &Arc<ConnectionTracker>) -> Result<usize> {
    let file = std::fs::File::open(path).map_err(|source| FlowtraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracker.mark_ready();

    let mut applied = 0;
    for (lineno, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| FlowtraceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<TcpEvent>(&line) {
            Ok(event) => {
                flowtrace_ebpf::tracer::dispatch(tracker, event);
                applied += 1;
            }
            Err(error) => {
                tracing::warn!(line = lineno + 1, %error, "skipping malformed event line");
            }
        }
    }
    tracing::info!(applied, path = %path.display(), "event replay complete");
    Ok(applied)
}
