//! TCP lifecycle tracer attachment and event dispatch.

use std::sync::Arc;

use flowtrace_common::error::{FlowtraceError, Result};
use flowtrace_tracker::{ConnectionTracker, TcpEvent};

/// Routes one kernel event into the tracker.
///
/// Events may arrive from several kernel-side CPUs; the delivery threads
/// must funnel through this function one call at a time per tracker.
pub fn dispatch(tracker: &ConnectionTracker, event: TcpEvent) {
    tracker.handle_connection(event.kind, event.tuple, event.pid, event.netns);
}

/// Attaches the TCP lifecycle tracer and begins delivering events into
/// the tracker.
///
/// On successful attachment the tracker is marked ready; if the
/// instrumentation later fails unrecoverably the delivery side marks it
/// dead and stops, and the surrounding probe switches to the fallback
/// scanner for the rest of the process lifetime.
///
/// # Errors
///
/// Returns [`FlowtraceError::TracerUnavailable`] when the build carries no
/// BPF support or the host cannot load the program; the probe treats this
/// as "use the fallback scanner", not as a fatal condition.
#[cfg(feature = "ebpf")]
pub fn start_tcp_tracer(tracker: &Arc<ConnectionTracker>) -> Result<()> {
    let _ = tracker;
    tracing::info!(
        program = crate::programs::tcp::TCP_PROGRAM_NAME,
        probes = ?[
            crate::programs::tcp::CONNECT_PROBE,
            crate::programs::tcp::ACCEPT_PROBE,
            crate::programs::tcp::CLOSE_PROBE,
        ],
        "loading tcp lifecycle tracer"
    );
    Err(FlowtraceError::TracerUnavailable {
        reason: "BPF object not embedded in this build".into(),
    })
}

/// Attaches the TCP lifecycle tracer.
///
/// # Errors
///
/// Always returns [`FlowtraceError::TracerUnavailable`] in builds without
/// the `ebpf` feature.
#[cfg(not(feature = "ebpf"))]
pub fn start_tcp_tracer(tracker: &Arc<ConnectionTracker>) -> Result<()> {
    let _ = tracker;
    tracing::debug!("tcp tracer requested but the ebpf feature is disabled");
    Err(FlowtraceError::TracerUnavailable {
        reason: "built without the ebpf feature".into(),
    })
}
