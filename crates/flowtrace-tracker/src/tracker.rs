//! The connection tracker: store, event handler, and snapshot walker.
//!
//! Two roles touch a tracker concurrently: an ingestion role applying one
//! kernel event at a time, and a reporting role draining the state on its
//! own timer. All shared state sits behind one instance-scoped mutex, and
//! a walk holds it for the whole pass so a racing close can never make a
//! record visible zero or two times.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use flowtrace_common::types::{FourTuple, NetNs};

use crate::connection::Connection;
use crate::event::TcpEventKind;

/// Attachment state of the kernel event source feeding a tracker.
///
/// `Dead` is terminal and structurally implies not ready: once the source
/// has failed, the probe switches to the fallback scanner for the rest of
/// the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerLifecycle {
    /// The event source has not finished attaching; no events flow yet.
    Uninitialized,
    /// The event source is attached and delivering events.
    Ready,
    /// The event source failed unrecoverably.
    Dead,
}

#[derive(Debug)]
struct TrackerState {
    lifecycle: TrackerLifecycle,
    /// Open flows, keyed by the tuple's canonical string form.
    open_connections: HashMap<String, Connection>,
    /// Flows closed since the last walk, in close order.
    closed_connections: Vec<Connection>,
}

/// Tracks open and recently-closed TCP connections from kernel lifecycle
/// events.
///
/// The tracker never errors: anomalous input (a close for a flow never
/// seen open, a duplicate connect) is absorbed into the state transition.
/// Failure of the event source is signalled out of band through
/// [`TrackerLifecycle`], which the surrounding probe reads to decide
/// whether to rely on this tracker at all; the tracker itself never
/// consults it.
#[derive(Debug)]
pub struct ConnectionTracker {
    state: Mutex<TrackerState>,
}

impl ConnectionTracker {
    /// Creates an empty tracker in the `Uninitialized` lifecycle state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TrackerState {
                lifecycle: TrackerLifecycle::Uninitialized,
                open_connections: HashMap::new(),
                closed_connections: Vec::new(),
            }),
        }
    }

    // A panic inside a walk callback leaves the state consistent (the
    // backlog simply wasn't cleared and re-drains next walk), so a
    // poisoned lock is safe to enter.
    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies one kernel TCP lifecycle event to the store.
    ///
    /// Connect and accept insert a record at the tuple's key, overwriting
    /// any record already there (last write wins). Close moves the record
    /// at the key, if any, to the closed backlog; a close for an unknown
    /// tuple only guarantees the open map does not contain it afterwards —
    /// no synthetic closed entry is recorded, so consumers never see a
    /// close for a flow they were never shown open.
    pub fn handle_connection(&self, kind: TcpEventKind, tuple: FourTuple, pid: u32, netns: NetNs) {
        let key = tuple.to_string();
        let mut state = self.lock();
        match kind {
            TcpEventKind::Connect | TcpEventKind::Accept => {
                let connection = Connection {
                    tuple,
                    network_namespace: netns,
                    incoming: kind == TcpEventKind::Accept,
                    pid,
                };
                tracing::trace!(%key, incoming = connection.incoming, pid, "open");
                let _ = state.open_connections.insert(key, connection);
            }
            TcpEventKind::Close => match state.open_connections.remove(&key) {
                Some(connection) => {
                    tracing::trace!(%key, pid, "close");
                    state.closed_connections.push(connection);
                }
                None => {
                    tracing::debug!(%key, pid, "close for unknown tuple, dropping");
                }
            },
        }
    }

    /// Visits every open and every closed connection exactly once, then
    /// clears the closed backlog.
    ///
    /// Open connections recur on every walk until closed; closed
    /// connections are reported on exactly one walk. The lock is held for
    /// the whole pass, callback invocations included, so the visited set
    /// is a consistent snapshot. Callbacks must therefore be quick and
    /// must not call back into the tracker.
    pub fn walk_connections(&self, mut visit: impl FnMut(&Connection)) {
        let mut state = self.lock();
        for connection in state.open_connections.values() {
            visit(connection);
        }
        for connection in &state.closed_connections {
            visit(connection);
        }
        state.closed_connections.clear();
    }

    /// Marks the kernel event source as attached and delivering.
    ///
    /// Only leaves `Uninitialized`; a dead tracker stays dead.
    pub fn mark_ready(&self) {
        let mut state = self.lock();
        if state.lifecycle == TrackerLifecycle::Uninitialized {
            state.lifecycle = TrackerLifecycle::Ready;
        }
    }

    /// Marks the kernel event source as unrecoverably failed. Terminal.
    pub fn mark_dead(&self) {
        self.lock().lifecycle = TrackerLifecycle::Dead;
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn lifecycle(&self) -> TrackerLifecycle {
        self.lock().lifecycle
    }

    /// Whether the event source is attached and the tracker is usable.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.lifecycle() == TrackerLifecycle::Ready
    }

    /// Whether the event source has permanently failed.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.lifecycle() == TrackerLifecycle::Dead
    }

    /// Number of currently open connections.
    #[must_use]
    pub fn open_connection_count(&self) -> usize {
        self.lock().open_connections.len()
    }
}

impl Default for ConnectionTracker {
    fn default() -> Self {
        Self::new()
    }
}
