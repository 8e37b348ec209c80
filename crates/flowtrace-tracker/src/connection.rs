//! The tracked connection record.

use flowtrace_common::types::{FourTuple, NetNs};
use serde::{Deserialize, Serialize};

/// One tracked connection: the unit of state held by the tracker and
/// handed to the reporting consumer on every walk.
///
/// A record is created by the first connect or accept event for a tuple,
/// overwritten wholesale if another connect or accept arrives for the same
/// tuple before its close, moved to the closed backlog by a close event,
/// and discarded once a walk has reported it from the backlog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// The flow this record describes, as observed by this endpoint.
    pub tuple: FourTuple,
    /// Network namespace of the observing endpoint.
    pub network_namespace: NetNs,
    /// True if this endpoint accepted the connection (server side),
    /// false if it initiated it (client side).
    pub incoming: bool,
    /// PID owning the socket.
    pub pid: u32,
}
