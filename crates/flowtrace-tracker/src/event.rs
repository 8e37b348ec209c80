//! TCP lifecycle event model at the kernel source boundary.

use flowtrace_common::types::{FourTuple, NetNs};
use serde::{Deserialize, Serialize};

/// The three TCP lifecycle notifications the tracker recognizes.
///
/// This is a closed set: the adapter translating raw kernel records into
/// this type must drop any other notification kind before it reaches the
/// tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TcpEventKind {
    /// This endpoint initiated an outbound connection.
    Connect,
    /// This endpoint accepted an inbound connection.
    Accept,
    /// A previously observed connection terminated.
    Close,
}

/// A captured TCP lifecycle event.
///
/// The tuple carries the addresses and ports exactly as the kernel
/// reported them for this event: an accept is observed from the server's
/// side, with the server as `from_addr`/`from_port`. No normalization to
/// a canonical client/server order is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TcpEvent {
    /// Which lifecycle transition occurred.
    pub kind: TcpEventKind,
    /// The flow, as seen by the observing endpoint.
    pub tuple: FourTuple,
    /// PID owning the socket at the time of the event.
    pub pid: u32,
    /// Network namespace of the observing endpoint.
    pub netns: NetNs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_kind_serializes_lowercase() {
        let json = serde_json::to_string(&TcpEventKind::Accept).expect("serialize");
        assert_eq!(json, "\"accept\"");
    }

    #[test]
    fn event_deserializes_from_recorded_line() {
        let line = r#"{"kind":"connect","tuple":{"from_addr":"127.0.0.2","to_addr":"127.0.0.1","from_port":6789,"to_port":12345},"pid":43,"netns":"123456789"}"#;
        let event: TcpEvent = serde_json::from_str(line).expect("deserialize");
        assert_eq!(event.kind, TcpEventKind::Connect);
        assert_eq!(event.pid, 43);
        assert_eq!(event.tuple.from_port, 6789);
        assert_eq!(event.netns, NetNs::new("123456789"));
    }
}
