//! End-to-end tests for the connection-tracking pipeline.
//!
//! These tests drive the tracker the way the probe does: a recorded
//! stream of kernel lifecycle events applied in order, interleaved with
//! reporting drains, verifying that:
//! 1. Client and server views of one TCP connection track independently
//! 2. Short-lived connections survive into exactly one drain
//! 3. Open connections recur across drains until closed
//! 4. The closed backlog never grows across drains

#![allow(clippy::expect_used, clippy::unwrap_used)]

use flowtrace_common::types::{FourTuple, NetNs};
use flowtrace_tracker::{Connection, ConnectionTracker, TcpEvent, TcpEventKind};

fn apply(tracker: &ConnectionTracker, event: TcpEvent) {
    tracker.handle_connection(event.kind, event.tuple, event.pid, event.netns);
}

fn drain(tracker: &ConnectionTracker) -> Vec<Connection> {
    let mut connections = Vec::new();
    tracker.walk_connections(|c| connections.push(c.clone()));
    connections
}

fn event(kind: TcpEventKind, tuple: &FourTuple, pid: u32) -> TcpEvent {
    TcpEvent {
        kind,
        tuple: tuple.clone(),
        pid,
        netns: NetNs::from_inode(123_456_789),
    }
}

// ── Dual-endpoint tracking ───────────────────────────────────────────

#[test]
fn pipeline_client_and_server_views_of_one_connection() {
    let client_view = FourTuple::new("127.0.0.2", "127.0.0.1", 6789, 12345);
    let server_view = client_view.reversed();

    let tracker = ConnectionTracker::new();
    apply(&tracker, event(TcpEventKind::Connect, &client_view, 43));
    apply(&tracker, event(TcpEventKind::Accept, &server_view, 42));

    let mut open = drain(&tracker);
    open.sort_by_key(|c| c.pid);
    assert_eq!(open.len(), 2);
    assert!(open[0].incoming, "pid 42 accepted");
    assert!(!open[1].incoming, "pid 43 connected");
    assert_eq!(open[0].tuple, server_view);
    assert_eq!(open[1].tuple, client_view);

    // Each endpoint's close only retires its own view.
    apply(&tracker, event(TcpEventKind::Close, &client_view, 43));
    let after_client_close = drain(&tracker);
    assert_eq!(after_client_close.len(), 2, "one open, one newly closed");
    assert_eq!(tracker.open_connection_count(), 1);

    apply(&tracker, event(TcpEventKind::Close, &server_view, 42));
    assert_eq!(drain(&tracker).len(), 1);
    assert_eq!(tracker.open_connection_count(), 0);
    assert!(drain(&tracker).is_empty());
}

// ── Drain semantics ──────────────────────────────────────────────────

#[test]
fn pipeline_short_lived_connection_reported_exactly_once() {
    let tuple = FourTuple::new("10.1.0.5", "93.184.216.34", 51000, 443);
    let tracker = ConnectionTracker::new();

    // Opened and closed entirely between two drains.
    apply(&tracker, event(TcpEventKind::Connect, &tuple, 7));
    apply(&tracker, event(TcpEventKind::Close, &tuple, 7));

    let first = drain(&tracker);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].tuple, tuple);
    assert!(drain(&tracker).is_empty(), "reported once, then discarded");
}

#[test]
fn pipeline_long_lived_connection_recurs_until_closed() {
    let tuple = FourTuple::new("10.1.0.5", "10.1.0.9", 40000, 5432);
    let tracker = ConnectionTracker::new();
    apply(&tracker, event(TcpEventKind::Connect, &tuple, 11));

    for _ in 0..3 {
        let cycle = drain(&tracker);
        assert_eq!(cycle.len(), 1);
        assert_eq!(cycle[0].tuple, tuple);
    }

    apply(&tracker, event(TcpEventKind::Close, &tuple, 11));
    assert_eq!(drain(&tracker).len(), 1, "final closed report");
    assert!(drain(&tracker).is_empty());
}

#[test]
fn pipeline_churn_does_not_accumulate_backlog() {
    let tracker = ConnectionTracker::new();

    for cycle in 0u16..10 {
        for port in 0u16..20 {
            let tuple = FourTuple::new("10.0.0.1", "10.0.0.2", 30000 + port, 80);
            apply(&tracker, event(TcpEventKind::Connect, &tuple, 1));
            apply(&tracker, event(TcpEventKind::Close, &tuple, 1));
        }
        let reported = drain(&tracker);
        assert_eq!(reported.len(), 20, "cycle {cycle} backlog drained");
    }
    assert_eq!(tracker.open_connection_count(), 0);
}

// ── Event replay format ──────────────────────────────────────────────

#[test]
fn pipeline_events_round_trip_through_json_lines() {
    let recorded = [
        event(
            TcpEventKind::Accept,
            &FourTuple::new("127.0.0.1", "127.0.0.2", 12345, 6789),
            42,
        ),
        event(
            TcpEventKind::Close,
            &FourTuple::new("127.0.0.1", "127.0.0.2", 12345, 6789),
            42,
        ),
    ];

    let tracker = ConnectionTracker::new();
    for original in &recorded {
        let line = serde_json::to_string(original).expect("serialize");
        let parsed: TcpEvent = serde_json::from_str(&line).expect("deserialize");
        assert_eq!(&parsed, original);
        apply(&tracker, parsed);
    }

    let reported = drain(&tracker);
    assert_eq!(reported.len(), 1);
    assert!(reported[0].incoming);
    assert_eq!(tracker.open_connection_count(), 0);
}
