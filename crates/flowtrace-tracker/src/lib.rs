//! # flowtrace-tracker
//!
//! The connection-tracking core of the Flowtrace probe.
//!
//! Consumes kernel TCP lifecycle events (connect, accept, close) and
//! maintains a consistent view of which flows are currently open and which
//! have closed since the last consumer drain:
//! - **Event handling**: one state transition per kernel notification.
//! - **Snapshot walking**: a drain protocol exposing open flows as a
//!   recurring snapshot and closed flows as a report-once delta.
//! - **Lifecycle state**: whether the kernel event source is attached,
//!   so the surrounding probe can fall back to procfs scanning.
//!
//! The kernel event source itself lives behind the `flowtrace-ebpf`
//! boundary; this crate only defines the event shape it must deliver.

pub mod connection;
pub mod event;
pub mod tracker;

pub use connection::Connection;
pub use event::{TcpEvent, TcpEventKind};
pub use tracker::{ConnectionTracker, TrackerLifecycle};
