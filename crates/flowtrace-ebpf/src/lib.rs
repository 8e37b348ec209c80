//! # flowtrace-ebpf
//!
//! Kernel event source boundary for the Flowtrace tracker.
//!
//! The actual instrumentation is a loadable BPF module outside this
//! process's control; this crate owns the attachment entry point and the
//! adapter that turns raw kernel records into [`flowtrace_tracker::TcpEvent`]
//! values, serialized into the tracker one call at a time.
//!
//! The `ebpf` feature flag must be enabled and the host must support
//! BPF for attachment to be available; without it, [`tracer::start_tcp_tracer`]
//! reports the source as unavailable and the probe falls back to procfs
//! scanning.

pub mod programs;
pub mod tracer;
