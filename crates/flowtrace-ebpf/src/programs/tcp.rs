//! TCP lifecycle tracing eBPF program.
//!
//! Defines the BPF program attached to the connect/accept/close kprobes.

/// Placeholder for the compiled eBPF TCP tracing program.
/// The actual BPF bytecode will be embedded at build time via `aya`.
pub const TCP_PROGRAM_NAME: &str = "flowtrace_tcp_trace";

/// Kprobe observing outbound connection establishment.
pub const CONNECT_PROBE: &str = "tcp_v4_connect";

/// Kprobe observing inbound connection acceptance.
pub const ACCEPT_PROBE: &str = "inet_csk_accept";

/// Kprobe observing connection teardown.
pub const CLOSE_PROBE: &str = "tcp_close";
