//! System-wide constants and default paths.

/// Default cadence, in seconds, at which the reporting loop drains the
/// tracker (or the fallback scanner).
pub const DEFAULT_REPORT_INTERVAL_SECS: u64 = 3;

/// Default procfs mount point used by the fallback scanner.
pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// IPv4 TCP socket table, relative to the procfs root.
pub const PROC_NET_TCP: &str = "net/tcp";

/// IPv6 TCP socket table, relative to the procfs root.
pub const PROC_NET_TCP6: &str = "net/tcp6";

/// Network namespace handle of the calling process, relative to the
/// procfs root. Its inode is the namespace identifier attached to
/// scanner-observed connections.
pub const PROC_SELF_NET_NS: &str = "self/ns/net";

/// Application name used in log output.
pub const APP_NAME: &str = "flowtrace";

/// Binary name for the probe.
pub const BIN_NAME: &str = "flowtrace";
