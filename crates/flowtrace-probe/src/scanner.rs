//! Fallback connection scanner over procfs.
//!
//! When the kernel event tracer is unavailable or has died, the probe
//! still needs a (coarser) view of host connections. This scanner parses
//! the `/proc/net/tcp` and `/proc/net/tcp6` socket tables and synthesizes
//! tracked-connection records from the established entries.
//!
//! Procfs reports no ordering or lifecycle edges, so scanner records are
//! point-in-time snapshots: no closed backlog, pid unknown (0), and
//! directionality inferred from the listening-port set rather than
//! observed from connect/accept events.

use std::net::{Ipv4Addr, Ipv6Addr};
use std::path::PathBuf;

use flowtrace_common::constants;
use flowtrace_common::error::{FlowtraceError, Result};
use flowtrace_common::types::{FourTuple, NetNs};
use flowtrace_tracker::Connection;

/// Socket state values from the `st` column, as rendered by the kernel.
const STATE_ESTABLISHED: &str = "01";
const STATE_LISTEN: &str = "0A";

/// One parsed socket table row.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SocketEntry {
    local_addr: String,
    local_port: u16,
    remote_addr: String,
    remote_port: u16,
    state: String,
}

/// Procfs-based fallback scanner.
#[derive(Debug, Clone)]
pub struct ProcScanner {
    proc_root: PathBuf,
}

impl ProcScanner {
    /// Creates a scanner reading from the given procfs mount point.
    #[must_use]
    pub fn new(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
        }
    }

    /// Takes a point-in-time snapshot of established TCP connections.
    ///
    /// A connection whose local port is also a listening port is reported
    /// as incoming (this host accepted it); everything else as outgoing.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket tables or the namespace handle
    /// cannot be read.
    pub fn scan(&self) -> Result<Vec<Connection>> {
        let netns = self.observing_netns()?;
        let mut entries = self.read_table(constants::PROC_NET_TCP)?;
        // tcp6 is absent on hosts without IPv6; not an error.
        match self.read_table(constants::PROC_NET_TCP6) {
            Ok(v6) => entries.extend(v6),
            Err(error) => tracing::debug!(%error, "no tcp6 table"),
        }

        let listen_ports: Vec<u16> = entries
            .iter()
            .filter(|e| e.state == STATE_LISTEN)
            .map(|e| e.local_port)
            .collect();

        let connections = entries
            .into_iter()
            .filter(|e| e.state == STATE_ESTABLISHED)
            .map(|e| Connection {
                incoming: listen_ports.contains(&e.local_port),
                tuple: FourTuple::new(e.local_addr, e.remote_addr, e.local_port, e.remote_port),
                network_namespace: netns.clone(),
                pid: 0,
            })
            .collect();
        Ok(connections)
    }

    /// Namespace identifier of the scanning process, from the inode of
    /// its `ns/net` handle.
    fn observing_netns(&self) -> Result<NetNs> {
        let path = self.proc_root.join(constants::PROC_SELF_NET_NS);
        let stat = nix::sys::stat::stat(&path).map_err(|errno| FlowtraceError::Io {
            path: path.clone(),
            source: std::io::Error::from_raw_os_error(errno as i32),
        })?;
        Ok(NetNs::from_inode(stat.st_ino))
    }

    fn read_table(&self, table: &str) -> Result<Vec<SocketEntry>> {
        let path = self.proc_root.join(table);
        let content = std::fs::read_to_string(&path).map_err(|source| FlowtraceError::Io {
            path: path.clone(),
            source,
        })?;
        // Header line first, then one socket per line.
        Ok(content.lines().skip(1).filter_map(parse_line).collect())
    }
}

/// Parses one socket table row.
///
/// Row shape:
/// `sl local_address rem_address st tx_queue:rx_queue tr:tm->when retrnsmt uid timeout inode ...`
fn parse_line(line: &str) -> Option<SocketEntry> {
    let mut fields = line.split_whitespace();
    let _sl = fields.next()?;
    let (local_addr, local_port) = parse_address(fields.next()?)?;
    let (remote_addr, remote_port) = parse_address(fields.next()?)?;
    let state = fields.next()?;
    Some(SocketEntry {
        local_addr,
        local_port,
        remote_addr,
        remote_port,
        state: state.to_owned(),
    })
}

/// Parses the kernel's `HEXADDR:HEXPORT` rendering. The address is 8 hex
/// chars for IPv4 or 32 for IPv6, each 32-bit word in little-endian byte
/// order; the port is big-endian hex.
fn parse_address(field: &str) -> Option<(String, u16)> {
    let (addr, port) = field.split_once(':')?;
    let port = u16::from_str_radix(port, 16).ok()?;
    let addr = match addr.len() {
        8 => parse_hex_ipv4(addr)?,
        32 => parse_hex_ipv6(addr)?,
        _ => return None,
    };
    Some((addr, port))
}

fn parse_hex_ipv4(hex: &str) -> Option<String> {
    let word = u32::from_str_radix(hex, 16).ok()?;
    Some(Ipv4Addr::from(word.to_le_bytes()).to_string())
}

fn parse_hex_ipv6(hex: &str) -> Option<String> {
    let mut octets = [0u8; 16];
    for (i, chunk) in hex.as_bytes().chunks(8).enumerate() {
        let word = u32::from_str_radix(std::str::from_utf8(chunk).ok()?, 16).ok()?;
        octets[i * 4..i * 4 + 4].copy_from_slice(&word.to_le_bytes());
    }
    Some(Ipv6Addr::from(octets).to_string())
}
