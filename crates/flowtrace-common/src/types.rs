//! Domain primitive types used across the Flowtrace workspace.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four-field identifier of a directed network flow, as observed from
/// one endpoint: source address, destination address, source port,
/// destination port.
///
/// Directionality is part of the identity. The same logical TCP connection
/// seen from the client's connect and from the server's accept yields two
/// distinct tuples, because from/to are swapped between the two views.
///
/// Addresses are kept in the textual form reported by the kernel event
/// (IPv4 or IPv6); no canonicalization is applied. The [`fmt::Display`]
/// rendering is deterministic and is used as the sole lookup key for a
/// tracked flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FourTuple {
    /// Source address of the flow, as text.
    pub from_addr: String,
    /// Destination address of the flow, as text.
    pub to_addr: String,
    /// Source port.
    pub from_port: u16,
    /// Destination port.
    pub to_port: u16,
}

impl FourTuple {
    /// Creates a tuple from its four fields.
    #[must_use]
    pub fn new(
        from_addr: impl Into<String>,
        to_addr: impl Into<String>,
        from_port: u16,
        to_port: u16,
    ) -> Self {
        Self {
            from_addr: from_addr.into(),
            to_addr: to_addr.into(),
            from_port,
            to_port,
        }
    }

    /// Returns the same flow seen from the opposite endpoint.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            from_addr: self.to_addr.clone(),
            to_addr: self.from_addr.clone(),
            from_port: self.to_port,
            to_port: self.from_port,
        }
    }
}

impl fmt::Display for FourTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.from_addr, self.from_port, self.to_addr, self.to_port
        )
    }
}

/// Identifier of the network namespace a flow was observed in, rendered as
/// the decimal namespace inode.
///
/// Relevant on multi-tenant hosts: the same address/port tuple can exist
/// independently in several container namespaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetNs(String);

impl NetNs {
    /// Creates a namespace identifier from an already-rendered string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a namespace identifier from a raw namespace inode number.
    #[must_use]
    pub fn from_inode(inode: u64) -> Self {
        Self(inode.to_string())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetNs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
