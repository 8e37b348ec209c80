//! eBPF program definitions.
//!
//! Contains the BPF programs that are loaded into the kernel
//! to observe TCP lifecycle transitions.

pub mod tcp;
