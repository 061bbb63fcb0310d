//! Core type definitions using newtype patterns for type safety.

mod port;
mod record;

pub use port::{Port, PortEntry, PortError, PortRange, Protocol, DEFAULT_PORT_RANGE};
pub use record::{format_ports, NewScanRecord, SessionId, StoredScan};
