//! Scan records as they flow from the scanner into the history table.

use super::PortEntry;
use chrono::{DateTime, Utc};
use std::fmt;

/// Caller/session discriminator for history lookups.
///
/// Only the implicit session `0` is used today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SessionId(i64);

impl SessionId {
    /// The single implicit session every request belongs to.
    pub const DEFAULT: SessionId = SessionId(0);

    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A completed scan that has not been persisted yet.
///
/// There is deliberately no timestamp here: the store stamps rows itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScanRecord {
    pub session_id: SessionId,
    pub hostname: String,
    pub address: String,
    pub ports: String,
}

impl NewScanRecord {
    /// Build a record from a normalized scan.
    pub fn new(
        session_id: SessionId,
        hostname: impl Into<String>,
        address: impl Into<String>,
        ports: &[PortEntry],
    ) -> Self {
        Self {
            session_id,
            hostname: hostname.into(),
            address: address.into(),
            ports: format_ports(ports),
        }
    }

    /// Override the session this record belongs to.
    pub fn with_session(mut self, session_id: SessionId) -> Self {
        self.session_id = session_id;
        self
    }
}

/// A row read back from the history table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredScan {
    pub id: i64,
    pub session_id: SessionId,
    pub hostname: String,
    pub address: String,
    /// Seconds since the Unix epoch, assigned at insert time.
    pub timestamp: i64,
    pub ports: String,
}

impl StoredScan {
    /// The insertion time as a UTC datetime, if representable.
    pub fn scanned_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }

    /// Iterate over the individual port lines.
    pub fn port_lines(&self) -> impl Iterator<Item = &str> {
        self.ports.lines().filter(|line| !line.is_empty())
    }
}

/// Join port entries into the persisted text form, one line per port.
pub fn format_ports(ports: &[PortEntry]) -> String {
    let mut out = String::new();
    for entry in ports {
        out.push_str(&entry.to_string());
        out.push('\n');
    }
    out
}
