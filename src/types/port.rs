//! Port types with validation and formatting.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortRange` is what gets handed to the scanner as its `-p` argument, and
//! `PortEntry` is one line of a finished scan.

use std::fmt;
use std::str::FromStr;

/// A validated network port number (1-65535).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PortError::OutOfRange(value))
    }
}

impl FromStr for Port {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: u16 = s
            .trim()
            .parse()
            .map_err(|_| PortError::InvalidFormat(s.to_string()))?;
        raw.try_into()
    }
}

/// Error type for port parsing and validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u16),
    #[error("invalid port number: {0}")]
    InvalidFormat(String),
}

/// A range of ports (inclusive), rendered as nmap's `-p` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    start: Port,
    end: Port,
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// The range every scan covers: ports 1 through 1000.
pub const DEFAULT_PORT_RANGE: PortRange = PortRange {
    start: Port(1),
    end: Port(1000),
};

/// Transport protocol of a scanned port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Tcp,
    Udp,
    Sctp,
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp => write!(f, "tcp"),
            Self::Udp => write!(f, "udp"),
            Self::Sctp => write!(f, "sctp"),
        }
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tcp" => Ok(Self::Tcp),
            "udp" => Ok(Self::Udp),
            "sctp" => Ok(Self::Sctp),
            _ => Err(format!("unknown protocol: {}", s)),
        }
    }
}

/// One examined port as reported by the scanner.
///
/// The state is kept verbatim (`open`, `closed`, `filtered`,
/// `open|filtered`, ...) since the external tool owns that vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortEntry {
    pub port: Port,
    pub protocol: Protocol,
    pub state: String,
    pub service: String,
}

impl PortEntry {
    pub fn new(
        port: Port,
        protocol: Protocol,
        state: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            port,
            protocol,
            state: state.into(),
            service: service.into(),
        }
    }
}

impl fmt::Display for PortEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Port {}/{} {} {}",
            self.port, self.protocol, self.state, self.service
        )
    }
}
