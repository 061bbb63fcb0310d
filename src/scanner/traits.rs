//! Scanner backend abstraction.
//!
//! Defines the seam between the scan invoker and whatever actually probes
//! the network, so the invoker can be exercised against synthetic results.

use crate::error::ScanResult;
use crate::types::{PortEntry, PortRange};
use async_trait::async_trait;

/// One host as reported by the external tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawHost {
    /// Resolved network addresses, in the order the tool listed them.
    pub addresses: Vec<String>,
    /// Hostname labels, user-supplied name first when there is one.
    pub hostnames: Vec<String>,
    /// Every examined port the tool chose to report.
    pub ports: Vec<PortEntry>,
}

/// Everything one run of the external tool produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawScan {
    pub hosts: Vec<RawHost>,
    /// Non-fatal diagnostics printed by the tool.
    pub warnings: Vec<String>,
    /// Elapsed time reported by the tool itself, in seconds.
    pub elapsed_secs: Option<f64>,
}

/// Trait for external scan implementations.
///
/// # Example
///
/// ```ignore
/// use scanweb::scanner::{NmapBackend, ScanBackend};
/// use scanweb::types::DEFAULT_PORT_RANGE;
///
/// async fn run(backend: &NmapBackend) {
///     let raw = backend.run("scanme.nmap.org", &DEFAULT_PORT_RANGE).await;
/// }
/// ```
#[async_trait]
pub trait ScanBackend: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Scan `target` over `ports` once.
    ///
    /// Implementations do not enforce a deadline; the caller does.
    async fn run(&self, target: &str, ports: &PortRange) -> ScanResult<RawScan>;
}
