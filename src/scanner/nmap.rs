//! nmap child-process backend.
//!
//! Runs `nmap -p <range> -oG - -- <target>` and parses the grepable output.
//! The child is killed if the future driving it is dropped, which is how
//! the invoker's deadline tears a slow scan down.

use super::grepable;
use super::traits::{RawScan, ScanBackend};
use crate::error::{ScanError, ScanResult};
use crate::types::PortRange;
use async_trait::async_trait;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Default binary name looked up on `PATH`.
pub const NMAP_BINARY: &str = "nmap";

/// Scans by shelling out to nmap.
#[derive(Debug, Clone)]
pub struct NmapBackend {
    binary: PathBuf,
}

impl NmapBackend {
    /// Use an already-resolved nmap binary.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Resolve `name` (a bare name or a path) to an executable.
    pub fn locate(name: impl AsRef<Path>) -> Result<Self, which::Error> {
        let binary = which::which(name.as_ref())?;
        Ok(Self::new(binary))
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

#[async_trait]
impl ScanBackend for NmapBackend {
    fn name(&self) -> &str {
        NMAP_BINARY
    }

    async fn run(&self, target: &str, ports: &PortRange) -> ScanResult<RawScan> {
        let port_arg = ports.to_string();
        debug!(binary = %self.binary.display(), target, ports = %port_arg, "spawning nmap");

        let output = Command::new(&self.binary)
            .args(["-p", port_arg.as_str(), "-oG", "-", "--", target])
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                ScanError::Invocation(format!("failed to run {}: {e}", self.binary.display()))
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(ScanError::Invocation(format!(
                "nmap exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut scan = grepable::parse(&stdout);
        scan.warnings = stderr
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        label_target(&mut scan, target);
        Ok(scan)
    }
}

/// Grepable output only carries the reverse-DNS name; put the name the user
/// asked for in front of it when it named exactly one host.
fn label_target(scan: &mut RawScan, target: &str) {
    if !is_plain_hostname(target) {
        return;
    }
    if let [host] = scan.hosts.as_mut_slice() {
        host.hostnames.retain(|h| h != target);
        host.hostnames.insert(0, target.to_string());
    }
}

/// True for `example.com` and `localhost`; false for addresses, CIDR
/// blocks, octet ranges (`10.0.0.1-5`) and lists.
fn is_plain_hostname(target: &str) -> bool {
    if target.parse::<IpAddr>().is_ok() {
        return false;
    }
    if target.contains(['/', ',', '*', ' ']) {
        return false;
    }
    // Top-level labels are never numeric.
    target
        .trim_end_matches('.')
        .rsplit('.')
        .next()
        .is_some_and(|tld| tld.chars().any(|c| c.is_ascii_alphabetic()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_PORT_RANGE;

    #[tokio::test]
    async fn test_missing_binary_is_invocation_error() {
        let backend = NmapBackend::new("/nonexistent/bin/nmap-does-not-exist");
        let err = backend
            .run("localhost", &DEFAULT_PORT_RANGE)
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::Invocation(_)));
    }

    const TWO_HOSTS: &str = "Host: 10.0.0.1 (gw.lan)\tPorts: 53/open/tcp//domain///\n\
Host: 10.0.0.7 ()\tPorts: 22/open/tcp//ssh///\n";

    const ONE_HOST: &str = "Host: 93.184.216.34 (edge.example.net)\tPorts: 80/open/tcp//http///\n";

    #[test]
    fn test_hostname_target_labels_its_host() {
        let mut scan = grepable::parse(ONE_HOST);
        label_target(&mut scan, "example.com");
        assert_eq!(scan.hosts[0].hostnames, vec!["example.com", "edge.example.net"]);
    }

    #[test]
    fn test_network_targets_keep_reported_names() {
        for target in ["10.0.0.0/24", "10.0.0.1-7", "10.0.0.1,7", "93.184.216.34"] {
            let mut scan = grepable::parse(TWO_HOSTS);
            label_target(&mut scan, target);
            assert_eq!(scan.hosts[0].hostnames, vec!["gw.lan"], "{target}");
            assert!(scan.hosts[1].hostnames.is_empty(), "{target}");
        }

        let mut scan = grepable::parse(ONE_HOST);
        label_target(&mut scan, "93.184.216.0/28");
        assert_eq!(scan.hosts[0].hostnames, vec!["edge.example.net"]);
    }

    #[test]
    fn test_hostname_with_several_hosts_is_not_applied() {
        let mut scan = grepable::parse(TWO_HOSTS);
        label_target(&mut scan, "lan.example");
        assert_eq!(scan.hosts[0].hostnames, vec!["gw.lan"]);
    }

    #[test]
    fn test_locate_unknown_binary_fails() {
        assert!(NmapBackend::locate("definitely-not-an-installed-scanner-binary").is_err());
    }
}
