//! Scanner module - wraps one external scan of one target.
//!
//! The [`Scanner`] owns a [`ScanBackend`], enforces the fixed deadline,
//! bounds how many scans may run at once, and turns whatever the backend
//! reported into a [`NewScanRecord`].

pub mod grepable;
pub mod nmap;
pub mod traits;

use crate::error::{ScanError, ScanResult};
use crate::types::{NewScanRecord, PortRange, SessionId, DEFAULT_PORT_RANGE};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{info, warn};

pub use nmap::{NmapBackend, NMAP_BINARY};
pub use traits::{RawHost, RawScan, ScanBackend};

/// Hard deadline for a single scan.
pub const SCAN_TIMEOUT: Duration = Duration::from_secs(60);

/// Default number of scans allowed to run at once.
pub const DEFAULT_MAX_CONCURRENT_SCANS: usize = 4;

/// Runs scans through a backend with a deadline and a concurrency cap.
#[derive(Clone)]
pub struct Scanner {
    backend: Arc<dyn ScanBackend>,
    permits: Arc<Semaphore>,
    ports: PortRange,
    timeout: Duration,
}

impl Scanner {
    /// Create a scanner over ports 1-1000 with the 60 second deadline.
    pub fn new(backend: Arc<dyn ScanBackend>, max_concurrent: usize) -> Self {
        Self {
            backend,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
            ports: DEFAULT_PORT_RANGE,
            timeout: SCAN_TIMEOUT,
        }
    }

    /// Override the deadline.
    #[cfg(test)]
    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Scan `hostname` once and normalize the result.
    ///
    /// Waits for a free slot first; the deadline covers only the scan.
    pub async fn scan(&self, hostname: &str) -> ScanResult<NewScanRecord> {
        if hostname.is_empty() {
            return Err(ScanError::EmptyTarget);
        }

        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| ScanError::Invocation(e.to_string()))?;

        let start = Instant::now();
        let raw = tokio::time::timeout(self.timeout, self.backend.run(hostname, &self.ports))
            .await
            .map_err(|_| ScanError::Timeout(self.timeout))??;

        for warning in &raw.warnings {
            warn!(hostname, backend = self.backend.name(), "{}", warning);
        }

        let elapsed_secs = raw
            .elapsed_secs
            .unwrap_or_else(|| start.elapsed().as_secs_f64());
        let record = normalize(raw)?;

        info!(
            hostname = %record.hostname,
            address = %record.address,
            elapsed_secs,
            "scan done"
        );

        Ok(record)
    }
}

/// Turn a raw backend result into a record for the default session.
///
/// An empty address list or an empty port list means the target did not
/// resolve or could not be reached; that is a failure, not "no open ports".
pub fn normalize(raw: RawScan) -> ScanResult<NewScanRecord> {
    let host = raw
        .hosts
        .into_iter()
        .next()
        .ok_or_else(|| ScanError::ScanFailure("no host in scan output".into()))?;

    let Some(address) = host.addresses.first() else {
        return Err(ScanError::ScanFailure("no address resolved".into()));
    };
    if host.ports.is_empty() {
        return Err(ScanError::ScanFailure(format!(
            "no ports examined on {address}"
        )));
    }

    let hostname = host.hostnames.first().unwrap_or(address);

    Ok(NewScanRecord::new(
        SessionId::DEFAULT,
        hostname.as_str(),
        address.as_str(),
        &host.ports,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Port, PortEntry, Protocol};
    use async_trait::async_trait;

    struct FixedBackend(RawScan);

    #[async_trait]
    impl ScanBackend for FixedBackend {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn run(&self, _target: &str, _ports: &PortRange) -> ScanResult<RawScan> {
            Ok(self.0.clone())
        }
    }

    struct SlowBackend;

    #[async_trait]
    impl ScanBackend for SlowBackend {
        fn name(&self) -> &str {
            "slow"
        }

        async fn run(&self, _target: &str, _ports: &PortRange) -> ScanResult<RawScan> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(RawScan::default())
        }
    }

    fn web_host() -> RawHost {
        RawHost {
            addresses: vec!["93.184.216.34".into(), "2606:2800:220:1::".into()],
            hostnames: vec!["example.com".into(), "edge.example.net".into()],
            ports: vec![
                PortEntry::new(Port::new(80).unwrap(), Protocol::Tcp, "open", "http"),
                PortEntry::new(Port::new(443).unwrap(), Protocol::Tcp, "open", "https"),
            ],
        }
    }

    fn raw(host: RawHost) -> RawScan {
        RawScan {
            hosts: vec![host],
            ..RawScan::default()
        }
    }

    #[test]
    fn test_normalize_two_ports() {
        let record = normalize(raw(web_host())).unwrap();
        assert_eq!(record.session_id, SessionId::DEFAULT);
        assert_eq!(record.hostname, "example.com");
        assert_eq!(record.address, "93.184.216.34");
        assert_eq!(
            record.ports,
            "Port 80/tcp open http\nPort 443/tcp open https\n"
        );
    }

    #[test]
    fn test_normalize_without_hostname_uses_address() {
        let host = RawHost {
            hostnames: vec![],
            ..web_host()
        };
        assert_eq!(normalize(raw(host)).unwrap().hostname, "93.184.216.34");
    }

    #[test]
    fn test_no_ports_is_scan_failure() {
        let host = RawHost {
            ports: vec![],
            ..web_host()
        };
        assert!(matches!(
            normalize(raw(host)),
            Err(ScanError::ScanFailure(_))
        ));
    }

    #[test]
    fn test_no_address_is_scan_failure() {
        let host = RawHost {
            addresses: vec![],
            ..web_host()
        };
        assert!(matches!(
            normalize(raw(host)),
            Err(ScanError::ScanFailure(_))
        ));
    }

    #[test]
    fn test_no_hosts_is_scan_failure() {
        assert!(matches!(
            normalize(RawScan::default()),
            Err(ScanError::ScanFailure(_))
        ));
    }

    #[tokio::test]
    async fn test_scan_through_backend() {
        let scanner = Scanner::new(Arc::new(FixedBackend(raw(web_host()))), 1);
        let record = scanner.scan("example.com").await.unwrap();
        assert_eq!(record.address, "93.184.216.34");
        assert_eq!(scanner.backend_name(), "fixed");
    }

    #[tokio::test]
    async fn test_empty_hostname_rejected() {
        let scanner = Scanner::new(Arc::new(FixedBackend(raw(web_host()))), 1);
        assert!(matches!(
            scanner.scan("").await,
            Err(ScanError::EmptyTarget)
        ));
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let scanner =
            Scanner::new(Arc::new(SlowBackend), 1).with_timeout(Duration::from_millis(10));
        let err = scanner.scan("example.com").await.unwrap_err();
        assert!(matches!(err, ScanError::Timeout(t) if t == Duration::from_millis(10)));
    }
}
