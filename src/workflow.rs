//! Per-request orchestration: scan, record, fetch correlated history.

use crate::error::WorkflowError;
use crate::scanner::Scanner;
use crate::storage::ScanStore;
use crate::types::{SessionId, StoredScan};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// Scan `hostname`, persist the result and return every scan of the same
/// address for `session`, newest first.
///
/// The store guard is held across the insert and the history query, and
/// both run in one transaction, so the returned history always starts with
/// the record written here. The scan itself runs outside the guard.
#[instrument(skip(scanner, store, session), fields(session = %session))]
pub async fn scan_and_record(
    scanner: &Scanner,
    store: &Mutex<ScanStore>,
    session: SessionId,
    hostname: &str,
) -> Result<Vec<StoredScan>, WorkflowError> {
    let record = scanner.scan(hostname).await?.with_session(session);

    let mut guard = store.lock().await;
    let history = guard.record_and_fetch_history(&record)?;
    drop(guard);

    debug!(address = %record.address, entries = history.len(), "history loaded");
    Ok(history)
}
