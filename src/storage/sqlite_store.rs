//! SQLite-backed scan history.
//!
//! An append-only log: rows are inserted once and read back by correlation
//! key `(sid, address)`. There is no update or delete path.

use super::schema::{self, ResetPolicy};
use crate::error::{StoreError, StoreResult};
use crate::types::{NewScanRecord, SessionId, StoredScan};
use rusqlite::{params, Connection, Row};
use std::path::Path;
use tracing::debug;

const INSERT_SQL: &str = "INSERT INTO scanhistory(sid, hostname, address, timestamp, ports) \
     VALUES (?1, ?2, ?3, unixepoch(), ?4)";

const SELECT_BY_ID_SQL: &str =
    "SELECT id, sid, hostname, address, timestamp, ports FROM scanhistory WHERE id = ?1";

const SELECT_HISTORY_SQL: &str = "SELECT id, sid, hostname, address, timestamp, ports \
     FROM scanhistory WHERE sid = ?1 AND address = ?2 \
     ORDER BY timestamp DESC, id DESC";

/// Persistent scan history backed by SQLite.
pub struct ScanStore {
    conn: Connection,
}

impl ScanStore {
    /// Open (or create) the database at `path` and apply the reset policy.
    pub fn initialize(path: &Path, reset: ResetPolicy) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Directory(format!("{}: {e}", parent.display()))
                })?;
            }
        }
        let conn = Connection::open(path)?;
        schema::initialize(&conn, reset)?;
        debug!(path = %path.display(), "scan database opened");
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        schema::initialize(&conn, ResetPolicy::Preserve)?;
        Ok(Self { conn })
    }

    /// Append one record. The row is stamped with the database clock.
    pub fn insert(&self, record: &NewScanRecord) -> StoreResult<StoredScan> {
        insert_row(&self.conn, record)
    }

    /// All scans for `(session_id, address)`, most recent first.
    ///
    /// Returns an empty vector when nothing matches.
    pub fn query_history(
        &self,
        session_id: SessionId,
        address: &str,
    ) -> StoreResult<Vec<StoredScan>> {
        select_history(&self.conn, session_id, address)
    }

    /// Insert `record` and read back its history in one transaction.
    ///
    /// The freshly inserted row is always the first element.
    pub fn record_and_fetch_history(
        &mut self,
        record: &NewScanRecord,
    ) -> StoreResult<Vec<StoredScan>> {
        let tx = self.conn.transaction()?;
        let stored = insert_row(&tx, record)?;
        let history = select_history(&tx, stored.session_id, &stored.address)?;
        tx.commit()?;
        debug!(
            id = stored.id,
            address = %stored.address,
            entries = history.len(),
            "scan recorded"
        );
        Ok(history)
    }

    /// Total number of stored scans.
    pub fn count(&self) -> StoreResult<u64> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM scanhistory", [], |row| row.get(0))?;
        Ok(n as u64)
    }
}

fn insert_row(conn: &Connection, record: &NewScanRecord) -> StoreResult<StoredScan> {
    conn.execute(
        INSERT_SQL,
        params![
            record.session_id.as_i64(),
            record.hostname,
            record.address,
            record.ports
        ],
    )?;
    let id = conn.last_insert_rowid();
    let stored = conn.query_row(SELECT_BY_ID_SQL, params![id], row_to_scan)?;
    Ok(stored)
}

fn select_history(
    conn: &Connection,
    session_id: SessionId,
    address: &str,
) -> StoreResult<Vec<StoredScan>> {
    let mut stmt = conn.prepare_cached(SELECT_HISTORY_SQL)?;
    let rows = stmt.query_map(params![session_id.as_i64(), address], row_to_scan)?;
    let mut history = Vec::new();
    for row in rows {
        history.push(row?);
    }
    Ok(history)
}

fn row_to_scan(row: &Row<'_>) -> rusqlite::Result<StoredScan> {
    Ok(StoredScan {
        id: row.get(0)?,
        session_id: SessionId::new(row.get(1)?),
        hostname: row.get(2)?,
        address: row.get(3)?,
        timestamp: row.get(4)?,
        ports: row.get(5)?,
    })
}
