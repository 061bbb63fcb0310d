//! History table definition and reset policy.

use crate::error::StoreResult;
use rusqlite::Connection;
use tracing::{debug, warn};

const DROP_SQL: &str = "DROP TABLE IF EXISTS scanhistory;";

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS scanhistory (
    id        INTEGER PRIMARY KEY AUTOINCREMENT,
    sid       INTEGER NOT NULL,
    hostname  TEXT NOT NULL,
    address   TEXT NOT NULL,
    timestamp INTEGER NOT NULL,
    ports     TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_scanhistory_key ON scanhistory(sid, address);
"#;

/// What to do with existing history when the store is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetPolicy {
    /// Drop and recreate the table, discarding every prior scan.
    #[default]
    Fresh,
    /// Keep whatever history the database already holds.
    Preserve,
}

/// Create the schema, dropping the existing table first under `Fresh`.
pub fn initialize(conn: &Connection, reset: ResetPolicy) -> StoreResult<()> {
    if reset == ResetPolicy::Fresh {
        warn!("discarding previous scan history");
        conn.execute_batch(DROP_SQL)?;
    }
    conn.execute_batch(SCHEMA_SQL)?;
    debug!(?reset, "scan history schema ready");
    Ok(())
}
