//! Scan result persistence.
//!
//! Provides an SQLite-backed, append-only history of scans with a
//! correlated lookup by `(session, address)`.

mod schema;
mod sqlite_store;

pub use schema::ResetPolicy;
pub use sqlite_store::ScanStore;
