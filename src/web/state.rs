//! Shared application state.

use crate::scanner::Scanner;
use crate::storage::ScanStore;
use crate::types::SessionId;
use tokio::sync::Mutex;

/// Everything a request handler needs, shared behind an `Arc`.
pub struct AppState {
    pub scanner: Scanner,
    /// The one store handle; its guard spans each insert + history query.
    pub store: Mutex<ScanStore>,
    /// Session every request is attributed to.
    pub session: SessionId,
}

impl AppState {
    pub fn new(scanner: Scanner, store: ScanStore) -> Self {
        Self {
            scanner,
            store: Mutex::new(store),
            session: SessionId::DEFAULT,
        }
    }

    /// State over an in-memory database (for testing).
    pub fn new_in_memory(scanner: Scanner) -> crate::error::StoreResult<Self> {
        Ok(Self::new(scanner, ScanStore::open_in_memory()?))
    }
}
