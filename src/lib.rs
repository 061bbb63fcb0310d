//! # scanweb - a browser front-end for nmap with scan history
//!
//! scanweb serves a single page with a hostname form. Submitting it runs
//! one nmap scan of ports 1-1000, appends the result to an SQLite history
//! table and renders every earlier scan of the same address underneath,
//! newest first.
//!
//! ## Architecture
//!
//! - [`types`] - Ports, port entries and scan records
//! - [`scanner`] - The scan invoker and its nmap backend
//! - [`storage`] - Append-only scan history in SQLite
//! - [`workflow`] - Scan, record and fetch history for one request
//! - [`web`] - axum router, handlers and HTML rendering
//! - [`config`] - Settings file and XDG paths
//! - [`error`] - Error types per layer
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use scanweb::scanner::{NmapBackend, Scanner};
//! use scanweb::storage::{ResetPolicy, ScanStore};
//! use scanweb::web::{self, AppState};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let scanner = Scanner::new(Arc::new(NmapBackend::locate("nmap")?), 4);
//!     let store = ScanStore::initialize("scan.db".as_ref(), ResetPolicy::Preserve)?;
//!     let state = Arc::new(AppState::new(scanner, store));
//!     web::serve("127.0.0.1:8080".parse()?, state).await
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod services;
pub mod storage;
pub mod types;
pub mod web;
pub mod workflow;

// Re-export commonly used types
pub use error::{ScanError, StoreError, WorkflowError};
pub use scanner::{ScanBackend, Scanner};
pub use storage::{ResetPolicy, ScanStore};
pub use types::{NewScanRecord, SessionId, StoredScan};
