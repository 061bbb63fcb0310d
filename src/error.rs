//! Error types for scanweb.
//!
//! Uses `thiserror` for ergonomic error definitions. Each layer owns its
//! own enum; the request workflow folds scan and store failures together.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while invoking the external scanner.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("no hostname given")]
    EmptyTarget,

    #[error("scan timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("scanner invocation failed: {0}")]
    Invocation(String),

    /// The tool ran, but produced nothing usable (no address or no ports).
    #[error("scan failure: {0}")]
    ScanFailure(String),
}

/// Errors raised by the scan history store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to prepare database directory: {0}")]
    Directory(String),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {}: {reason}", .path.display())]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid configuration format: {0}")]
    InvalidFormat(String),
}

/// Failures that keep the process from starting.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("'{tool}' not found on PATH: {reason}")]
    ToolMissing { tool: String, reason: String },

    #[error("scan database unavailable: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to bind {addr}: {reason}")]
    Bind { addr: String, reason: String },
}

/// Writing HTML into the response buffer failed.
#[derive(Error, Debug)]
#[error("failed to render page: {0}")]
pub struct RenderError(#[from] pub std::fmt::Error);

/// Outcome of a single request workflow.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
