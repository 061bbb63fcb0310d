//! Application settings and paths.
//!
//! Settings come from a JSON file (explicit `--config`, or `settings.json`
//! in the XDG config directory); command-line flags override them.

use crate::error::{ConfigError, ConfigResult};
use crate::scanner::{DEFAULT_MAX_CONCURRENT_SCANS, NMAP_BINARY};
use crate::storage::ResetPolicy;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Application directory paths following XDG Base Directory Specification.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Configuration directory (~/.config/scanweb)
    pub config_dir: PathBuf,
}

impl Paths {
    /// Resolve the XDG directories. Nothing is created on disk.
    pub fn discover() -> ConfigResult<Self> {
        let project = ProjectDirs::from("com", "scanweb", "scanweb")
            .ok_or(ConfigError::DirectoryNotFound)?;

        Ok(Self {
            config_dir: project.config_dir().to_path_buf(),
        })
    }

    /// Get the path to the settings file.
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,
    /// SQLite file holding the scan history.
    pub database: PathBuf,
    /// nmap binary name or path.
    pub nmap: PathBuf,
    /// Keep history across restarts instead of resetting the table.
    pub keep_history: bool,
    /// Maximum number of scans running at once.
    pub max_concurrent_scans: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            database: PathBuf::from("./scan.db"),
            nmap: PathBuf::from(NMAP_BINARY),
            keep_history: false,
            max_concurrent_scans: DEFAULT_MAX_CONCURRENT_SCANS,
        }
    }
}

impl AppSettings {
    /// Load settings from the default location, falling back to defaults
    /// when no settings file exists.
    pub fn load() -> ConfigResult<Self> {
        let file = Paths::discover()?.settings_file();
        if !file.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&file)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))
    }

    /// How the store should treat existing history at startup.
    pub fn reset_policy(&self) -> ResetPolicy {
        if self.keep_history {
            ResetPolicy::Preserve
        } else {
            ResetPolicy::Fresh
        }
    }
}
