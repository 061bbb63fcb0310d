//! Command-line interface definitions for scanweb.
//!
//! Uses `clap` derive macros for declarative argument parsing. Every flag
//! is optional and overrides the matching entry in the settings file.

use crate::config::AppSettings;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Web front-end for nmap that keeps a per-address scan history.
#[derive(Parser, Debug)]
#[command(name = "scanweb")]
#[command(author = "HueCodes <huecodes@proton.me>")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scan hosts with nmap from a browser and keep the history", long_about = None)]
pub struct Cli {
    /// Address to listen on
    #[arg(short, long, value_name = "ADDR", env = "SCANWEB_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// SQLite database holding the scan history
    #[arg(short, long, value_name = "PATH", env = "SCANWEB_DATABASE")]
    pub database: Option<PathBuf>,

    /// Keep the existing scan history instead of resetting it on startup
    #[arg(long)]
    pub keep_history: bool,

    /// nmap binary name or path
    #[arg(long, value_name = "PATH")]
    pub nmap: Option<PathBuf>,

    /// Maximum number of scans running at once
    #[arg(long = "max-scans", value_name = "N")]
    pub max_scans: Option<usize>,

    /// Path to custom configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Apply command-line overrides on top of file settings.
    pub fn apply(&self, mut settings: AppSettings) -> AppSettings {
        if let Some(addr) = self.listen {
            settings.listen_addr = addr;
        }
        if let Some(ref path) = self.database {
            settings.database = path.clone();
        }
        if self.keep_history {
            settings.keep_history = true;
        }
        if let Some(ref nmap) = self.nmap {
            settings.nmap = nmap.clone();
        }
        if let Some(n) = self.max_scans {
            settings.max_concurrent_scans = n;
        }
        settings
    }

    /// Default log filter for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "scanweb=debug,tower_http=debug,info"
        } else if self.quiet {
            "warn"
        } else {
            "scanweb=info,warn"
        }
    }
}
