//! Configuration management for scanweb.
//!
//! Provides XDG-compliant settings discovery and the settings file format.

mod settings;

pub use settings::{AppSettings, Paths};
