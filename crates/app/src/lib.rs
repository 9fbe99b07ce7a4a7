//! Application orchestrator for paneorg.
//!
//! This crate ties the other crates together and provides:
//! - `App` struct - the in-memory editor with the organizer attached
//! - `init_logging` - logger setup from configuration
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        paneorg (bin)                             │
//! │  main.rs - argument parsing, config loading, output             │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//!                                ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    paneorg-app (this crate)                      │
//! │  App, event dispatch, main queue draining, fs watching          │
//! └─────────────────────────────────────────────────────────────────┘
//!            │              │              │              │
//!            ▼              ▼              ▼              ▼
//!     ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────┐
//!     │  layout  │  │organizer │  │scheduler │  │ watcher  │
//!     └──────────┘  └──────────┘  └──────────┘  └──────────┘
//! ```

pub mod app;

pub use app::{read_document, App, TICK_MS};

use paneorg_config::Config;
use paneorg_logger::LogLevel;

/// Initialize the global logger from configuration.
///
/// Falls back to the cache directory when no log file is configured, and
/// to `info` when the configured level is not recognized.
pub fn init_logging(config: &Config) {
    let file_path = config
        .logging
        .file_path
        .as_ref()
        .map(std::path::PathBuf::from)
        .or_else(|| Config::default_log_file_path().ok());

    let min_level = config
        .logging
        .min_level
        .parse::<LogLevel>()
        .unwrap_or(LogLevel::Info);

    paneorg_logger::init(file_path, config.logging.max_entries, min_level);
    paneorg_logger::info(format!("paneorg v{} started", env!("CARGO_PKG_VERSION")));
}
