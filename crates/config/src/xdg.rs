//! XDG Base Directory support for paneorg.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "paneorg";

/// Get the configuration directory following XDG conventions.
///
/// Returns `$XDG_CONFIG_HOME/paneorg` or `~/.config/paneorg`.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME))
        .context("Failed to determine config directory")
}

/// Get the cache directory following XDG conventions.
///
/// Returns `$XDG_CACHE_HOME/paneorg` or `~/.cache/paneorg`.
pub fn get_cache_dir() -> Result<PathBuf> {
    dirs::cache_dir()
        .map(|p| p.join(APP_NAME))
        .context("Failed to determine cache directory")
}
