//! Configuration management for paneorg.
//!
//! This crate provides configuration loading, saving, and validation
//! with support for TOML format and XDG directory conventions.

mod settings;
mod xdg;

pub use settings::{Config, LoggingSettings, OrganizerSettings};
pub use xdg::{get_cache_dir, get_config_dir};

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const IMPLEMENTATION_EXTENSIONS: &[&str] = &["cpp"];
    pub const HEADER_EXTENSIONS: &[&str] = &["h"];
    pub const TEMPLATE_MARKERS: &[&str] = &[
        "$NAME$",
        "$PCH$",
        "HEADER",
        "$COPYRIGHT_LINE$",
        "$BASE_CLASS_INCLUDE_DIRECTIVE$",
        "$PUBLIC_HEADER_INCLUDES$",
    ];
    pub const TEMPLATE_DELAY_MS: u64 = 2000;
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const MAX_LOG_ENTRIES: usize = 1000;
}

impl Config {
    /// Load configuration from the default config file.
    ///
    /// On first run, creates the config file with default values.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path.
    ///
    /// A missing file is created with default values. Missing keys are
    /// completed with defaults and written back.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let original_content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = Self::validate_content(&original_content)
            .with_context(|| format!("Invalid config: {}", path.display()))?;

        // Serialize back to get normalized content
        let normalized_content = toml::to_string_pretty(&config)?;
        if original_content != normalized_content {
            config.save_to(path)?;
        }

        Ok(config)
    }

    /// Save configuration to the default config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Get default path of the log file.
    pub fn default_log_file_path() -> Result<PathBuf> {
        Ok(get_cache_dir()?.join("paneorg.log"))
    }

    /// Parse and validate config content.
    pub fn validate_content(content: &str) -> Result<Config> {
        let mut config: Config = toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))?;
        config.organizer.normalize();
        config.organizer.validate()?;
        Ok(config)
    }
}

impl OrganizerSettings {
    /// Lowercase extensions and strip leading dots.
    fn normalize(&mut self) {
        for ext in self
            .implementation_extensions
            .iter_mut()
            .chain(self.header_extensions.iter_mut())
        {
            *ext = ext.trim().trim_start_matches('.').to_lowercase();
        }
    }

    fn validate(&self) -> Result<()> {
        if let Some(ext) = self
            .implementation_extensions
            .iter()
            .find(|ext| self.header_extensions.contains(ext))
        {
            bail!("Extension '{}' is listed as both implementation and header", ext);
        }
        if self
            .implementation_extensions
            .iter()
            .chain(self.header_extensions.iter())
            .any(|ext| ext.is_empty())
        {
            bail!("Empty extension in organizer settings");
        }
        Ok(())
    }
}
