//! Configuration structures for paneorg settings.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Pane organizer settings
    #[serde(default)]
    pub organizer: OrganizerSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Pane organizer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizerSettings {
    /// Extensions grouped as implementation files (lowercase, no dot)
    #[serde(default = "default_implementation_extensions")]
    pub implementation_extensions: Vec<String>,

    /// Extensions grouped as header files (lowercase, no dot)
    #[serde(default = "default_header_extensions")]
    pub header_extensions: Vec<String>,

    /// Substrings that mark a file as an unexpanded template, checked in order
    #[serde(default = "default_template_markers")]
    pub template_markers: Vec<String>,

    /// Delay before organizing a template stub, in ms
    #[serde(default = "default_template_delay_ms")]
    pub template_delay_ms: u64,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,

    /// Number of log entries kept in memory
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

// Default value functions for serde
fn default_implementation_extensions() -> Vec<String> {
    defaults::IMPLEMENTATION_EXTENSIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_header_extensions() -> Vec<String> {
    defaults::HEADER_EXTENSIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_template_markers() -> Vec<String> {
    defaults::TEMPLATE_MARKERS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_template_delay_ms() -> u64 {
    defaults::TEMPLATE_DELAY_MS
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

fn default_max_entries() -> usize {
    defaults::MAX_LOG_ENTRIES
}

impl Default for OrganizerSettings {
    fn default() -> Self {
        Self {
            implementation_extensions: default_implementation_extensions(),
            header_extensions: default_header_extensions(),
            template_markers: default_template_markers(),
            template_delay_ms: default_template_delay_ms(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
            max_entries: default_max_entries(),
        }
    }
}
