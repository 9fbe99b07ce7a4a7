//! Logging for paneorg.
//!
//! One process-wide logger holding the most recent entries in memory and,
//! when a path is configured, mirroring them to a log file. Logging before
//! [`init`] does nothing, so library crates log unconditionally.

use chrono::Local;
use std::collections::VecDeque;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

/// A recorded message.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Local wall-clock time, `HH:MM:SS`
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.timestamp, self.level, self.message)
    }
}

/// Severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the `[logging] min_level` values, case-insensitively.
impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("Unknown log level: {}", other)),
        }
    }
}

#[derive(Debug)]
struct Logger {
    entries: VecDeque<LogEntry>,
    max_entries: usize,
    min_level: LogLevel,
    sink: Option<File>,
}

/// Truncate the log file and write the session banner.
fn open_sink(path: &Path) -> Option<File> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .ok()?;
    let _ = writeln!(file, "=== paneorg log start ===");
    Some(file)
}

impl Logger {
    fn new(file_path: Option<PathBuf>, max_entries: usize, min_level: LogLevel) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries.min(1024)),
            max_entries,
            min_level,
            sink: file_path.as_deref().and_then(open_sink),
        }
    }

    fn record(&mut self, level: LogLevel, message: String) {
        if level < self.min_level {
            return;
        }

        let entry = LogEntry {
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            level,
            message,
        };
        if let Some(file) = self.sink.as_mut() {
            let _ = writeln!(file, "{}", entry);
        }

        if self.entries.len() == self.max_entries {
            self.entries.pop_front();
        }
        if self.max_entries > 0 {
            self.entries.push_back(entry);
        }
    }
}

static LOGGER: OnceLock<Mutex<Logger>> = OnceLock::new();

fn with_logger(f: impl FnOnce(&mut Logger)) {
    if let Some(logger) = LOGGER.get() {
        if let Ok(mut logger) = logger.lock() {
            f(&mut logger);
        }
    }
}

/// Install the global logger. Only the first call has an effect.
///
/// With `file_path` set, the file is truncated and every recorded entry is
/// appended to it. At most `max_entries` entries stay in memory.
pub fn init(file_path: Option<PathBuf>, max_entries: usize, min_level: LogLevel) {
    LOGGER.get_or_init(|| Mutex::new(Logger::new(file_path, max_entries, min_level)));
}

pub fn is_initialized() -> bool {
    LOGGER.get().is_some()
}

pub fn set_min_level(level: LogLevel) {
    with_logger(|logger| logger.min_level = level);
}

pub fn debug(message: impl Into<String>) {
    with_logger(|logger| logger.record(LogLevel::Debug, message.into()));
}

pub fn info(message: impl Into<String>) {
    with_logger(|logger| logger.record(LogLevel::Info, message.into()));
}

pub fn warn(message: impl Into<String>) {
    with_logger(|logger| logger.record(LogLevel::Warn, message.into()));
}

pub fn error(message: impl Into<String>) {
    with_logger(|logger| logger.record(LogLevel::Error, message.into()));
}

/// Snapshot of the entries held in memory, oldest first.
pub fn get_entries() -> Vec<LogEntry> {
    let mut entries = Vec::new();
    with_logger(|logger| entries = logger.entries.iter().cloned().collect());
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
        assert_eq!("INFO".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!("Error".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_entry_line_format() {
        let entry = LogEntry {
            timestamp: "12:00:01".to_string(),
            level: LogLevel::Info,
            message: "Organizer: File opened: a.h".to_string(),
        };
        assert_eq!(entry.to_string(), "[12:00:01] INFO: Organizer: File opened: a.h");
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut logger = Logger::new(None, 0, LogLevel::Debug);
        logger.record(LogLevel::Error, "dropped".to_string());
        assert!(logger.entries.is_empty());
    }

    #[test]
    fn test_logger_filters_by_min_level() {
        let mut logger = Logger::new(None, 10, LogLevel::Warn);
        logger.record(LogLevel::Info, "hidden".to_string());
        logger.record(LogLevel::Error, "shown".to_string());

        let entries = logger.entries.iter().cloned().collect::<Vec<_>>();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "shown");
        assert_eq!(entries[0].level, LogLevel::Error);
    }

    #[test]
    fn test_logger_keeps_last_entries() {
        let mut logger = Logger::new(None, 2, LogLevel::Debug);
        for i in 0..5 {
            logger.record(LogLevel::Info, format!("message {}", i));
        }

        let messages: Vec<_> = logger.entries.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["message 3", "message 4"]);
    }

    #[test]
    fn test_logger_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("paneorg.log");

        let mut logger = Logger::new(Some(path.clone()), 10, LogLevel::Debug);
        logger.record(LogLevel::Warn, "disk full".to_string());

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("=== paneorg log start ==="));
        assert!(content.contains("WARN: disk full"));
    }

    #[test]
    fn test_set_min_level() {
        let mut logger = Logger::new(None, 10, LogLevel::Error);
        logger.record(LogLevel::Debug, "before".to_string());
        logger.min_level = LogLevel::Debug;
        logger.record(LogLevel::Debug, "after".to_string());

        let entries = logger.entries.iter().cloned().collect::<Vec<_>>();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "after");
    }
}
