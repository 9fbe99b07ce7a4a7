//! Filesystem watcher for paneorg.
//!
//! Reports debounced file changes under a directory so they can be fed to
//! an editor host as opened or reloaded files.

use anyhow::{Context, Result};
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

/// Filesystem change event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEvent {
    /// Changed path.
    pub path: PathBuf,
    /// Event kind.
    pub kind: FsEventKind,
}

/// Kind of filesystem event.
///
/// The debouncer does not preserve notify's event kinds, so the kind is
/// derived from whether the path still exists when the batch is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsEventKind {
    /// File was created or modified
    Changed,
    /// File no longer exists
    Removed,
}

impl FsEvent {
    fn from_path(path: PathBuf) -> Self {
        let kind = if path.exists() {
            FsEventKind::Changed
        } else {
            FsEventKind::Removed
        };
        Self { path, kind }
    }
}

/// Debounce duration for filesystem events.
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Create a filesystem watcher with debouncing.
///
/// Returns a receiver for filesystem events and the watcher handle.
pub fn create_watcher(
    debounce_ms: u64,
) -> Result<(Receiver<Vec<FsEvent>>, Debouncer<RecommendedWatcher>)> {
    let (tx, rx) = mpsc::channel();

    let debouncer = new_debouncer(
        Duration::from_millis(debounce_ms),
        move |res: DebounceEventResult| {
            if let Ok(events) = res {
                let fs_events: Vec<FsEvent> = events
                    .into_iter()
                    .filter(|e| !is_hidden(&e.path))
                    .map(|e| FsEvent::from_path(e.path))
                    .collect();
                if !fs_events.is_empty() {
                    let _ = tx.send(fs_events);
                }
            }
        },
    )
    .context("Failed to create filesystem watcher")?;

    Ok((rx, debouncer))
}

/// Editor swap files and dotfiles are never reported.
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.') || name.ends_with('~'))
        .unwrap_or(false)
}

/// Watches one directory for changed files.
pub struct PathWatcher {
    debouncer: Debouncer<RecommendedWatcher>,
    receiver: Receiver<Vec<FsEvent>>,
}

impl PathWatcher {
    /// Create a new path watcher.
    pub fn new(debounce_ms: u64) -> Result<Self> {
        let (receiver, debouncer) = create_watcher(debounce_ms)?;
        Ok(Self {
            debouncer,
            receiver,
        })
    }

    /// Watch a path.
    pub fn watch(&mut self, path: &Path, recursive: bool) -> Result<()> {
        let mode = if recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };

        self.debouncer
            .watcher()
            .watch(path, mode)
            .with_context(|| format!("Failed to watch path: {}", path.display()))
    }

    /// Stop watching a path.
    pub fn unwatch(&mut self, path: &Path) -> Result<()> {
        self.debouncer
            .watcher()
            .unwatch(path)
            .with_context(|| format!("Failed to unwatch path: {}", path.display()))
    }

    /// Try to receive pending events (non-blocking).
    pub fn try_recv(&self) -> Option<Vec<FsEvent>> {
        self.receiver.try_recv().ok()
    }

    /// Wait up to `timeout` for the next batch of events.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Vec<FsEvent>> {
        self.receiver.recv_timeout(timeout).ok()
    }
}
