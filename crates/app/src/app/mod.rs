//! Main application module.
//!
//! Contains the App struct: the in-memory editor host, the organizer
//! subscribed to it, and the loop that drives both.

use anyhow::{bail, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use paneorg_config::Config;
use paneorg_core::{dispatch, EditorHost, FileId, FileOpenListener};
use paneorg_layout::{DocumentText, LayoutManager};
use paneorg_organizer::{FileOpenedWatcher, OrganizerPolicy};
use paneorg_scheduler::{DelayScheduler, MainQueue, ThreadScheduler};
use paneorg_watcher::{FsEvent, FsEventKind, PathWatcher, DEFAULT_DEBOUNCE_MS};

/// Main loop tick interval.
pub const TICK_MS: u64 = 50;

/// Main application
pub struct App {
    layout: LayoutManager,
    queue: MainQueue,
    scheduler: Arc<dyn DelayScheduler>,
    organizer: FileOpenedWatcher,
    listeners: Vec<Box<dyn FileOpenListener>>,
    tick: Duration,
}

impl App {
    /// Create a new application with a real-time scheduler.
    pub fn new(config: &Config) -> Self {
        Self::with_scheduler(config, Arc::new(ThreadScheduler::new()))
    }

    /// Create a new application with an explicit delay scheduler.
    pub fn with_scheduler(config: &Config, scheduler: Arc<dyn DelayScheduler>) -> Self {
        let queue = MainQueue::new();
        let organizer = FileOpenedWatcher::new(
            OrganizerPolicy::from_settings(&config.organizer),
            Arc::clone(&scheduler),
            Arc::new(queue.handle()),
        );
        let listeners: Vec<Box<dyn FileOpenListener>> = vec![Box::new(organizer.clone())];

        Self {
            layout: LayoutManager::new(),
            queue,
            scheduler,
            organizer,
            listeners,
            tick: Duration::from_millis(TICK_MS),
        }
    }

    /// Editor layout.
    pub fn layout(&self) -> &LayoutManager {
        &self.layout
    }

    /// Open a file from disk in the current pane.
    pub fn open_file(&mut self, path: &Path) -> Result<FileId> {
        let file = self.layout.open_path(path, read_document(path))?;
        paneorg_logger::debug(format!("Opened {} as {}", path.display(), file));
        Ok(file)
    }

    /// Deliver host events and run main-context tasks until both are idle.
    ///
    /// Returns whether anything was processed.
    pub fn process_pending(&mut self) -> bool {
        let mut processed = false;
        loop {
            let events = self.layout.take_events();
            for event in &events {
                dispatch(event, &mut self.layout, &self.listeners);
            }
            let ran = self.queue.run_pending(&mut self.layout);
            if events.is_empty() && ran == 0 {
                return processed;
            }
            processed = true;
        }
    }

    /// Check if no organization work is queued or scheduled.
    pub fn is_idle(&self) -> bool {
        !self.queue.has_pending() && self.scheduler.pending() == 0
    }

    /// Run the loop until no work remains, including deferred organization.
    pub fn run_until_idle(&mut self, timeout: Duration) -> Result<()> {
        let start = Instant::now();
        loop {
            self.process_pending();
            if self.is_idle() {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                bail!(
                    "Timed out after {} ms waiting for deferred organization",
                    timeout.as_millis()
                );
            }
            std::thread::sleep(self.tick);
        }
    }

    /// Apply filesystem changes: open new recognized files, reload open
    /// ones, close removed ones. Returns whether the layout was touched.
    pub fn apply_fs_events(&mut self, events: &[FsEvent]) -> bool {
        let mut touched = false;
        for event in events {
            let path = event.path.as_path();
            let known = self.layout.find_file(path);
            match (event.kind, known) {
                (FsEventKind::Changed, Some(file)) if self.layout.is_file_open(file) => {
                    self.layout.set_document_text(file, read_document(path));
                    paneorg_logger::debug(format!("Reloaded {}", path.display()));
                }
                (FsEventKind::Changed, _) => {
                    let recognized = self.organizer.policy().categories.classify(path).is_some();
                    if !recognized || !path.is_file() {
                        continue;
                    }
                    match self.open_file(path) {
                        Ok(_) => touched = true,
                        Err(e) => paneorg_logger::warn(format!(
                            "Failed to open {}: {:#}",
                            path.display(),
                            e
                        )),
                    }
                }
                (FsEventKind::Removed, Some(file)) => {
                    self.layout.close_everywhere(file);
                    touched = true;
                }
                (FsEventKind::Removed, None) => {}
            }
        }
        touched
    }

    /// Watch `dir` and organize files as they appear. Calls `on_change` with
    /// the layout summary whenever the layout may have changed. Never returns
    /// unless the watcher cannot be set up.
    pub fn watch(&mut self, dir: &Path, mut on_change: impl FnMut(&str)) -> Result<()> {
        let mut watcher = PathWatcher::new(DEFAULT_DEBOUNCE_MS)?;
        watcher.watch(dir, false)?;
        paneorg_logger::info(format!("Watching {}", dir.display()));

        loop {
            let mut changed = false;
            if let Some(events) = watcher.recv_timeout(self.tick) {
                changed |= self.apply_fs_events(&events);
            }
            changed |= self.process_pending();
            if changed {
                on_change(&self.layout.summary());
            }
        }
    }
}

/// Read a file's text for the layout.
pub fn read_document(path: &Path) -> DocumentText {
    match std::fs::read_to_string(path) {
        Ok(text) => DocumentText::Loaded(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => DocumentText::Missing,
        Err(e) => DocumentText::Unreadable(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paneorg_scheduler::ManualScheduler;
    use std::fs;
    use std::path::PathBuf;

    struct Fixture {
        dir: tempfile::TempDir,
        scheduler: Arc<ManualScheduler>,
        app: App,
    }

    impl Fixture {
        fn new() -> Self {
            let scheduler = Arc::new(ManualScheduler::new());
            let app = App::with_scheduler(&Config::default(), scheduler.clone());
            Self {
                dir: tempfile::tempdir().unwrap(),
                scheduler,
                app,
            }
        }

        fn write(&self, name: &str, text: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            fs::write(&path, text).unwrap();
            path
        }

        fn open(&mut self, name: &str, text: &str) -> FileId {
            let path = self.write(name, text);
            let file = self.app.open_file(&path).unwrap();
            self.app.process_pending();
            file
        }
    }

    #[test]
    fn test_sources_and_headers_end_up_apart() {
        let mut fx = Fixture::new();
        fx.open("a.cpp", "int a;");
        fx.open("b.cpp", "int b;");
        fx.open("x.h", "#pragma once");

        assert_eq!(fx.app.layout().summary(), " pane#1: a.cpp, >b.cpp\n*pane#2: >x.h");
        assert!(fx.app.is_idle());
    }

    #[test]
    fn test_template_waits_for_delay() {
        let mut fx = Fixture::new();
        fx.open("a.cpp", "int a;");
        let path = fx.write("widget.h", "class $NAME$ {};");
        fx.app.open_file(&path).unwrap();
        fx.app.process_pending();

        assert!(!fx.app.is_idle());
        assert_eq!(fx.app.layout().panes().len(), 1);

        fs::write(&path, "class Widget {};").unwrap();
        assert!(!fx.app.apply_fs_events(&[FsEvent {
            path: path.clone(),
            kind: FsEventKind::Changed,
        }]));

        fx.scheduler.advance(Duration::from_millis(2000));
        assert!(fx.app.process_pending());

        assert_eq!(fx.app.layout().summary(), " pane#1: >a.cpp\n*pane#2: >widget.h");
        assert!(fx.app.is_idle());
    }

    #[test]
    fn test_fs_events_open_and_close_files() {
        let mut fx = Fixture::new();
        fx.open("a.cpp", "int a;");

        let header = fx.write("b.h", "#pragma once");
        let notes = fx.write("notes.txt", "todo");
        let events = vec![
            FsEvent {
                path: header.clone(),
                kind: FsEventKind::Changed,
            },
            FsEvent {
                path: notes,
                kind: FsEventKind::Changed,
            },
        ];
        assert!(fx.app.apply_fs_events(&events));
        fx.app.process_pending();
        assert_eq!(fx.app.layout().summary(), " pane#1: >a.cpp\n*pane#2: >b.h");

        fs::remove_file(&header).unwrap();
        assert!(fx.app.apply_fs_events(&[FsEvent {
            path: header,
            kind: FsEventKind::Removed,
        }]));
        assert_eq!(fx.app.layout().summary(), "*pane#1: >a.cpp");
    }

    #[test]
    fn test_read_document_states() {
        let fx = Fixture::new();
        let good = fx.write("a.cpp", "int a;");
        let bad = fx.dir.path().join("bad.h");
        fs::write(&bad, [0xff, 0xfe, 0x00]).unwrap();

        assert_eq!(read_document(&good), DocumentText::Loaded("int a;".to_string()));
        assert_eq!(
            read_document(&fx.dir.path().join("missing.h")),
            DocumentText::Missing
        );
        assert!(matches!(read_document(&bad), DocumentText::Unreadable(_)));
    }

    #[test]
    fn test_run_until_idle_with_real_timer() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.organizer.template_delay_ms = 20;
        let mut app = App::new(&config);

        let source = dir.path().join("a.cpp");
        fs::write(&source, "int a;").unwrap();
        let stub = dir.path().join("a.h");
        fs::write(&stub, "").unwrap();

        app.open_file(&source).unwrap();
        app.process_pending();
        app.open_file(&stub).unwrap();
        app.process_pending();
        assert!(!app.is_idle());

        app.run_until_idle(Duration::from_secs(10)).unwrap();
        assert_eq!(app.layout().summary(), " pane#1: >a.cpp\n*pane#2: >a.h");
    }
}
