//! Main-context task queue and delay schedulers for paneorg.
//!
//! This crate provides:
//! - `MainContext` trait and `MainQueue` for running tasks on the host's
//!   main execution context
//! - `DelayScheduler` trait for one-shot delayed callbacks
//! - `ThreadScheduler` (real time, worker threads) and `ManualScheduler`
//!   (virtual clock for tests)
//!
//! # Architecture
//!
//! Deferred work uses a two-phase hand-off:
//!
//! ```text
//! schedule(delay) → callback on worker → invoke_later(task) → MainQueue
//!                                                               ↓
//!                                      host loop: run_pending(&mut host)
//! ```

mod manual;
mod thread;

pub use manual::ManualScheduler;
pub use thread::ThreadScheduler;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use paneorg_core::EditorHost;

/// Task executed on the main execution context with access to the host.
pub type MainTask = Box<dyn FnOnce(&mut dyn EditorHost) + Send>;

/// Callback fired by a [`DelayScheduler`] once its delay elapsed.
pub type DelayedCallback = Box<dyn FnOnce() + Send>;

// ============================================================================
// Main Context
// ============================================================================

/// Entry point to the host's main execution context.
pub trait MainContext: Send + Sync {
    /// Queue `task` to run on the main context. Never runs it inline.
    fn invoke_later(&self, task: MainTask);
}

/// Task queue drained by the host loop.
pub struct MainQueue {
    sender: Sender<MainTask>,
    receiver: Receiver<MainTask>,
    pending: Arc<AtomicUsize>,
}

/// Cloneable sending side of a [`MainQueue`].
#[derive(Clone)]
pub struct MainQueueHandle {
    sender: Sender<MainTask>,
    pending: Arc<AtomicUsize>,
}

impl MainQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get a handle that can queue tasks from any thread.
    pub fn handle(&self) -> MainQueueHandle {
        MainQueueHandle {
            sender: self.sender.clone(),
            pending: Arc::clone(&self.pending),
        }
    }

    /// Run queued tasks until the queue is empty, including tasks queued by
    /// the tasks themselves. Returns the number of tasks run.
    pub fn run_pending(&self, host: &mut dyn EditorHost) -> usize {
        let mut count = 0;
        while let Ok(task) = self.receiver.try_recv() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            task(&mut *host);
            count += 1;
        }
        count
    }

    /// Check if tasks are waiting.
    pub fn has_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }
}

impl Default for MainQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl MainContext for MainQueueHandle {
    fn invoke_later(&self, task: MainTask) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        if self.sender.send(task).is_err() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            paneorg_logger::warn("MainQueue: main context is gone, task dropped");
        }
    }
}

// ============================================================================
// Delay Scheduler
// ============================================================================

/// One-shot delayed callbacks.
///
/// Callbacks run on a worker, never on the main context; they must hand off
/// through [`MainContext::invoke_later`] before touching editor state.
pub trait DelayScheduler: Send + Sync {
    /// Run `callback` once after `delay`.
    fn schedule(&self, delay: Duration, callback: DelayedCallback);

    /// Number of callbacks scheduled but not yet fired.
    fn pending(&self) -> usize;
}

#[cfg(test)]
pub(crate) mod test_host {
    use std::path::PathBuf;

    use anyhow::Result;
    use paneorg_core::{EditorHost, FileId, PaneId, SplitRequest};

    /// Host that records caret moves and nothing else.
    #[derive(Default)]
    pub struct RecordingHost {
        pub carets: Vec<(FileId, usize)>,
    }

    impl EditorHost for RecordingHost {
        fn current_pane(&self) -> Option<PaneId> {
            None
        }
        fn panes(&self) -> Vec<PaneId> {
            Vec::new()
        }
        fn pane_files(&self, _pane: PaneId) -> Vec<FileId> {
            Vec::new()
        }
        fn file_path(&self, _file: FileId) -> Option<PathBuf> {
            None
        }
        fn is_file_open(&self, _file: FileId) -> bool {
            false
        }
        fn document_text(&self, _file: FileId) -> Result<Option<String>> {
            Ok(None)
        }
        fn selected_caret(&self, _file: FileId) -> Option<usize> {
            None
        }
        fn close_file(&mut self, _pane: PaneId, _file: FileId) {}
        fn open_file(&mut self, _file: FileId, _pane: Option<PaneId>, _focus: bool) -> Result<PaneId> {
            Ok(PaneId(0))
        }
        fn split(&mut self, _pane: PaneId, _request: SplitRequest) -> Option<PaneId> {
            None
        }
        fn move_caret(&mut self, file: FileId, offset: usize) -> bool {
            self.carets.push((file, offset));
            true
        }
    }
}
