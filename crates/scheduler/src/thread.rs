//! Real-time scheduler backed by worker threads.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::{DelayScheduler, DelayedCallback};

/// Scheduler that sleeps on a short-lived worker thread per request.
#[derive(Debug, Default, Clone)]
pub struct ThreadScheduler {
    pending: Arc<AtomicUsize>,
}

impl ThreadScheduler {
    /// Create a new scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    fn spawn_timer(&self, delay: Duration, callback: DelayedCallback) -> Result<()> {
        let pending = Arc::clone(&self.pending);
        thread::Builder::new()
            .name("paneorg-delay".to_string())
            .spawn(move || {
                thread::sleep(delay);
                callback();
                pending.fetch_sub(1, Ordering::SeqCst);
            })
            .context("Failed to spawn delay timer thread")?;
        Ok(())
    }
}

impl DelayScheduler for ThreadScheduler {
    fn schedule(&self, delay: Duration, callback: DelayedCallback) {
        self.pending.fetch_add(1, Ordering::SeqCst);
        if let Err(e) = self.spawn_timer(delay, callback) {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            paneorg_logger::error(format!("ThreadScheduler: {:#}", e));
        }
    }

    fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }
}
