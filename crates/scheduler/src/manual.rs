//! Deterministic scheduler driven by a virtual clock.

use std::sync::Mutex;
use std::time::Duration;

use crate::{DelayScheduler, DelayedCallback};

struct PendingCallback {
    due: Duration,
    seq: u64,
    callback: DelayedCallback,
}

#[derive(Default)]
struct ManualState {
    now: Duration,
    next_seq: u64,
    pending: Vec<PendingCallback>,
    requested: Vec<Duration>,
}

/// Scheduler whose time only moves when [`ManualScheduler::advance`] is
/// called. Callbacks fire on the calling thread.
#[derive(Default)]
pub struct ManualScheduler {
    state: Mutex<ManualState>,
}

impl ManualScheduler {
    /// Create a scheduler at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.state.lock().map(|s| s.now).unwrap_or_default()
    }

    /// Delays passed to `schedule`, in call order.
    pub fn requested_delays(&self) -> Vec<Duration> {
        self.state
            .lock()
            .map(|s| s.requested.clone())
            .unwrap_or_default()
    }

    /// Move the clock forward and fire every callback that became due, in
    /// due-time order (ties in scheduling order). Returns how many fired.
    pub fn advance(&self, by: Duration) -> usize {
        let due = {
            let Ok(mut state) = self.state.lock() else {
                return 0;
            };
            state.now += by;
            let now = state.now;

            let (mut due, rest): (Vec<_>, Vec<_>) =
                state.pending.drain(..).partition(|p| p.due <= now);
            state.pending = rest;
            due.sort_by_key(|p| (p.due, p.seq));
            due
        };

        // Lock released: callbacks may schedule again.
        let count = due.len();
        for pending in due {
            (pending.callback)();
        }
        count
    }
}

impl DelayScheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, callback: DelayedCallback) {
        if let Ok(mut state) = self.state.lock() {
            let due = state.now + delay;
            let seq = state.next_seq;
            state.next_seq += 1;
            state.requested.push(delay);
            state.pending.push(PendingCallback { due, seq, callback });
        }
    }

    fn pending(&self) -> usize {
        self.state.lock().map(|s| s.pending.len()).unwrap_or(0)
    }
}
