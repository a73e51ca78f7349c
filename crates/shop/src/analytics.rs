//! Analytics initialization guard.
//!
//! Analytics SDKs need an asynchronous setup step, but events are produced
//! from the first moment the app runs. The guard is an explicit state
//! machine:
//!
//! ```text
//! Uninitialized --begin_initialize--> Initializing --finish_initialize--> Ready
//!       ^                                                                   |
//!       +------------------------------ teardown ---------------------------+
//! ```
//!
//! Tasks submitted before `Ready` are buffered and drained exactly once, in
//! submission order, on the transition to `Ready`. Tasks submitted after
//! run immediately. When analytics are disabled every task is dropped.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

/// A deferred analytics call.
pub type AnalyticsTask = Box<dyn FnOnce() + Send + 'static>;

/// Lifecycle phase of the analytics integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalyticsPhase {
    Uninitialized,
    Initializing,
    Ready,
}

/// What [`AnalyticsGuard::guard`] did with a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Analytics are disabled; the task was discarded.
    Dropped,
    /// Initialization has not finished; the task was buffered.
    Queued,
    /// The task ran before `guard` returned.
    Ran,
}

struct GuardState {
    phase: AnalyticsPhase,
    queue: Vec<AnalyticsTask>,
}

/// Thread-safe gate in front of analytics calls.
pub struct AnalyticsGuard {
    enabled: bool,
    state: Mutex<GuardState>,
}

impl std::fmt::Debug for AnalyticsGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("AnalyticsGuard")
            .field("enabled", &self.enabled)
            .field("phase", &state.phase)
            .field("queued", &state.queue.len())
            .finish()
    }
}

impl AnalyticsGuard {
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self {
            enabled,
            state: Mutex::new(GuardState {
                phase: AnalyticsPhase::Uninitialized,
                queue: Vec::new(),
            }),
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn phase(&self) -> AnalyticsPhase {
        self.lock().phase
    }

    /// Number of tasks waiting for initialization to finish.
    #[must_use]
    pub fn queued(&self) -> usize {
        self.lock().queue.len()
    }

    /// Run `task` now if analytics are ready, buffer it otherwise.
    pub fn guard(&self, task: impl FnOnce() + Send + 'static) -> GuardOutcome {
        if !self.enabled {
            return GuardOutcome::Dropped;
        }

        {
            let mut state = self.lock();
            if state.phase != AnalyticsPhase::Ready {
                state.queue.push(Box::new(task));
                return GuardOutcome::Queued;
            }
        }

        task();
        GuardOutcome::Ran
    }

    /// Move from `Uninitialized` to `Initializing`.
    ///
    /// Returns `false` if initialization already started or finished, in which
    /// case the caller must not run the setup again.
    pub fn begin_initialize(&self) -> bool {
        let mut state = self.lock();
        if state.phase != AnalyticsPhase::Uninitialized {
            return false;
        }
        state.phase = AnalyticsPhase::Initializing;
        debug!("Analytics initializing");
        true
    }

    /// Move from `Initializing` to `Ready` and drain the buffered tasks.
    ///
    /// Returns the number of drained tasks, or `None` if the guard was not
    /// initializing. Tasks run after the lock is released, so they may call
    /// back into the guard.
    pub fn finish_initialize(&self) -> Option<usize> {
        let drained = {
            let mut state = self.lock();
            if state.phase != AnalyticsPhase::Initializing {
                return None;
            }
            state.phase = AnalyticsPhase::Ready;
            std::mem::take(&mut state.queue)
        };

        let count = drained.len();
        for task in drained {
            task();
        }
        info!(drained = count, enabled = self.enabled, "Analytics ready");
        Some(count)
    }

    /// Return to `Uninitialized`, discarding buffered tasks.
    pub fn teardown(&self) {
        let mut state = self.lock();
        let dropped = state.queue.len();
        state.queue.clear();
        state.phase = AnalyticsPhase::Uninitialized;
        debug!(dropped, "Analytics torn down");
    }

    fn lock(&self) -> MutexGuard<'_, GuardState> {
        // A panicking task never holds the lock, so the state is consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
