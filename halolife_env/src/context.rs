//! Process-level environment for a halolife rank.

use std::time::{Duration, Instant};

/// The non-communication environment a rank runs in.
///
/// Kept separate from `Communicator` so the engine and launcher never reach
/// for the system clock directly.
pub trait ProcessContext: Send + Sync + 'static {
    /// Monotonic time since the context was created.
    fn now(&self) -> Duration;

    /// Time elapsed since `earlier`, a value previously returned by `now`.
    fn since(&self, earlier: Duration) -> Duration {
        self.now().saturating_sub(earlier)
    }
}

/// Production context backed by the system monotonic clock.
pub struct SystemContext {
    /// Start time for elapsed measurements
    start: Instant,
}

impl SystemContext {
    /// Creates a context that starts counting now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessContext for SystemContext {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }
}
