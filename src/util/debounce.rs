use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

/// Shared liveness token for in-flight work whose consumer may go away.
///
/// Captured when the work starts; checked before the result is applied. Once
/// the owning [`Debouncer`] is dropped the flag reads false forever.
#[derive(Debug, Clone)]
pub struct LivenessFlag(Arc<AtomicBool>);

impl LivenessFlag {
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Coalesces rapid-fire scheduling so only the last action within the window
/// executes.
///
/// Each `schedule` call supersedes any pending action: earlier actions are
/// cancelled outright, not merely overwritten. `cancel` (or dropping the
/// debouncer) suppresses the pending action and flips the liveness flag so
/// late results are discarded.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    generation: Arc<AtomicU64>,
    live: Arc<AtomicBool>,
}

impl Debouncer {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: Arc::new(AtomicU64::new(0)),
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Schedule `action` to run after the window elapses, cancelling any
    /// action scheduled earlier.
    pub fn schedule<F>(&self, action: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let generation = Arc::clone(&self.generation);
        let live = Arc::clone(&self.live);
        let window = self.window;

        thread::spawn(move || {
            thread::sleep(window);
            if live.load(Ordering::SeqCst) && generation.load(Ordering::SeqCst) == ticket {
                action();
            }
        });
    }

    /// Suppress the pending action, if any, without scheduling a new one.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Token for asynchronous work started on behalf of this debouncer's
    /// owner; turns false permanently when the owner goes away.
    #[must_use]
    pub fn liveness(&self) -> LivenessFlag {
        LivenessFlag(Arc::clone(&self.live))
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.live.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "debounce_tests.rs"]
mod tests;
