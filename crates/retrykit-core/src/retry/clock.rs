//! Time source and sleep primitive used by the retry loop.
//!
//! The engine never touches `Instant::now` or `thread::sleep` directly so that
//! tests can substitute [`ManualClock`] and run without waiting.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Where the retry loop reads the time and how it waits between attempts.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, d: Duration);
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn sleep(&self, d: Duration) {
        (**self).sleep(d)
    }
}

/// Wall clock; blocks the calling thread when sleeping.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, d: Duration) {
        std::thread::sleep(d);
    }
}

/// Virtual clock for tests: `sleep` records the duration and advances `now`
/// by the same amount, returning immediately.
#[derive(Debug)]
pub struct ManualClock {
    start: Instant,
    state: Mutex<ManualState>,
}

#[derive(Debug, Default)]
struct ManualState {
    elapsed: Duration,
    sleeps: Vec<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            state: Mutex::new(ManualState::default()),
        }
    }

    /// Moves virtual time forward without recording a sleep (e.g. to model a slow work unit).
    pub fn advance(&self, d: Duration) {
        let mut state = self.lock();
        state.elapsed = state.elapsed.saturating_add(d);
    }

    /// Every duration passed to `sleep`, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.lock().sleeps.clone()
    }

    /// Total virtual time elapsed so far (sleeps plus explicit advances).
    pub fn elapsed(&self) -> Duration {
        self.lock().elapsed
    }

    fn lock(&self) -> MutexGuard<'_, ManualState> {
        // Poisoned only if a holder panicked; the state is still consistent.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed()
    }

    fn sleep(&self, d: Duration) {
        let mut state = self.lock();
        state.sleeps.push(d);
        state.elapsed = state.elapsed.saturating_add(d);
    }
}
