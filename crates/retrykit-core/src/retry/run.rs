//! Retry loop: run a work unit until it succeeds, hard-fails or the budget runs out.

use std::fmt;

use super::action::{Action, Classifier};
use super::backoff::Backoff;
use super::clock::Clock;
use super::policy::{Retry, RetryDecision};

impl<C: Clock> Retry<C> {
    /// Runs `work` until `classifier` says stop.
    ///
    /// - `Success` returns `Ok(())` at once.
    /// - `HardFail` returns that attempt's outcome untouched, on any attempt.
    /// - `SoftFail` sleeps for `backoff`'s delay and tries again, unless the time
    ///   spent since the first attempt plus that delay would exceed `up_to`;
    ///   then the last outcome is returned without a further sleep.
    ///
    /// The budget is only checked between attempts. A work unit that hangs
    /// keeps `run` waiting past `up_to`, so bound each attempt on its own
    /// (e.g. with a request timeout).
    pub fn run<E, B, K, F>(&self, backoff: B, classifier: K, mut work: F) -> Result<(), E>
    where
        E: fmt::Display,
        B: Backoff,
        K: Classifier<E>,
        F: FnMut() -> Result<(), E>,
    {
        let _entered = self.span.enter();
        let start = self.clock.now();
        let mut attempt = 1u32;
        loop {
            let outcome = work();
            let action = classifier.classify(outcome.as_ref().map(|_| ()));
            match action {
                Action::Success => {
                    if attempt > 1 {
                        tracing::debug!(attempt, "succeeded after retrying");
                    }
                    return Ok(());
                }
                Action::HardFail => {
                    tracing::debug!(attempt, error = %Described(&outcome), "hard failure, giving up");
                    return outcome;
                }
                Action::SoftFail => {}
            }

            let elapsed = self.clock.now().saturating_duration_since(start);
            match self.decide(attempt, elapsed, action, &backoff) {
                RetryDecision::NoRetry => {
                    tracing::warn!(
                        attempt,
                        elapsed_ms = elapsed.as_millis() as u64,
                        budget_ms = self.up_to.as_millis() as u64,
                        error = %Described(&outcome),
                        "retry budget exhausted"
                    );
                    return outcome;
                }
                RetryDecision::RetryAfter(delay) => {
                    tracing::debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        elapsed_ms = elapsed.as_millis() as u64,
                        error = %Described(&outcome),
                        "attempt failed, backing off"
                    );
                    self.clock.sleep(delay);
                    attempt = attempt.saturating_add(1);
                }
            }
        }
    }
}

/// Log-friendly view of an attempt's outcome.
struct Described<'a, E>(&'a Result<(), E>);

impl<E: fmt::Display> fmt::Display for Described<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Ok(()) => write!(f, "<no error>"),
            Err(e) => write!(f, "{}", e),
        }
    }
}
