use std::time::Duration;
use tracing::Span;

use super::action::Action;
use super::backoff::Backoff;
use super::clock::{Clock, SystemClock};

/// Decision taken after one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Stop and hand the attempt's outcome back to the caller.
    NoRetry,
    /// Sleep for the given delay, then run the work unit again.
    RetryAfter(Duration),
}

/// Time-budgeted retry policy.
///
/// The loop is bounded by wall-clock time only, never by an attempt count:
/// a work unit that fails fast is retried more often than a slow one.
/// Immutable once built; every call to [`Retry::run`] keeps its own attempt
/// counter and start time, so one policy can be shared between threads as
/// long as its clock can.
#[derive(Debug, Clone)]
pub struct Retry<C = SystemClock> {
    /// Total budget across all attempts, measured from the start of `run`.
    pub up_to: Duration,
    /// Delay after the first failure.
    pub first_delay: Duration,
    /// Upper bound on any single delay, whatever the strategy returns.
    pub backoff_limit: Duration,
    /// Span that attempt records are emitted under. Defaults to `Span::none()`;
    /// without a subscriber installed, records are dropped.
    pub span: Span,
    /// Time source and sleep primitive.
    pub clock: C,
}

impl Default for Retry<SystemClock> {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(30),
            Duration::from_secs(1),
            Duration::from_secs(8),
        )
    }
}

impl Retry<SystemClock> {
    pub fn new(up_to: Duration, first_delay: Duration, backoff_limit: Duration) -> Self {
        Self {
            up_to,
            first_delay,
            backoff_limit,
            span: Span::none(),
            clock: SystemClock,
        }
    }
}

impl<C> Retry<C> {
    /// Replace the clock (e.g. with a [`ManualClock`](super::ManualClock) in tests).
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Retry<C2> {
        Retry {
            up_to: self.up_to,
            first_delay: self.first_delay,
            backoff_limit: self.backoff_limit,
            span: self.span,
            clock,
        }
    }

    /// Emit attempt records under `span` (e.g. one carrying the URL being probed).
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Decide what to do after attempt number `attempt` (1-based) classified as
    /// `action`, with `elapsed` time spent since the first attempt started.
    ///
    /// Only a soft failure yields a delay, and only if the next attempt would
    /// still start within the budget: the delay is clamped to `backoff_limit`
    /// first, then `elapsed + delay` must not exceed `up_to`.
    pub fn decide<B: Backoff + ?Sized>(
        &self,
        attempt: u32,
        elapsed: Duration,
        action: Action,
        backoff: &B,
    ) -> RetryDecision {
        match action {
            Action::Success | Action::HardFail => RetryDecision::NoRetry,
            Action::SoftFail => {
                let delay = backoff
                    .delay(attempt, self.first_delay, self.backoff_limit)
                    .min(self.backoff_limit);
                if elapsed.saturating_add(delay) > self.up_to {
                    return RetryDecision::NoRetry;
                }
                RetryDecision::RetryAfter(delay)
            }
        }
    }
}
