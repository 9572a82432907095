//! Backoff strategies: map an attempt number to the delay before the next attempt.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Computes the delay to wait after a soft failure.
///
/// `attempt` is 1-based: the delay returned for attempt 1 is the one slept
/// between the first and the second call of the work unit. Implementations
/// must be pure; the engine clamps the result to `limit` again anyway.
pub trait Backoff {
    fn delay(&self, attempt: u32, first_delay: Duration, limit: Duration) -> Duration;
}

impl<F> Backoff for F
where
    F: Fn(u32, Duration, Duration) -> Duration,
{
    fn delay(&self, attempt: u32, first_delay: Duration, limit: Duration) -> Duration {
        self(attempt, first_delay, limit)
    }
}

/// Always `first_delay`, capped at `limit`.
pub fn constant_backoff(_attempt: u32, first_delay: Duration, limit: Duration) -> Duration {
    first_delay.min(limit)
}

/// `first_delay * 2^(attempt-1)`, capped at `limit`.
pub fn exponential_backoff(attempt: u32, first_delay: Duration, limit: Duration) -> Duration {
    // 2^31 seconds is already far past any sane limit; saturate instead of overflowing.
    let shift = attempt.saturating_sub(1).min(31);
    first_delay.saturating_mul(1u32 << shift).min(limit)
}

/// Named backoff strategy, selectable from config and the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackoffKind {
    Constant,
    #[default]
    Exponential,
}

impl Backoff for BackoffKind {
    fn delay(&self, attempt: u32, first_delay: Duration, limit: Duration) -> Duration {
        match self {
            BackoffKind::Constant => constant_backoff(attempt, first_delay, limit),
            BackoffKind::Exponential => exponential_backoff(attempt, first_delay, limit),
        }
    }
}

impl std::str::FromStr for BackoffKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "constant" => Ok(BackoffKind::Constant),
            "exponential" => Ok(BackoffKind::Exponential),
            other => Err(format!(
                "unknown backoff '{}' (expected 'constant' or 'exponential')",
                other
            )),
        }
    }
}
