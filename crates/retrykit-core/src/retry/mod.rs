//! Retry and backoff engine.
//!
//! [`Retry::run`] calls an opaque work unit, asks a [`Classifier`] what the
//! outcome means and, on a soft failure, sleeps for the delay a [`Backoff`]
//! strategy computes, until the policy's time budget is spent. Time and
//! sleeping go through a [`Clock`] so tests can use [`ManualClock`].

mod action;
mod backoff;
mod classify;
mod clock;
mod error;
mod policy;
mod run;

pub use action::{retry_on_error, Action, Classifier};
pub use backoff::{constant_backoff, exponential_backoff, Backoff, BackoffKind};
pub use classify::{classify_curl_error, classify_http, classify_http_status};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::HttpError;
pub use policy::{Retry, RetryDecision};
