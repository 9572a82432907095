//! Retry policy flags shared by `exec` and `probe`, layered over the config file.

use anyhow::{Context, Result};
use clap::Args;
use retrykit_core::config::RetryConfig;
use retrykit_core::retry::{BackoffKind, Retry};

#[derive(Debug, Clone, Default, Args)]
pub struct PolicyArgs {
    /// Total time budget in seconds.
    #[arg(long, value_name = "SECS")]
    pub up_to: Option<f64>,

    /// Delay in seconds after the first failure.
    #[arg(long, value_name = "SECS")]
    pub first_delay: Option<f64>,

    /// Maximum delay in seconds between attempts.
    #[arg(long, value_name = "SECS")]
    pub backoff_limit: Option<f64>,

    /// Backoff strategy: constant or exponential.
    #[arg(long, value_name = "KIND")]
    pub backoff: Option<BackoffKind>,
}

impl PolicyArgs {
    /// Config values with any flags given on the command line applied on top.
    pub fn merged(&self, base: &RetryConfig) -> RetryConfig {
        RetryConfig {
            up_to_secs: self.up_to.unwrap_or(base.up_to_secs),
            first_delay_secs: self.first_delay.unwrap_or(base.first_delay_secs),
            backoff_limit_secs: self.backoff_limit.unwrap_or(base.backoff_limit_secs),
            backoff: self.backoff.unwrap_or(base.backoff),
        }
    }

    /// Build the policy and pick the backoff strategy.
    pub fn resolve(&self, base: &RetryConfig) -> Result<(Retry, BackoffKind)> {
        let merged = self.merged(base);
        let retry = merged.to_retry().context("invalid retry settings")?;
        Ok((retry, merged.backoff))
    }
}
