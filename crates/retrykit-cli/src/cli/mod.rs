//! CLI for the retrykit retry engine.

mod commands;
mod policy;

use anyhow::Result;
use clap::{Parser, Subcommand};
use retrykit_core::config::{self, RetrykitConfig};
use std::path::PathBuf;

use commands::{run_config, run_exec, run_probe};
pub use policy::PolicyArgs;

/// Top-level CLI for retrykit.
#[derive(Debug, Parser)]
#[command(name = "retrykit")]
#[command(about = "Run commands and HTTP checks under a time-budgeted retry policy", long_about = None)]
pub struct Cli {
    /// Read settings from this file instead of ~/.config/retrykit/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log to stderr instead of the state-dir log file.
    #[arg(long, global = true)]
    pub log_stderr: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run a command until it exits 0, a hard-fail exit code is seen, or time runs out.
    Exec {
        #[command(flatten)]
        policy: PolicyArgs,

        /// Exit codes that must not be retried (repeatable).
        #[arg(long = "hard-fail-code", value_name = "CODE")]
        hard_fail_codes: Vec<i32>,

        /// Program and its arguments (put them after `--`).
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// GET a URL until it answers 2xx; 5xx, 408, 429 and network errors are retried.
    Probe {
        /// HTTP/HTTPS URL to check.
        url: String,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Per-request timeout in seconds (default from config).
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },

    /// Show the config file location and effective settings.
    Config,
}

impl Cli {
    fn load_config(&self) -> Result<RetrykitConfig> {
        match &self.config {
            Some(path) => config::load_from_path(path),
            None => config::load_or_init(),
        }
    }

    /// Dispatch the parsed command. Returns the process exit code.
    pub fn run(self) -> Result<i32> {
        let cfg = self.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match &self.command {
            CliCommand::Exec {
                policy,
                hard_fail_codes,
                command,
            } => run_exec(&cfg, policy, hard_fail_codes, command),
            CliCommand::Probe {
                url,
                policy,
                timeout,
            } => run_probe(&cfg, policy, url, *timeout),
            CliCommand::Config => run_config(&cfg, self.config.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests;
