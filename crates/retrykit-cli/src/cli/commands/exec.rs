//! `retrykit exec -- CMD ARGS...` – rerun a command until it succeeds.

use anyhow::{bail, Result};
use retrykit_core::config::RetrykitConfig;
use retrykit_core::retry::Action;
use std::io;
use std::process::Command;
use thiserror::Error;

use crate::cli::PolicyArgs;

/// Why one run of the child command did not succeed.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The program could not be started (not found, not executable, ...).
    #[error("could not start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    /// The program ran and exited non-zero; `None` if killed by a signal.
    #[error("{program} exited with {}", describe_code(.code))]
    Exit { program: String, code: Option<i32> },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {}", c),
        None => "a signal".to_string(),
    }
}

/// Exit 0 succeeds; spawn failures and listed codes are final; the rest is retried.
pub fn classify_exit(outcome: Result<(), &ExecError>, hard_fail_codes: &[i32]) -> Action {
    match outcome {
        Ok(()) => Action::Success,
        Err(ExecError::Spawn { .. }) => Action::HardFail,
        Err(ExecError::Exit {
            code: Some(code), ..
        }) if hard_fail_codes.contains(code) => Action::HardFail,
        Err(ExecError::Exit { .. }) => Action::SoftFail,
    }
}

/// Run the program once, inheriting stdio.
fn run_once(program: &str, args: &[String]) -> Result<(), ExecError> {
    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|source| ExecError::Spawn {
            program: program.to_string(),
            source,
        })?;
    if status.success() {
        return Ok(());
    }
    Err(ExecError::Exit {
        program: program.to_string(),
        code: status.code(),
    })
}

/// Process exit code to report for the final outcome of `exec`.
pub fn exit_code(outcome: &Result<(), ExecError>) -> i32 {
    match outcome {
        Ok(()) => 0,
        // Same convention as shells for "command not found".
        Err(ExecError::Spawn { .. }) => 127,
        Err(ExecError::Exit { code, .. }) => code.unwrap_or(1),
    }
}

pub fn run_exec(
    cfg: &RetrykitConfig,
    policy: &PolicyArgs,
    hard_fail_codes: &[i32],
    command: &[String],
) -> Result<i32> {
    let Some((program, args)) = command.split_first() else {
        bail!("no command given");
    };
    let (retry, backoff) = policy.resolve(&cfg.retry)?;
    let retry = retry.with_span(tracing::info_span!("exec", program = %program));

    let outcome = retry.run(
        backoff,
        |outcome: Result<(), &ExecError>| classify_exit(outcome, hard_fail_codes),
        || run_once(program, args),
    );
    if let Err(e) = &outcome {
        eprintln!("retrykit: {}", e);
    }
    Ok(exit_code(&outcome))
}
