//! Tests for `probe`, `config` and global options.

use super::parse;
use crate::cli::CliCommand;
use std::path::Path;

#[test]
fn cli_parse_probe() {
    let cli = parse(&[
        "retrykit",
        "probe",
        "https://example.com/health",
        "--timeout",
        "3",
        "--backoff-limit",
        "4",
    ]);
    match cli.command {
        CliCommand::Probe {
            url,
            policy,
            timeout,
        } => {
            assert_eq!(url, "https://example.com/health");
            assert_eq!(timeout, Some(3));
            assert_eq!(policy.backoff_limit, Some(4.0));
            assert_eq!(policy.up_to, None);
        }
        _ => panic!("expected Probe"),
    }
}

#[test]
fn cli_parse_config_with_global_options() {
    let cli = parse(&["retrykit", "config", "--config", "/tmp/rk.toml", "--log-stderr"]);
    assert!(matches!(cli.command, CliCommand::Config));
    assert_eq!(cli.config.as_deref(), Some(Path::new("/tmp/rk.toml")));
    assert!(cli.log_stderr);
}

#[test]
fn explicit_config_file_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[retry]\nup_to_secs = 1\nfirst_delay_secs = 1\nbackoff_limit_secs = 1\n")
        .unwrap();
    let cli = parse(&["retrykit", "--config", path.to_str().unwrap(), "config"]);
    assert_eq!(cli.run().unwrap(), 0);
}

#[test]
fn missing_explicit_config_is_an_error() {
    let cli = parse(&["retrykit", "--config", "/nonexistent/retrykit.toml", "config"]);
    assert!(cli.run().is_err());
}
