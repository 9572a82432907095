//! `retrykit probe <url>` – wait for an HTTP endpoint to answer 2xx.

use anyhow::Result;
use retrykit_core::config::RetrykitConfig;
use retrykit_core::probe;
use retrykit_core::retry::classify_http;
use std::time::Duration;

use crate::cli::PolicyArgs;

pub fn run_probe(
    cfg: &RetrykitConfig,
    policy: &PolicyArgs,
    url: &str,
    timeout_secs: Option<u64>,
) -> Result<i32> {
    let (retry, backoff) = policy.resolve(&cfg.retry)?;
    let retry = retry.with_span(tracing::info_span!("probe", url));
    let timeout = timeout_secs
        .map(Duration::from_secs)
        .unwrap_or_else(|| cfg.probe.timeout());

    match retry.run(backoff, classify_http, || probe::check(url, timeout)) {
        Ok(()) => {
            println!("{}: OK", url);
            Ok(0)
        }
        Err(e) => {
            eprintln!("{}: {}", url, e);
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_url_reports_failure_exit_code() {
        // Bind then drop to get a port nobody listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let policy = PolicyArgs {
            up_to: Some(0.0),
            ..Default::default()
        };
        let url = format!("http://127.0.0.1:{}/", port);
        let code = run_probe(&RetrykitConfig::default(), &policy, &url, Some(2)).unwrap();
        assert_eq!(code, 1);
    }
}
