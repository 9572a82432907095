//! One HTTP request/response cycle as a retryable work unit.
//!
//! Uses the curl crate (libcurl) for a GET whose body is discarded. Each call
//! carries its own connect and total timeouts so that a single attempt can
//! never hold a retry loop hostage.

use std::time::Duration;

use crate::retry::HttpError;

/// Connect timeout cap; the total timeout passed by the caller bounds it too.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

/// Performs a GET on `url` and returns the final status code (after redirects).
///
/// Runs in the current thread.
pub fn get_status(url: &str, timeout: Duration) -> Result<u32, HttpError> {
    let parsed = url::Url::parse(url).map_err(|source| HttpError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let mut easy = curl::easy::Easy::new();
    easy.url(parsed.as_str())?;
    easy.follow_location(true)?;
    easy.connect_timeout(CONNECT_TIMEOUT.min(timeout))?;
    easy.timeout(timeout)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| Ok(data.len()))?;
        transfer.perform()?;
    }

    Ok(easy.response_code()?)
}

/// Like [`get_status`] but treats any non-2xx status as an error.
pub fn check(url: &str, timeout: Duration) -> Result<(), HttpError> {
    let code = get_status(url, timeout)?;
    if !(200..300).contains(&code) {
        return Err(HttpError::Status(code));
    }
    tracing::debug!(url, code, "probe succeeded");
    Ok(())
}
