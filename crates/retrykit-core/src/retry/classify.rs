//! Classify HTTP status codes and curl errors into retry actions.
//!
//! Transient conditions (server errors, throttling, network trouble) are soft
//! failures; anything a retry cannot fix (bad credentials, missing resource,
//! malformed URL, TLS rejection) is a hard failure.

use super::action::Action;
use super::error::HttpError;

/// Classify an HTTP status code.
pub fn classify_http_status(code: u32) -> Action {
    match code {
        200..=299 => Action::Success,
        // Request timeout and rate limiting clear up on their own.
        408 | 429 => Action::SoftFail,
        500..=599 => Action::SoftFail,
        _ => Action::HardFail,
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> Action {
    if e.is_operation_timedout()
        || e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_partial_file()
    {
        return Action::SoftFail;
    }
    Action::HardFail
}

/// Classifier for work units returning [`HttpError`].
pub fn classify_http(outcome: Result<(), &HttpError>) -> Action {
    match outcome {
        Ok(()) => Action::Success,
        Err(HttpError::InvalidUrl { .. }) => Action::HardFail,
        Err(HttpError::Transport(e)) => classify_curl_error(e),
        Err(HttpError::Status(code)) => classify_http_status(*code),
    }
}
