//! Error type for one HTTP request/response cycle, shaped for retry classification.

use thiserror::Error;

/// Error returned by a single HTTP attempt (transport failure or unwanted status).
#[derive(Debug, Error)]
pub enum HttpError {
    /// The URL could not be parsed; retrying cannot help.
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// Curl reported an error (timeout, connection, TLS, etc.).
    #[error("{0}")]
    Transport(#[from] curl::Error),
    /// The response had a non-2xx status.
    #[error("HTTP {0}")]
    Status(u32),
}

impl HttpError {
    /// Status code of the response, if one was received.
    pub fn status(&self) -> Option<u32> {
        match self {
            HttpError::Status(code) => Some(*code),
            HttpError::InvalidUrl { .. } | HttpError::Transport(_) => None,
        }
    }
}
