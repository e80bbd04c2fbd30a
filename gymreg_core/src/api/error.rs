use reqwest::StatusCode;
use serde::{de::IgnoredAny, Deserialize};
use thiserror::Error;

/// Easy alias for error handling
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can happen while processing requests
#[derive(Debug, Error)]
pub enum Error {
    /// We couldn't parse a URL, for example if the configured server was
    /// invalid.
    #[error("URL error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The request couldn't be completed at all, for example because the
    /// server is unreachable.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered, but not with a success status.
    #[error("server rejected the request ({status})")]
    Rejected {
        /// The status the server answered with
        status: StatusCode,

        /// The server's explanation, if it gave one we could read
        detail: Option<String>,
    },
}

/// The body the account service sends along with a non-success status.
#[derive(Debug, Deserialize)]
pub struct ErrorResp {
    /// A human-readable reason. Other shapes (e.g. lists of validation
    /// problems) are accepted but not shown.
    #[serde(default)]
    pub detail: Option<Detail>,
}

/// The possible shapes of `ErrorResp::detail`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Detail {
    /// A message we can show as-is
    Message(String),

    /// Anything else
    Other(IgnoredAny),
}

impl ErrorResp {
    /// Pull a displayable message out of an error body. Returns `None` if the
    /// body isn't JSON, has no `detail`, or `detail` isn't a string.
    pub fn message_from_body(body: &[u8]) -> Option<String> {
        match serde_json::from_slice::<Self>(body) {
            Ok(Self {
                detail: Some(Detail::Message(message)),
            }) => Some(message),
            _ => None,
        }
    }
}
