use serde::{ser::Serializer, Serialize};
use thiserror::Error;

/// A specialized `Result` type for the Zulip API crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Message used when the server reports a failure without saying why.
pub const DEFAULT_API_ERROR: &str = "the server returned an error without a message";

/// The error type for the Zulip API crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid event types: {0}")]
    InvalidEventTypes(String),

    #[error("invalid fetch event types: {0}")]
    InvalidFetchEventTypes(String),

    #[error("invalid narrow: {0}")]
    InvalidNarrow(String),

    #[error("invalid recipients: {0}")]
    InvalidRecipients(String),

    #[error("invalid subscriptions: {0}")]
    InvalidSubscriptions(String),

    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("missing configuration: {0} is not set")]
    MissingConfig(&'static str),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with `result: "error"` or a non-empty `msg`.
    #[error("API error: {message}")]
    Api {
        message: String,
        code: Option<String>,
    },

    #[error("unparseable response (HTTP {status}): {body}")]
    UnparseableResponse { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl Error {
    /// Returns true for errors raised before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidEventTypes(_)
                | Error::InvalidFetchEventTypes(_)
                | Error::InvalidNarrow(_)
                | Error::InvalidRecipients(_)
                | Error::InvalidSubscriptions(_)
                | Error::MissingParameter(_)
        )
    }

    /// The server-supplied message, when this is an API error.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Error::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
