//! Error types and handling for chanflow
//!
//! Stream construction fails fast on malformed arguments. Failures raised by
//! user callbacks running on spawned workers never surface here as panics;
//! they are intercepted at the worker boundary and reported as
//! [`StreamError::InterceptedFailure`].

use thiserror::Error;

/// Main error type for stream operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// A caller supplied a malformed parameter (zero sizes, self-concat, bad config)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// A terminal operation needed an element but the stream was empty
    #[error("no element")]
    EmptyResult,
    /// A user callback failed on a worker and the failure was swallowed
    #[error("intercepted failure: {0}")]
    InterceptedFailure(String),
}

impl StreamError {
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        StreamError::InvalidArgument(msg.into())
    }
}

impl From<serde_json::Error> for StreamError {
    fn from(err: serde_json::Error) -> Self {
        StreamError::InvalidArgument(err.to_string())
    }
}

/// Result type for chanflow operations
pub type StreamResult<T> = Result<T, StreamError>;
