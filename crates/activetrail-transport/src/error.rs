//! Transport error types

use std::error::Error as StdError;
use thiserror::Error;

/// Result type for transport operations
pub type Result<T> = std::result::Result<T, TransportError>;

/// Errors that can occur before an HTTP response is available.
///
/// A response with a non-2xx status is *not* a transport error; status
/// classification belongs to the SDK layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The per-request deadline elapsed
    #[error("Timeout")]
    Timeout,

    /// The connection could not be established or was dropped
    #[error("Connection error: {0}")]
    Connection(String),

    /// The request could not be built or a redirect could not be followed
    #[error("HTTP error: {0}")]
    Http(String),

    /// The transport has not been set up yet
    #[error("Transport is not open; call setup() first")]
    NotOpen,

    /// The transport was closed and can no longer be used
    #[error("Transport has been closed")]
    Closed,

    /// Generic transport error
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// True for lifecycle misuse (not opened, or already closed).
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::NotOpen | Self::Closed)
    }
}

impl From<reqwest::Error> for TransportError {
    /// Classify a reqwest failure.
    ///
    /// Anything that went wrong on the wire, whether connecting, sending the
    /// request or reading the body, is a [`Connection`](Self::Connection)
    /// error. Only failures to build the request or follow redirects stay
    /// [`Http`](Self::Http).
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_builder() || err.is_redirect() {
            Self::Http(describe(&err))
        } else if err.is_connect() || err.is_request() || err.is_body() || has_io_source(&err) {
            Self::Connection(describe(&err))
        } else {
            Self::Http(describe(&err))
        }
    }
}

/// The error message followed by its source chain.
fn describe(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn has_io_source(err: &(dyn StdError + 'static)) -> bool {
    let mut source = err.source();
    while let Some(cause) = source {
        if cause.is::<std::io::Error>() {
            return true;
        }
        source = cause.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(TransportError::Timeout.to_string(), "Timeout");
        assert_eq!(
            TransportError::Connection("refused".to_string()).to_string(),
            "Connection error: refused"
        );
        assert_eq!(TransportError::Closed.to_string(), "Transport has been closed");
    }

    #[test]
    fn test_is_lifecycle() {
        assert!(TransportError::NotOpen.is_lifecycle());
        assert!(TransportError::Closed.is_lifecycle());
        assert!(!TransportError::Timeout.is_lifecycle());
        assert!(!TransportError::Other("x".to_string()).is_lifecycle());
    }

    #[test]
    fn test_describe_walks_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let wrapped = Wrapped("send failed", io);
        assert_eq!(describe(&wrapped), "send failed: reset by peer");
        assert!(has_io_source(&wrapped));
    }

    #[derive(Debug)]
    struct Wrapped(&'static str, std::io::Error);

    impl std::fmt::Display for Wrapped {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.0)
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.1)
        }
    }
}
