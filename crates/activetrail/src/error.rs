//! Error types for the ActiveTrail SDK
//!
//! Every call through the SDK yields either a decoded value or an [`Error`].
//! HTTP-level failures are classified by status code into a fixed set of
//! kinds, each carrying an [`ApiError`] with the status, the server's message
//! and the raw body so a failure can be diagnosed without re-running it.

use activetrail_transport::TransportError;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail with an SDK error.
pub type Result<T> = std::result::Result<T, Error>;

/// Classification of an API failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad or expired API key (401, 403)
    Authentication,
    /// Throttled by the server (429). Not retried by the SDK.
    RateLimit,
    /// Malformed input, rejected locally or by the server (400, 422)
    Validation,
    /// Missing resource (404)
    NotFound,
    /// Server-side failure (5xx)
    Server,
    /// Anything else, including transport failures after retries
    Unknown,
}

impl ErrorKind {
    /// Classify a non-success HTTP status.
    ///
    /// The table is total: every status outside the listed ones is `Unknown`.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ErrorKind::Authentication,
            429 => ErrorKind::RateLimit,
            400 | 422 => ErrorKind::Validation,
            404 => ErrorKind::NotFound,
            500..=599 => ErrorKind::Server,
            _ => ErrorKind::Unknown,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Authentication => "authentication",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Server => "server",
            ErrorKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Details of a classified failure.
///
/// `status` is 0 when no HTTP response exists (local validation, transport
/// failure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code, or 0 if the request never produced a response
    pub status: u16,
    /// Error message parsed from the body, or the raw text
    pub message: String,
    /// Raw response body for diagnostics
    pub raw_body: Option<String>,
    /// `Retry-After` hint sent with a 429
    pub retry_after: Option<Duration>,
}

impl ApiError {
    /// Create an error detail for the given status.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            raw_body: None,
            retry_after: None,
        }
    }

    /// Create an error detail for a failure that never reached the server.
    pub fn local(message: impl Into<String>) -> Self {
        Self::new(0, message)
    }

    /// Attach the raw response body.
    pub fn with_raw_body(mut self, raw_body: impl Into<String>) -> Self {
        self.raw_body = Some(raw_body.into());
        self
    }

    /// Attach a `Retry-After` hint.
    pub fn with_retry_after(mut self, retry_after: Option<Duration>) -> Self {
        self.retry_after = retry_after;
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(status {}): {}", self.status, self.message)
    }
}

/// Main error type for the ActiveTrail SDK.
#[derive(Debug, Error)]
pub enum Error {
    /// Authentication failed (401, 403).
    #[error("Authentication failed {0}")]
    Authentication(ApiError),

    /// Rate limit exceeded (429). Back off and retry later.
    #[error("Rate limit exceeded {0}")]
    RateLimit(ApiError),

    /// Request rejected (400, 422) or failed local validation (status 0).
    #[error("Validation error {0}")]
    Validation(ApiError),

    /// Resource not found (404).
    #[error("Resource not found {0}")]
    NotFound(ApiError),

    /// Server error (5xx).
    #[error("Server error {0}")]
    Server(ApiError),

    /// Unclassified status, undecodable response, or transport failure.
    #[error("API error {0}")]
    Unknown(ApiError),

    /// The client was used outside its open lifecycle.
    #[error("Client usage error: {0}")]
    Usage(String),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Build the error variant for a kind.
    pub fn from_kind(kind: ErrorKind, detail: ApiError) -> Self {
        match kind {
            ErrorKind::Authentication => Error::Authentication(detail),
            ErrorKind::RateLimit => Error::RateLimit(detail),
            ErrorKind::Validation => Error::Validation(detail),
            ErrorKind::NotFound => Error::NotFound(detail),
            ErrorKind::Server => Error::Server(detail),
            ErrorKind::Unknown => Error::Unknown(detail),
        }
    }

    /// Create an API error from a non-success HTTP response.
    pub fn from_response(status: u16, body: &str, headers: &http::HeaderMap) -> Self {
        let kind = ErrorKind::from_status(status);
        let mut detail = ApiError::new(status, extract_message(status, body));

        if !body.is_empty() {
            detail = detail.with_raw_body(body);
        }

        if kind == ErrorKind::RateLimit {
            detail = detail.with_retry_after(parse_retry_after(headers));
        }

        Self::from_kind(kind, detail)
    }

    /// Create a local validation error. No request is sent.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(ApiError::local(message))
    }

    /// Wrap a transport failure that survived `attempts` attempts.
    pub fn transport(error: TransportError, attempts: u32) -> Self {
        if error.is_lifecycle() {
            return Error::Usage(error.to_string());
        }

        let message = if attempts > 1 {
            format!("transport failure after {attempts} attempts: {error}")
        } else {
            format!("transport failure: {error}")
        };
        Error::Unknown(ApiError::local(message))
    }

    /// The classification of this error, if it is an API error.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Authentication(_) => Some(ErrorKind::Authentication),
            Error::RateLimit(_) => Some(ErrorKind::RateLimit),
            Error::Validation(_) => Some(ErrorKind::Validation),
            Error::NotFound(_) => Some(ErrorKind::NotFound),
            Error::Server(_) => Some(ErrorKind::Server),
            Error::Unknown(_) => Some(ErrorKind::Unknown),
            Error::Usage(_) | Error::Config(_) => None,
        }
    }

    /// The error details, if this is an API error.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Authentication(detail)
            | Error::RateLimit(detail)
            | Error::Validation(detail)
            | Error::NotFound(detail)
            | Error::Server(detail)
            | Error::Unknown(detail) => Some(detail),
            Error::Usage(_) | Error::Config(_) => None,
        }
    }

    /// HTTP status code (0 when no response was received).
    pub fn status(&self) -> Option<u16> {
        self.api_error().map(|detail| detail.status)
    }

    /// Raw response body, if any.
    pub fn raw_body(&self) -> Option<&str> {
        self.api_error().and_then(|detail| detail.raw_body.as_deref())
    }

    /// Get retry delay if this is a rate limit error with retry-after.
    pub fn retry_after(&self) -> Option<Duration> {
        if let Error::RateLimit(detail) = self {
            detail.retry_after
        } else {
            None
        }
    }

    /// True if the failure happened before anything was sent.
    pub fn is_local(&self) -> bool {
        matches!(self.status(), Some(0)) || matches!(self, Error::Usage(_) | Error::Config(_))
    }
}

impl From<TransportError> for Error {
    fn from(error: TransportError) -> Self {
        Error::transport(error, 1)
    }
}

impl From<derive_builder::UninitializedFieldError> for Error {
    fn from(error: derive_builder::UninitializedFieldError) -> Self {
        Error::validation(format!("{} is required", error.field_name()))
    }
}

/// Pull a human-readable message out of an error body.
///
/// JSON bodies are searched for the usual message fields; when none is
/// present the compact JSON is used. Non-JSON bodies are used verbatim and
/// empty bodies fall back to the status reason phrase.
fn extract_message(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return http::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("HTTP error")
            .to_string();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(json) => message_field(&json).unwrap_or_else(|| json.to_string()),
        Err(_) => trimmed.to_string(),
    }
}

fn message_field(json: &Value) -> Option<String> {
    for field in ["message", "Message"] {
        if let Some(message) = json.get(field).and_then(Value::as_str) {
            return Some(message.to_string());
        }
    }

    match json.get("error") {
        Some(Value::String(message)) => return Some(message.clone()),
        Some(nested @ Value::Object(_)) => {
            if let Some(message) = nested.get("message").and_then(Value::as_str) {
                return Some(message.to_string());
            }
        }
        _ => {}
    }

    json.get("error_description")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn parse_retry_after(headers: &http::HeaderMap) -> Option<Duration> {
    headers
        .get(http::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    #[rstest]
    #[case(401, ErrorKind::Authentication)]
    #[case(403, ErrorKind::Authentication)]
    #[case(429, ErrorKind::RateLimit)]
    #[case(400, ErrorKind::Validation)]
    #[case(422, ErrorKind::Validation)]
    #[case(404, ErrorKind::NotFound)]
    #[case(500, ErrorKind::Server)]
    #[case(502, ErrorKind::Server)]
    #[case(599, ErrorKind::Server)]
    #[case(302, ErrorKind::Unknown)]
    #[case(405, ErrorKind::Unknown)]
    #[case(409, ErrorKind::Unknown)]
    #[case(418, ErrorKind::Unknown)]
    #[case(600, ErrorKind::Unknown)]
    fn test_status_classification(#[case] status: u16, #[case] expected: ErrorKind) {
        assert_eq!(ErrorKind::from_status(status), expected);

        let error = Error::from_response(status, "", &http::HeaderMap::new());
        assert_eq!(error.kind(), Some(expected));
        assert_eq!(error.status(), Some(status));
    }

    #[test]
    fn test_error_401_json_message() {
        let body = r#"{"Message":"Authorization has been denied for this request."}"#;
        let error = Error::from_response(401, body, &http::HeaderMap::new());

        assert_matches!(&error, Error::Authentication(detail) => {
            assert_eq!(detail.message, "Authorization has been denied for this request.");
            assert_eq!(detail.raw_body.as_deref(), Some(body));
        });
    }

    #[test]
    fn test_error_nested_message() {
        let body = r#"{"error":{"code":"bad_field","message":"email is invalid"}}"#;
        let error = Error::from_response(422, body, &http::HeaderMap::new());

        assert_matches!(error, Error::Validation(detail) => {
            assert_eq!(detail.message, "email is invalid");
        });
    }

    #[test]
    fn test_error_string_error_field() {
        let body = r#"{"error":"contact does not exist"}"#;
        let error = Error::from_response(404, body, &http::HeaderMap::new());
        assert_eq!(error.api_error().unwrap().message, "contact does not exist");
    }

    #[test]
    fn test_error_json_without_message_uses_compact_json() {
        let body = r#"{ "errors": ["a", "b"] }"#;
        let error = Error::from_response(400, body, &http::HeaderMap::new());
        assert_eq!(error.api_error().unwrap().message, r#"{"errors":["a","b"]}"#);
    }

    #[test]
    fn test_error_invalid_json_fallback() {
        let body = "Internal Server Error";
        let error = Error::from_response(500, body, &http::HeaderMap::new());

        assert_matches!(error, Error::Server(detail) => {
            assert_eq!(detail.message, "Internal Server Error");
            assert_eq!(detail.raw_body.as_deref(), Some("Internal Server Error"));
        });
    }

    #[test]
    fn test_error_empty_body_uses_reason_phrase() {
        let error = Error::from_response(503, "", &http::HeaderMap::new());

        assert_matches!(error, Error::Server(detail) => {
            assert_eq!(detail.message, "Service Unavailable");
            assert_eq!(detail.raw_body, None);
        });
    }

    #[test]
    fn test_error_429_retry_after_header() {
        let mut headers = http::HeaderMap::new();
        headers.insert("retry-after", "60".parse().unwrap());

        let error = Error::from_response(429, "slow down", &headers);
        assert_eq!(error.kind(), Some(ErrorKind::RateLimit));
        assert_eq!(error.retry_after(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_error_retry_after_only_for_rate_limit() {
        let mut headers = http::HeaderMap::new();
        headers.insert("retry-after", "60".parse().unwrap());

        let error = Error::from_response(503, "", &headers);
        assert_eq!(error.retry_after(), None);
    }

    #[test]
    fn test_validation_is_local() {
        let error = Error::validation("email is required");

        assert_eq!(error.kind(), Some(ErrorKind::Validation));
        assert_eq!(error.status(), Some(0));
        assert!(error.is_local());
        assert_eq!(error.to_string(), "Validation error (status 0): email is required");
    }

    #[test]
    fn test_transport_error_mapping() {
        let error = Error::transport(TransportError::Timeout, 3);
        assert_matches!(&error, Error::Unknown(detail) => {
            assert_eq!(detail.status, 0);
            assert!(detail.message.contains("after 3 attempts"));
            assert!(detail.message.contains("Timeout"));
        });

        assert_matches!(Error::from(TransportError::Closed), Error::Usage(_));
        assert_matches!(Error::from(TransportError::NotOpen), Error::Usage(_));
    }

    #[test]
    fn test_display_includes_status() {
        let error = Error::from_response(
            404,
            r#"{"message":"no such contact"}"#,
            &http::HeaderMap::new(),
        );
        assert_eq!(
            error.to_string(),
            "Resource not found (status 404): no such contact"
        );
    }

    #[test]
    fn test_usage_and_config_have_no_kind() {
        assert_eq!(Error::Usage("closed".to_string()).kind(), None);
        assert_eq!(Error::Config("bad url".to_string()).status(), None);
    }
}
