//! Transport traits and wire types
//!
//! Defines the two transport capabilities (suspending and blocking) and the
//! request/response values exchanged with them.

use crate::error::Result;
use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use std::fmt;
use std::time::Duration;

/// HTTP request handed to a transport
///
/// A fully resolved request: absolute URL (query included), final headers
/// and serialized body. Transports send it as-is.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: Method,

    /// Absolute request URL, query string included
    pub url: String,

    /// Request headers
    pub headers: HeaderMap,

    /// Request body (optional)
    pub body: Option<Vec<u8>>,

    /// Hard client-side deadline for this request
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Create a new HTTP request
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
            timeout: None,
        }
    }

    /// Add a header to the request
    pub fn with_header(mut self, key: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Set the request body
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the request deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP response
///
/// Represents an HTTP response received from the server, whatever its status.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Response headers
    pub headers: HeaderMap,

    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a new HTTP response
    pub fn new(status: u16, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Get a header value by name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Suspending transport used by async clients.
///
/// Implementations own a connection resource with an explicit lifecycle:
/// `setup` acquires it, `close` releases it. `close` must not block, so it
/// can run from a drop guard when a scope is cancelled.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Send an HTTP request and receive a response
    ///
    /// Exactly one attempt is made; retrying is the caller's decision.
    async fn send_http(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Acquire the connection resource
    async fn setup(&self) -> Result<()>;

    /// Release the connection resource. Idempotent.
    fn close(&self) -> Result<()>;

    /// Check if the transport is ready to send
    fn is_open(&self) -> bool;

    /// Transport name for logging
    fn name(&self) -> &'static str;
}

/// Thread-blocking transport used by synchronous clients.
///
/// Resources are acquired on construction and released on drop.
pub trait BlockingTransport: Send + Sync + fmt::Debug {
    /// Send an HTTP request, blocking the calling thread until completion
    /// or timeout. Exactly one attempt is made.
    fn send_http(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Transport name for logging
    fn name(&self) -> &'static str;
}
