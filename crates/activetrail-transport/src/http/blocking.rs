//! Blocking HTTP transport
//!
//! Implements [`BlockingTransport`] on top of `reqwest::blocking::Client`.
//! The pool is opened on construction and released when the transport is
//! dropped.
//!
//! `reqwest::blocking` spins up its own runtime thread, so this transport
//! must not be constructed or dropped from inside an async context.

use super::client::HttpTransportConfig;
use crate::error::{Result, TransportError};
use crate::traits::{BlockingTransport, HttpRequest, HttpResponse};
use reqwest::blocking::Client as BlockingClient;

/// Thread-blocking HTTP transport
#[derive(Debug, Clone)]
pub struct BlockingHttpTransport {
    client: BlockingClient,
}

impl BlockingHttpTransport {
    /// Create a blocking transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Create a blocking transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self> {
        let mut builder = BlockingClient::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host);

        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self { client })
    }
}

impl BlockingTransport for BlockingHttpTransport {
    fn send_http(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut req = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        let response = req.send()?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes()?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    fn name(&self) -> &'static str {
        "reqwest-blocking"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_blocking_transport_creation() {
        let transport = BlockingHttpTransport::new().expect("Failed to create transport");
        assert_eq!(transport.name(), "reqwest-blocking");
    }

    #[test]
    fn test_connection_refused_is_classified() {
        let transport = BlockingHttpTransport::with_config(HttpTransportConfig {
            connect_timeout: Duration::from_millis(200),
            ..Default::default()
        })
        .unwrap();

        // Port 9 (discard) is closed on test machines
        let request = HttpRequest::new(http::Method::GET, "http://127.0.0.1:9/");
        let err = transport.send_http(request).unwrap_err();
        assert!(matches!(
            err,
            TransportError::Connection(_) | TransportError::Timeout
        ));
    }
}
