//! Async HTTP transport
//!
//! Implements the [`Transport`] trait on top of a pooled `reqwest::Client`.
//! The pool only exists between `setup` and `close`.

use crate::error::{Result, TransportError};
use crate::traits::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;
use tracing::debug;

/// Lifecycle of the pooled client.
#[derive(Debug, Default)]
enum PoolState {
    #[default]
    Idle,
    Open(ReqwestClient),
    Closed,
}

/// Async HTTP transport
///
/// Handles HTTP requests with:
/// - Connection pooling (one pool per transport)
/// - Per-request deadlines
/// - Explicit acquire (`setup`) and release (`close`) of the pool
///
/// Each request clones the pool handle out of the lock before awaiting, so a
/// cancelled request drops its handle without touching transport state, and
/// `close` never waits on in-flight requests.
#[derive(Debug)]
pub struct HttpTransport {
    config: HttpTransportConfig,
    state: RwLock<PoolState>,
}

impl HttpTransport {
    /// Create a new HTTP transport with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Create a new HTTP transport with custom configuration
    ///
    /// No connection is opened until [`Transport::setup`] is called.
    pub fn with_config(config: HttpTransportConfig) -> Self {
        Self {
            config,
            state: RwLock::new(PoolState::Idle),
        }
    }

    /// Get the transport configuration
    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }

    fn build_client(&self) -> Result<ReqwestClient> {
        let mut builder = ReqwestClient::builder()
            .timeout(self.config.timeout)
            .connect_timeout(self.config.connect_timeout)
            .pool_max_idle_per_host(self.config.pool_max_idle_per_host);

        if let Some(user_agent) = &self.config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        builder
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))
    }

    fn pooled_client(&self) -> Result<ReqwestClient> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        match &*state {
            PoolState::Open(client) => Ok(client.clone()),
            PoolState::Idle => Err(TransportError::NotOpen),
            PoolState::Closed => Err(TransportError::Closed),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send_http(&self, request: HttpRequest) -> Result<HttpResponse> {
        let client = self.pooled_client()?;
        try_send_request(&client, request).await
    }

    async fn setup(&self) -> Result<()> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        match &*state {
            PoolState::Open(_) => Ok(()),
            PoolState::Closed => Err(TransportError::Closed),
            PoolState::Idle => {
                *state = PoolState::Open(self.build_client()?);
                debug!("HTTP transport connection pool opened");
                Ok(())
            }
        }
    }

    fn close(&self) -> Result<()> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if matches!(*state, PoolState::Open(_)) {
            debug!("HTTP transport connection pool released");
        }
        *state = PoolState::Closed;
        Ok(())
    }

    fn is_open(&self) -> bool {
        matches!(
            *self.state.read().unwrap_or_else(PoisonError::into_inner),
            PoolState::Open(_)
        )
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

async fn try_send_request(client: &ReqwestClient, request: HttpRequest) -> Result<HttpResponse> {
    let mut req = client
        .request(request.method, &request.url)
        .headers(request.headers);

    if let Some(timeout) = request.timeout {
        req = req.timeout(timeout);
    }

    if let Some(body) = request.body {
        req = req.body(body);
    }

    let response = req.send().await?;

    let status = response.status().as_u16();
    let headers = response.headers().clone();
    let body = response.bytes().await?.to_vec();

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

/// HTTP transport configuration
#[derive(Clone, Debug)]
pub struct HttpTransportConfig {
    /// Default request timeout (a request's own deadline takes precedence)
    pub timeout: Duration,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// User-Agent header sent with every request
    pub user_agent: Option<String>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_max_idle_per_host: 10,
            user_agent: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_transport_creation() {
        let transport = HttpTransport::new();
        assert!(!transport.is_open());
        assert_eq!(transport.name(), "reqwest");
    }

    #[test]
    fn test_http_transport_with_config() {
        let config = HttpTransportConfig {
            timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(1),
            pool_max_idle_per_host: 2,
            user_agent: Some("test-agent".to_string()),
        };

        let transport = HttpTransport::with_config(config);
        assert_eq!(transport.config().timeout, Duration::from_secs(5));
        assert_eq!(transport.config().user_agent.as_deref(), Some("test-agent"));
    }

    #[tokio::test]
    async fn test_lifecycle_transitions() {
        let transport = HttpTransport::new();

        transport.setup().await.unwrap();
        assert!(transport.is_open());

        // A second setup on an open transport is a no-op
        transport.setup().await.unwrap();
        assert!(transport.is_open());

        transport.close().unwrap();
        assert!(!transport.is_open());

        // Closing twice is fine, reopening is not
        transport.close().unwrap();
        assert!(matches!(
            transport.setup().await,
            Err(TransportError::Closed)
        ));
    }

    #[tokio::test]
    async fn test_send_before_setup_fails_fast() {
        let transport = HttpTransport::new();
        let request = HttpRequest::new(http::Method::GET, "http://127.0.0.1:9/never");

        let result = transport.send_http(request).await;
        assert!(matches!(result, Err(TransportError::NotOpen)));
    }

    #[tokio::test]
    async fn test_send_after_close_fails_fast() {
        let transport = HttpTransport::new();
        transport.setup().await.unwrap();
        transport.close().unwrap();

        let request = HttpRequest::new(http::Method::GET, "http://127.0.0.1:9/never");
        let result = transport.send_http(request).await;
        assert!(matches!(result, Err(TransportError::Closed)));
    }
}
