//! Main client implementation for the ActiveTrail API

use std::future::Future;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use activetrail_transport::{HttpTransport, HttpTransportConfig, Transport};
use tracing::warn;

use crate::{
    config::{ClientConfig, ClientConfigBuilder},
    error::Result,
    http::{Executor, RequestCore},
    resources::{Campaigns, Contacts, Groups, Messages, SmsCampaigns, Webhooks},
};

/// Async client for the ActiveTrail API.
///
/// The client owns one transport with an explicit lifecycle: requests are
/// only accepted between [`setup`](Self::setup) and [`close`](Self::close).
/// [`scope`](Self::scope) wraps both and is the usual entry point.
///
/// Cheap to clone; clones share the transport, the lifecycle and the
/// resource façades.
///
/// # Example
///
/// ```rust,no_run
/// use activetrail::{Client, ListOptions};
///
/// # async fn example() -> activetrail::Result<()> {
/// let client = Client::new("api-key")?;
/// let page = client
///     .scope(|client| async move {
///         client.contacts().list(&ListOptions::new().limit(10)).await
///     })
///     .await?;
/// println!("{} contacts", page.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    config: Arc<ClientConfig>,
    executor: Executor,

    // Lazily created façades, all sharing `executor`
    contacts: OnceLock<Contacts>,
    campaigns: OnceLock<Campaigns>,
    messages: OnceLock<Messages>,
    webhooks: OnceLock<Webhooks>,
    groups: OnceLock<Groups>,
    sms_campaigns: OnceLock<SmsCampaigns>,
}

impl Client {
    /// Create a client with an API key and default settings.
    ///
    /// # Errors
    ///
    /// [`Error::Config`](crate::Error::Config) if the key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Create a client builder for advanced configuration.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client from `config` over the default reqwest transport.
    ///
    /// # Errors
    ///
    /// [`Error::Config`](crate::Error::Config) if the API key is missing or
    /// the base URL is not an http(s) URL.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::with_config(HttpTransportConfig {
            timeout: config.timeout,
            user_agent: Some(config.user_agent()),
            ..Default::default()
        });
        Self::from_transport(config, Arc::new(transport))
    }

    /// Create a client from `config` over a caller-supplied transport.
    pub fn from_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let core = RequestCore::new(&config)?;
        Ok(Self {
            inner: Arc::new(ClientInner {
                config: Arc::new(config),
                executor: Executor::new(core, transport),
                contacts: OnceLock::new(),
                campaigns: OnceLock::new(),
                messages: OnceLock::new(),
                webhooks: OnceLock::new(),
                groups: OnceLock::new(),
                sms_campaigns: OnceLock::new(),
            }),
        })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Open the transport. Idempotent while open.
    ///
    /// # Errors
    ///
    /// [`Error::Usage`](crate::Error::Usage) once the client was closed.
    pub async fn setup(&self) -> Result<()> {
        self.inner.executor.setup().await
    }

    /// Release the transport. Idempotent; later requests fail with
    /// [`Error::Usage`](crate::Error::Usage).
    pub fn close(&self) -> Result<()> {
        self.inner.executor.close()
    }

    /// Check if the client accepts requests.
    pub fn is_open(&self) -> bool {
        self.inner.executor.is_open()
    }

    /// Run `f` with an open client, closing it afterwards.
    ///
    /// The client is closed on every exit path: success, error, panic
    /// unwinding, or the returned future being dropped before completion.
    pub async fn scope<F, Fut, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(Client) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.setup().await?;
        let _guard = CloseGuard { client: self };
        f(self.clone()).await
    }

    /// Contacts API.
    pub fn contacts(&self) -> &Contacts {
        self.inner
            .contacts
            .get_or_init(|| Contacts::new(self.inner.executor.clone()))
    }

    /// Campaigns API.
    pub fn campaigns(&self) -> &Campaigns {
        self.inner
            .campaigns
            .get_or_init(|| Campaigns::new(self.inner.executor.clone()))
    }

    /// Transactional messages API.
    pub fn messages(&self) -> &Messages {
        self.inner
            .messages
            .get_or_init(|| Messages::new(self.inner.executor.clone()))
    }

    /// Webhooks API.
    pub fn webhooks(&self) -> &Webhooks {
        self.inner
            .webhooks
            .get_or_init(|| Webhooks::new(self.inner.executor.clone()))
    }

    /// Contact groups API.
    pub fn groups(&self) -> &Groups {
        self.inner
            .groups
            .get_or_init(|| Groups::new(self.inner.executor.clone()))
    }

    /// SMS campaigns API.
    pub fn sms_campaigns(&self) -> &SmsCampaigns {
        self.inner
            .sms_campaigns
            .get_or_init(|| SmsCampaigns::new(self.inner.executor.clone()))
    }
}

/// Closes the client when dropped.
struct CloseGuard<'a> {
    client: &'a Client,
}

impl Drop for CloseGuard<'_> {
    fn drop(&mut self) {
        if let Err(error) = self.client.close() {
            warn!(error = %error, "Failed to close client");
        }
    }
}

/// Builder for [`Client`].
#[derive(Debug, Default)]
pub struct ClientBuilder {
    config: ClientConfigBuilder,
    transport: Option<Arc<dyn Transport>>,
}

impl ClientBuilder {
    /// Set the API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config = self.config.api_key(api_key);
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config = self.config.base_url(base_url);
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Set the number of retries after a transport failure.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config = self.config.max_retries(max_retries);
        self
    }

    /// Override the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.user_agent(user_agent);
        self
    }

    /// Add a header sent with every request.
    ///
    /// # Errors
    ///
    /// [`Error::Config`](crate::Error::Config) if the name or value is not a
    /// valid header.
    pub fn default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        self.config = self.config.default_header(key, value)?;
        Ok(self)
    }

    /// Use a custom transport instead of the default reqwest one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Client> {
        let config = self.config.build();
        match self.transport {
            Some(transport) => Client::from_transport(config, transport),
            None => Client::from_config(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use assert_matches::assert_matches;

    #[test]
    fn test_client_requires_api_key() {
        assert_matches!(Client::builder().build(), Err(Error::Config(_)));
        assert_matches!(Client::new("   "), Err(Error::Config(_)));
    }

    #[test]
    fn test_client_rejects_bad_base_url() {
        let result = Client::builder()
            .api_key("k")
            .base_url("ftp://invalid.example.com")
            .build();
        assert_matches!(result, Err(Error::Config(msg)) => assert!(msg.contains("ftp")));
    }

    #[test]
    fn test_resources_share_one_executor() {
        let client = Client::new("k").unwrap();
        let clone = client.clone();

        assert!(std::ptr::eq(client.contacts(), clone.contacts()));
        let _ = (client.campaigns(), client.messages(), client.webhooks(), client.groups());
        assert!(std::ptr::eq(client.sms_campaigns(), clone.sms_campaigns()));
        assert_eq!(client.config().max_retries, crate::config::DEFAULT_MAX_RETRIES);
        assert_eq!(client.config().base_url(), crate::DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn test_scope_closes_on_error() {
        let client = Client::new("k").unwrap();

        let result: Result<()> = client
            .scope(|client| async move {
                assert!(client.is_open());
                Err(Error::Usage("stop".to_string()))
            })
            .await;

        assert_matches!(result, Err(Error::Usage(_)));
        assert!(!client.is_open());
        assert_matches!(client.setup().await, Err(Error::Usage(_)));
    }

    #[tokio::test]
    async fn test_scope_closes_when_cancelled() {
        let client = Client::new("k").unwrap();

        let scoped = client.scope(|_client| std::future::pending::<Result<()>>());
        let outcome = tokio::time::timeout(Duration::from_millis(20), scoped).await;

        assert!(outcome.is_err());
        assert!(!client.is_open());
    }
}
