//! Thread-blocking client
//!
//! Mirrors the async [`Client`](crate::Client) for callers without an async
//! runtime. The underlying `reqwest::blocking` pool is opened when the
//! client is built and released when the last clone is dropped, so there is
//! no `setup`/`close`.
//!
//! ```rust,no_run
//! use activetrail::blocking::Client;
//! use activetrail::types::ContactInput;
//!
//! # fn main() -> activetrail::Result<()> {
//! let client = Client::new("api-key")?;
//! let contact = client
//!     .contacts()
//!     .create(&ContactInput::with_email("dana@example.co.il"))?;
//! println!("created {:?}", contact.id);
//! # Ok(())
//! # }
//! ```

mod executor;
mod resources;

pub use executor::BlockingExecutor;
pub use resources::{Campaigns, Contacts, Groups, Messages, SmsCampaigns, Webhooks};

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::RequestCore;
use activetrail_transport::{BlockingHttpTransport, BlockingTransport, HttpTransportConfig};
use std::sync::{Arc, OnceLock};

/// Blocking client for the ActiveTrail API.
///
/// `Send + Sync + Clone`; clones share one transport and may be used from
/// several threads at once.
#[derive(Debug, Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    config: Arc<ClientConfig>,
    executor: BlockingExecutor,
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
    /// Must not be called from inside an async runtime.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::with_api_key(api_key))
    }

    /// Create a client from `config` over the default reqwest transport.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let core = RequestCore::new(&config)?;
        let transport = BlockingHttpTransport::with_config(HttpTransportConfig {
            timeout: config.timeout,
            user_agent: Some(config.user_agent()),
            ..Default::default()
        })
        .map_err(|e| Error::Config(format!("failed to build HTTP transport: {e}")))?;

        Ok(Self::assemble(config, core, Arc::new(transport)))
    }

    /// Create a client from `config` over a caller-supplied transport.
    pub fn from_transport(
        config: ClientConfig,
        transport: Arc<dyn BlockingTransport>,
    ) -> Result<Self> {
        let core = RequestCore::new(&config)?;
        Ok(Self::assemble(config, core, transport))
    }

    fn assemble(config: ClientConfig, core: RequestCore, transport: Arc<dyn BlockingTransport>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                config: Arc::new(config),
                executor: BlockingExecutor::new(core, transport),
                contacts: OnceLock::new(),
                campaigns: OnceLock::new(),
                messages: OnceLock::new(),
                webhooks: OnceLock::new(),
                groups: OnceLock::new(),
                sms_campaigns: OnceLock::new(),
            }),
        }
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
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
