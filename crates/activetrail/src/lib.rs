//! # ActiveTrail SDK
//!
//! Rust SDK for the ActiveTrail marketing automation API supporting:
//! - Contacts, campaigns, SMS campaigns, transactional messages, webhooks and groups
//! - Async client with an explicit `setup`/`close` lifecycle
//! - Thread-blocking client (feature `blocking`)
//! - Typed errors mapped from HTTP status codes
//! - Immediate retries for timeouts and connection failures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use activetrail::{Client, types::ContactInput};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new("your-api-key")?;
//!
//!     let contact = client
//!         .scope(|client| async move {
//!             let input = ContactInput::builder()
//!                 .email("dana@example.co.il")
//!                 .first_name("Dana")
//!                 .build()?;
//!             client.contacts().create(&input).await
//!         })
//!         .await?;
//!
//!     println!("{:?}", contact.id);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use client::{Client, ClientBuilder};
pub use config::ClientConfig;
pub use error::{ApiError, Error, ErrorKind, Result};
pub use types::*;

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod resources;
pub mod types;
pub mod validation;

// Optional blocking client
#[cfg(feature = "blocking")]
#[cfg_attr(docsrs, doc(cfg(feature = "blocking")))]
pub mod blocking;

// Re-export key dependencies for convenience
pub use activetrail_transport as transport;
pub use async_trait::async_trait;
pub use serde_json::Value as JsonValue;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use activetrail::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Client, ClientConfig, Error, ErrorKind, Result,
        types::{
            CampaignInput, ContactInput, EmailMessage, GroupInput, GroupMemberInput, ListOptions,
            MemberQuery, Page, ScheduleRequest, SmsMessage, WebhookInput,
        },
    };

    #[cfg(feature = "blocking")]
    pub use crate::blocking::Client as BlockingClient;
}

/// SDK version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://webapi.mymarketing.co.il/api/";
