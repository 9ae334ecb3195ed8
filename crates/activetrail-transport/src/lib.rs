//! Transport abstraction layer for the ActiveTrail SDK
//!
//! The SDK builds every request in one place and hands a fully resolved
//! [`HttpRequest`] to a transport. This crate defines the two transport
//! capabilities the SDK can be driven by, plus reqwest-backed defaults:
//!
//! - **[`Transport`]**: suspending transport for async clients. Holds a
//!   connection pool that must be acquired with `setup` and released with
//!   `close`.
//! - **[`BlockingTransport`]**: thread-blocking transport for synchronous
//!   clients (feature `blocking`).
//! - **[`RetryPolicy`]**: which transport failures are retried, and how many
//!   times.
//!
//! # Usage
//!
//! ```ignore
//! use activetrail_transport::{HttpRequest, HttpTransport, Transport};
//!
//! let transport = HttpTransport::new();
//! transport.setup().await?;
//! let request = HttpRequest::new(http::Method::GET, "https://webapi.mymarketing.co.il/api/contacts");
//! let response = transport.send_http(request).await?;
//! transport.close()?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod http;
pub mod traits;

// Re-export commonly used types
pub use error::{Result, TransportError};
#[cfg(feature = "blocking")]
pub use http::BlockingHttpTransport;
pub use http::{HttpTransport, HttpTransportConfig, RetryPolicy};
pub use traits::{BlockingTransport, HttpRequest, HttpResponse, Transport};
