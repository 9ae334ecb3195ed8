//! HTTP transport implementation
//!
//! reqwest-backed transports for both scheduling models, and the retry policy
//! applied to their failures.

#[cfg(feature = "blocking")]
pub mod blocking;
pub mod client;
pub mod retry;

#[cfg(feature = "blocking")]
pub use blocking::BlockingHttpTransport;
pub use client::{HttpTransport, HttpTransportConfig};
pub use retry::RetryPolicy;
