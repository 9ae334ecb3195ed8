//! HTTP layer
//!
//! [`RequestSpec`] describes a call, [`RequestCore`] turns it into a wire
//! request and classifies the outcome, and [`Executor`] drives it over a
//! transport with retries and lifecycle checks.

pub use executor::Executor;
pub use pipeline::RequestCore;
pub use request::{RequestSpec, path_segment};
pub use response::{Success, map_response};

mod executor;
mod pipeline;
mod request;
mod response;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
