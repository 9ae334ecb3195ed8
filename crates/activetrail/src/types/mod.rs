//! Request and response types for the ActiveTrail API
//!
//! Every response type models the fields the SDK knows about as `Option`s
//! and keeps everything else in a flattened `extra` map, so a value decoded
//! from the API serializes back without losing fields. Input payloads are
//! built with `derive_builder` builders.

pub use campaign::*;
pub use common::*;
pub use contact::*;
pub use group::*;
pub use message::*;
pub use sms_campaign::*;
pub use webhook::*;

pub mod campaign;
pub mod common;
pub mod contact;
pub mod group;
pub mod message;
pub mod sms_campaign;
pub mod webhook;
