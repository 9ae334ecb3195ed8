//! Webhook types

use super::common::{Extra, Id};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A registered webhook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    /// Webhook id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    /// Endpoint receiving the events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Subscribed event types, e.g. `contact.created`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Headers sent with each delivery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// Unmodeled fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// Payload for creating or updating a webhook.
///
/// Create requires an http(s) `url` and at least one event. Update requires
/// at least one field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default, setter(into, strip_option), build_fn(error = "crate::Error"))]
#[serde(rename_all = "camelCase")]
pub struct WebhookInput {
    /// Endpoint receiving the events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Subscribed event types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Headers sent with each delivery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    /// Raw fields sent alongside the modeled ones
    #[serde(flatten)]
    #[builder(setter(custom))]
    pub extra: Extra,
}

impl WebhookInput {
    /// Create a builder for constructing a WebhookInput.
    pub fn builder() -> WebhookInputBuilder {
        WebhookInputBuilder::default()
    }

    /// True when no field would be sent.
    pub fn is_empty(&self) -> bool {
        self.url.is_none()
            && self.events.is_none()
            && self.description.is_none()
            && self.headers.is_none()
            && self.extra.is_empty()
    }
}

impl WebhookInputBuilder {
    /// Subscribe to one more event type.
    pub fn event(&mut self, event: impl Into<String>) -> &mut Self {
        self.events
            .get_or_insert_with(|| Some(Vec::new()))
            .get_or_insert_with(Vec::new)
            .push(event.into());
        self
    }

    /// Add one delivery header.
    pub fn header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers
            .get_or_insert_with(|| Some(BTreeMap::new()))
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Send an extra top-level field the SDK does not model.
    pub fn extra_field(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.extra
            .get_or_insert_with(Extra::new)
            .insert(key.into(), value.into());
        self
    }
}
