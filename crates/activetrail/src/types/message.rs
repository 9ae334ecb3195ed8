//! Transactional message types

use super::common::{Extra, Id};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A transactional email.
///
/// `subject`, `content` and at least one recipient are required.
///
/// ```rust
/// use activetrail::types::EmailMessage;
///
/// let email = EmailMessage::builder()
///     .subject("Your receipt")
///     .content("<p>Thanks!</p>")
///     .recipients(vec!["dana@example.co.il".to_string()])
///     .from_email("shop@example.co.il")
///     .build()?;
/// assert_eq!(email.recipients.len(), 1);
/// # Ok::<(), activetrail::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default, setter(into, strip_option), build_fn(error = "crate::Error"))]
#[serde(rename_all = "camelCase")]
pub struct EmailMessage {
    /// Subject line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// HTML body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Recipient email addresses
    #[serde(default)]
    #[builder(setter(into))]
    pub recipients: Vec<String>,
    /// Sender display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    /// Sender address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,
    /// Reply-to address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    /// Raw fields sent alongside the modeled ones
    #[serde(flatten)]
    #[builder(setter(custom))]
    pub extra: Extra,
}

impl EmailMessage {
    /// Create a builder for constructing an EmailMessage.
    pub fn builder() -> EmailMessageBuilder {
        EmailMessageBuilder::default()
    }
}

impl EmailMessageBuilder {
    /// Add one recipient.
    pub fn recipient(&mut self, email: impl Into<String>) -> &mut Self {
        self.recipients
            .get_or_insert_with(Vec::new)
            .push(email.into());
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

/// A transactional SMS.
///
/// `content` and at least one recipient are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default, setter(into, strip_option), build_fn(error = "crate::Error"))]
#[serde(rename_all = "camelCase")]
pub struct SmsMessage {
    /// Message text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Recipient phone numbers
    #[serde(default)]
    #[builder(setter(into))]
    pub recipients: Vec<String>,
    /// Sender id shown on the handset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_id: Option<String>,
    /// Raw fields sent alongside the modeled ones
    #[serde(flatten)]
    #[builder(setter(custom))]
    pub extra: Extra,
}

impl SmsMessage {
    /// Create a builder for constructing an SmsMessage.
    pub fn builder() -> SmsMessageBuilder {
        SmsMessageBuilder::default()
    }
}

impl SmsMessageBuilder {
    /// Add one recipient.
    pub fn recipient(&mut self, phone: impl Into<String>) -> &mut Self {
        self.recipients
            .get_or_insert_with(Vec::new)
            .push(phone.into());
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

/// Acknowledgement returned when a message is accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReceipt {
    /// Message id, used for status and statistics lookups
    #[serde(skip_serializing_if = "Option::is_none", alias = "messageId")]
    pub id: Option<Id>,
    /// Initial status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Unmodeled fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// Delivery status of a sent message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageStatus {
    /// Message id
    #[serde(skip_serializing_if = "Option::is_none", alias = "messageId")]
    pub id: Option<Id>,
    /// Queued, sent, delivered, failed, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// When the message left the queue
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<String>,
    /// Unmodeled fields
    #[serde(flatten)]
    pub extra: Extra,
}
