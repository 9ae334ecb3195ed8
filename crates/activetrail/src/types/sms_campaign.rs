//! SMS campaign and operational message types
//!
//! The SMS endpoints mix naming conventions: campaign payloads are
//! camelCase while segments, operational message details and their
//! scheduling use snake_case keys. The serde attributes below follow the
//! wire format field by field.

use super::common::{Extra, Id};
use crate::http::RequestSpec;
use chrono::{DateTime, NaiveDateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An SMS campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsCampaign {
    /// Campaign id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    /// Internal name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Message text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Sender name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    /// Opt-out text appended to the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsubscribe_text: Option<String>,
    /// Draft, scheduled, sent, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Who receives the campaign
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<SmsSegment>,
    /// When it is sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduling: Option<SmsScheduling>,
    /// Unmodeled fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// Recipients of an SMS campaign and sending restrictions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default, setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct SmsSegment {
    /// Groups that receive the campaign. At least one is required.
    #[serde(default)]
    #[builder(setter(custom))]
    pub group_ids: Vec<Id>,
    /// Skip contacts that are in these groups
    #[serde(
        rename = "restricated_group_ids",
        skip_serializing_if = "Option::is_none"
    )]
    pub restricted_group_ids: Option<Vec<Id>>,
    /// Skip contacts that received these campaigns
    #[serde(
        rename = "restricated_campaign_ids",
        skip_serializing_if = "Option::is_none"
    )]
    pub restricted_campaign_ids: Option<Vec<Id>>,
    /// Mailing list the campaign goes to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailing_list_id: Option<Id>,
    /// Cap on the number of messages sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_amount: Option<u64>,
    /// Sending profile, used instead of a sender name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_sending_profile_id: Option<Id>,
    /// Unmodeled fields
    #[serde(flatten)]
    #[builder(setter(skip))]
    pub extra: Extra,
}

impl SmsSegment {
    /// Create a builder for constructing an SmsSegment.
    pub fn builder() -> SmsSegmentBuilder {
        SmsSegmentBuilder::default()
    }

    /// A segment targeting `groups` with no restrictions.
    pub fn groups<I: Into<Id>>(groups: impl IntoIterator<Item = I>) -> Self {
        Self {
            group_ids: groups.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

impl SmsSegmentBuilder {
    /// Add one target group.
    pub fn group(&mut self, id: impl Into<Id>) -> &mut Self {
        self.group_ids.get_or_insert_with(Vec::new).push(id.into());
        self
    }
}

/// Send time of an SMS campaign, in the given time zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsScheduling {
    /// Local send time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDateTime>,
    /// Time zone id the send time is expressed in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time_zone: Option<String>,
    /// Whether the campaign has already gone out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_sent: Option<bool>,
    /// Unmodeled fields
    #[serde(flatten)]
    pub extra: Extra,
}

impl SmsScheduling {
    /// Send at `when`, local time in `time_zone`.
    pub fn at(when: NaiveDateTime, time_zone: impl Into<String>) -> Self {
        Self {
            scheduled_date: Some(when),
            scheduled_time_zone: Some(time_zone.into()),
            ..Default::default()
        }
    }
}

/// Payload for creating or updating an SMS campaign.
///
/// On create `name`, `content`, `unsubscribe_text` and a segment with at
/// least one group are required, plus either `from_name` or a sending
/// profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default, setter(into, strip_option), build_fn(error = "crate::Error"))]
#[serde(rename_all = "camelCase")]
pub struct SmsCampaignInput {
    /// Internal name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Message text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Opt-out text, required even without an unsubscribe link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsubscribe_text: Option<String>,
    /// Sender name: up to 11 Latin letters, no spaces
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    /// Append an unsubscribe link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_unsubscribe: Option<bool>,
    /// Track links in the message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_link_tracking: Option<bool>,
    /// Sending profile, used instead of `from_name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_sending_profile_id: Option<Id>,
    /// Who receives the campaign
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<SmsSegment>,
    /// When it is sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduling: Option<SmsScheduling>,
    /// Raw fields sent alongside the modeled ones
    #[serde(flatten)]
    #[builder(setter(custom))]
    pub extra: Extra,
}

impl SmsCampaignInput {
    /// Create a builder for constructing an SmsCampaignInput.
    pub fn builder() -> SmsCampaignInputBuilder {
        SmsCampaignInputBuilder::default()
    }

    /// True if a sender name or a sending profile is set, on the campaign
    /// or on its segment.
    pub(crate) fn has_sender(&self) -> bool {
        let named = self
            .from_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty());
        named
            || self.sms_sending_profile_id.is_some()
            || self
                .segment
                .as_ref()
                .is_some_and(|segment| segment.sms_sending_profile_id.is_some())
    }
}

impl SmsCampaignInputBuilder {
    /// Send an extra top-level field the SDK does not model.
    pub fn extra_field(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.extra
            .get_or_insert_with(Extra::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Filters for listing SMS campaigns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SmsCampaignQuery {
    /// Maximum number of campaigns
    pub limit: Option<u32>,
    /// Number of campaigns to skip
    pub offset: Option<u32>,
    /// Campaign status
    pub status: Option<String>,
    /// Campaign type code
    pub campaign_type: Option<u32>,
    /// Created on or after
    pub from_date: Option<DateTime<Utc>>,
    /// Created on or before
    pub to_date: Option<DateTime<Utc>>,
}

impl SmsCampaignQuery {
    /// No filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the number of campaigns to skip.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Only campaigns in `status`.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Only campaigns of this type.
    pub fn campaign_type(mut self, campaign_type: u32) -> Self {
        self.campaign_type = Some(campaign_type);
        self
    }

    /// Only campaigns created in this range.
    pub fn created_between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.from_date = Some(from);
        self.to_date = Some(to);
        self
    }

    pub(crate) fn apply(&self, spec: RequestSpec) -> RequestSpec {
        spec.query_opt("limit", self.limit)
            .query_opt("offset", self.offset)
            .query_opt("status", self.status.as_deref())
            .query_opt("campaignType", self.campaign_type)
            .query_opt("fromDate", self.from_date.map(|d| d.to_rfc3339()))
            .query_opt("toDate", self.to_date.map(|d| d.to_rfc3339()))
    }
}

/// Filters for listing the recipients of an SMS campaign.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientQuery {
    /// Delivery status, e.g. `delivered` or `failed`
    pub status: Option<String>,
    /// Maximum number of records
    pub limit: Option<u32>,
    /// Number of records to skip
    pub offset: Option<u32>,
}

impl RecipientQuery {
    /// No filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only recipients with this delivery status.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the number of records to skip.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub(crate) fn apply(&self, spec: RequestSpec) -> RequestSpec {
        spec.query_opt("status", self.status.as_deref())
            .query_opt("limit", self.limit)
            .query_opt("offset", self.offset)
    }
}

/// Delivery counters of an SMS campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsStatistics {
    /// Campaign id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<Id>,
    /// Messages addressed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipients: Option<u64>,
    /// Messages delivered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered: Option<u64>,
    /// Messages that failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed: Option<u64>,
    /// Unmodeled fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// Performance overview of an SMS campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SmsCampaignReport {
    /// Messages sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent: Option<u64>,
    /// Messages delivered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered: Option<u64>,
    /// Messages with delivery errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<u64>,
    /// Recipients who unsubscribed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsubscribed: Option<u64>,
    /// Error rate, in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_rate: Option<f64>,
    /// Total link clicks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum_clicks: Option<u64>,
    /// Unique clickers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clickers: Option<u64>,
    /// Click rate, in percent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_rate: Option<f64>,
    /// Unmodeled fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// Body of schedule, send and test requests for an SMS campaign.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SmsCampaignAction<'a> {
    pub campaign_id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipients: Option<&'a [String]>,
}

impl SmsCampaignAction<'_> {
    pub(crate) fn new(campaign_id: &str) -> Self {
        Self {
            campaign_id: Id::parse(campaign_id),
            scheduled_time: None,
            recipients: None,
        }
    }
}

/// Message part of an operational SMS.
///
/// `name` and `content` are required, and so is either `from_name` or a
/// sending profile. Unset builder fields fall back to [`Default`], which
/// carries [`DEFAULT_UNSUBSCRIBE_TEXT`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default, setter(into, strip_option), build_fn(error = "crate::Error"))]
pub struct SmsDetails {
    /// Internal name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Message text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Opt-out text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsubscribe_text: Option<String>,
    /// Sender name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    /// Append an unsubscribe link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_unsubscribe: Option<bool>,
    /// Sending profile, used instead of `from_name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_sending_profile_id: Option<Id>,
}

/// Opt-out text used when none is given.
pub const DEFAULT_UNSUBSCRIBE_TEXT: &str = "Reply STOP to unsubscribe";

impl Default for SmsDetails {
    fn default() -> Self {
        Self {
            name: None,
            content: None,
            unsubscribe_text: Some(DEFAULT_UNSUBSCRIBE_TEXT.to_string()),
            from_name: None,
            can_unsubscribe: None,
            sms_sending_profile_id: None,
        }
    }
}

impl SmsDetails {
    /// Create a builder for constructing SmsDetails.
    pub fn builder() -> SmsDetailsBuilder {
        SmsDetailsBuilder::default()
    }
}

/// Delivery time of an operational SMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalScheduling {
    /// Send time, required when `send_now` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date_utc: Option<DateTime<Utc>>,
    /// Send immediately
    pub send_now: bool,
}

impl Default for OperationalScheduling {
    fn default() -> Self {
        Self::now()
    }
}

impl OperationalScheduling {
    /// Send immediately.
    pub fn now() -> Self {
        Self {
            scheduled_date_utc: None,
            send_now: true,
        }
    }

    /// Send at `when`.
    pub fn at(when: DateTime<Utc>) -> Self {
        Self {
            scheduled_date_utc: Some(when),
            send_now: false,
        }
    }
}

/// One operational SMS recipient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsMobile {
    /// Phone number
    pub phone_number: String,
}

impl From<&str> for SmsMobile {
    fn from(phone: &str) -> Self {
        Self {
            phone_number: phone.to_string(),
        }
    }
}

impl From<String> for SmsMobile {
    fn from(phone_number: String) -> Self {
        Self { phone_number }
    }
}

/// An SMS sent to individual numbers rather than to groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationalMessage {
    /// Message details
    pub details: SmsDetails,
    /// Delivery time
    pub scheduling: OperationalScheduling,
    /// Recipients. At least one is required.
    pub mobiles: Vec<SmsMobile>,
}

impl OperationalMessage {
    /// Send `details` to `mobiles` right away.
    pub fn new<M: Into<SmsMobile>>(
        details: SmsDetails,
        mobiles: impl IntoIterator<Item = M>,
    ) -> Self {
        Self {
            details,
            scheduling: OperationalScheduling::now(),
            mobiles: mobiles.into_iter().map(Into::into).collect(),
        }
    }

    /// Deliver at `when` instead of immediately.
    pub fn scheduled_at(mut self, when: DateTime<Utc>) -> Self {
        self.scheduling = OperationalScheduling::at(when);
        self
    }
}

/// An operational SMS as stored by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationalMessageInfo {
    /// Message id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    /// Internal name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Message text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Sender name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    /// Sending profile
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_sending_profile_id: Option<Id>,
    /// Unmodeled fields
    #[serde(flatten)]
    pub extra: Extra,
}
