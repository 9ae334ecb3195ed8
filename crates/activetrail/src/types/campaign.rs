//! Campaign types

use super::common::{Extra, Id};
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An email campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    /// Campaign id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    /// Internal name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email subject line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Draft, scheduled, sent, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Sender display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    /// Sender address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,
    /// Scheduled send time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_time: Option<String>,
    /// Unmodeled fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// Payload for creating or updating a campaign.
///
/// `name` is required on create.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default, setter(into, strip_option), build_fn(error = "crate::Error"))]
#[serde(rename_all = "camelCase")]
pub struct CampaignInput {
    /// Internal name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email subject line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Sender display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
    /// Sender address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,
    /// Reply-to address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    /// HTML body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Target groups
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_ids: Option<Vec<Id>>,
    /// Raw fields sent alongside the modeled ones
    #[serde(flatten)]
    #[builder(setter(custom))]
    pub extra: Extra,
}

impl CampaignInput {
    /// Create a builder for constructing a CampaignInput.
    pub fn builder() -> CampaignInputBuilder {
        CampaignInputBuilder::default()
    }
}

impl CampaignInputBuilder {
    /// Send an extra top-level field the SDK does not model.
    pub fn extra_field(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.extra
            .get_or_insert_with(Extra::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Payload for scheduling a campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default, setter(into, strip_option), build_fn(error = "crate::Error"))]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    /// When to send, in UTC. Required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_time: Option<DateTime<Utc>>,
    /// IANA time zone the send time is displayed in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// Raw fields sent alongside the modeled ones
    #[serde(flatten)]
    #[builder(setter(custom))]
    pub extra: Extra,
}

impl ScheduleRequest {
    /// Schedule for `send_time`.
    pub fn at(send_time: DateTime<Utc>) -> Self {
        Self {
            send_time: Some(send_time),
            ..Default::default()
        }
    }

    /// Create a builder for constructing a ScheduleRequest.
    pub fn builder() -> ScheduleRequestBuilder {
        ScheduleRequestBuilder::default()
    }
}

impl ScheduleRequestBuilder {
    /// Send an extra top-level field the SDK does not model.
    pub fn extra_field(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.extra
            .get_or_insert_with(Extra::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Body of a clone request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CloneRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_schedule_request_serializes_rfc3339() {
        let when = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();
        let request = ScheduleRequest::at(when);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"sendTime": "2026-03-01T09:30:00Z"})
        );
    }

    #[test]
    fn test_campaign_input_builder() {
        let input = CampaignInput::builder()
            .name("Spring sale")
            .subject("20% off")
            .group_ids(vec![Id::Number(3)])
            .extra_field("templateId", 12)
            .build()
            .unwrap();

        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "name": "Spring sale",
                "subject": "20% off",
                "groupIds": [3],
                "templateId": 12
            })
        );
    }

    #[test]
    fn test_campaign_decodes_with_extra() {
        let campaign: Campaign = serde_json::from_value(json!({
            "id": "c-9",
            "name": "Launch",
            "status": "draft",
            "opens": 0
        }))
        .unwrap();

        assert_eq!(campaign.id, Some(Id::Text("c-9".to_string())));
        assert_eq!(campaign.status.as_deref(), Some("draft"));
        assert_eq!(campaign.extra.get("opens"), Some(&json!(0)));
    }
}
