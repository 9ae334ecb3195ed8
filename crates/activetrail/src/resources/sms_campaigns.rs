//! SMS campaigns API endpoint
//!
//! Covers group-targeted SMS campaigns, their reports and operational
//! messages sent to individual mobile numbers.

use super::item_path;
use crate::error::Result;
use crate::http::{Executor, RequestSpec};
use crate::types::{
    OperationalMessage, OperationalMessageInfo, Page, RecipientQuery, SmsCampaign,
    SmsCampaignAction, SmsCampaignInput, SmsCampaignQuery, SmsCampaignReport, SmsStatistics,
};
use crate::validation;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt::Display;

const COLLECTION: &str = "smscampaign";
const CAMPAIGN: &str = "smscampaign/Campaign";
const OPERATIONAL: &str = "smscampaign/OperationalMessage";
const REPORT: &str = "smscampaignreport";

fn campaign_path(id: &str) -> Result<String> {
    item_path(COLLECTION, "campaign_id", id)
}

pub(crate) fn list_request(query: &SmsCampaignQuery) -> RequestSpec {
    query.apply(RequestSpec::get(COLLECTION))
}

pub(crate) fn get_request(id: &str) -> Result<RequestSpec> {
    Ok(RequestSpec::get(item_path(CAMPAIGN, "campaign_id", id)?))
}

fn check_campaign(input: &SmsCampaignInput) -> Result<()> {
    validation::require("name", input.name.as_deref())?;
    validation::require("content", input.content.as_deref())?;
    validation::require("unsubscribe_text", input.unsubscribe_text.as_deref())?;

    let groups = input
        .segment
        .as_ref()
        .map(|segment| segment.group_ids.as_slice())
        .unwrap_or_default();
    validation::require_non_empty("segment group", groups)?;

    if !input.has_sender() {
        return Err(validation::invalid(
            "from_name",
            "either from_name or sms_sending_profile_id is required",
        ));
    }
    Ok(())
}

pub(crate) fn create_request(input: &SmsCampaignInput) -> Result<RequestSpec> {
    check_campaign(input)?;
    RequestSpec::post(CAMPAIGN).json_from(input)
}

pub(crate) fn update_request(id: &str, input: &SmsCampaignInput) -> Result<RequestSpec> {
    RequestSpec::put(campaign_path(id)?).json_from(input)
}

pub(crate) fn delete_request(id: &str) -> Result<RequestSpec> {
    Ok(RequestSpec::delete(campaign_path(id)?))
}

pub(crate) fn schedule_request(id: &str, at: DateTime<Utc>) -> Result<RequestSpec> {
    let path = campaign_path(id)?;
    let action = SmsCampaignAction {
        scheduled_time: Some(at),
        ..SmsCampaignAction::new(id)
    };
    RequestSpec::post(format!("{path}/schedule")).json_from(&action)
}

pub(crate) fn send_now_request(id: &str) -> Result<RequestSpec> {
    let path = campaign_path(id)?;
    RequestSpec::post(format!("{path}/send")).json_from(&SmsCampaignAction::new(id))
}

pub(crate) fn test_request(id: &str, recipients: &[String]) -> Result<RequestSpec> {
    let path = campaign_path(id)?;
    validation::require_non_empty("recipient", recipients)?;
    for phone in recipients {
        validation::require("recipient", Some(phone.as_str()))?;
    }
    let action = SmsCampaignAction {
        recipients: Some(recipients),
        ..SmsCampaignAction::new(id)
    };
    RequestSpec::post(format!("{path}/test")).json_from(&action)
}

pub(crate) fn statistics_request(id: &str) -> Result<RequestSpec> {
    Ok(RequestSpec::get(format!("{}/statistics", campaign_path(id)?)))
}

pub(crate) fn recipients_request(id: &str, query: &RecipientQuery) -> Result<RequestSpec> {
    let path = format!("{}/recipients", campaign_path(id)?);
    Ok(query.apply(RequestSpec::get(path).query("campaignId", id)))
}

pub(crate) fn delivery_status_request(id: &str, contact_id: Option<&str>) -> Result<RequestSpec> {
    let path = format!("{}/delivery-status", item_path(CAMPAIGN, "campaign_id", id)?);
    Ok(RequestSpec::get(path).query_opt("contact_id", contact_id))
}

pub(crate) fn report_request(id: &str) -> Result<RequestSpec> {
    Ok(RequestSpec::get(item_path(REPORT, "campaign_id", id)?))
}

pub(crate) fn delivered_request(id: &str) -> Result<RequestSpec> {
    let path = format!("{}/Delivered", item_path(REPORT, "campaign_id", id)?);
    Ok(RequestSpec::get(path).query("id", id))
}

fn check_operational(message: &OperationalMessage) -> Result<()> {
    let details = &message.details;
    validation::require("name", details.name.as_deref())?;
    validation::require("content", details.content.as_deref())?;

    let named = details
        .from_name
        .as_deref()
        .is_some_and(|name| !name.trim().is_empty());
    if !named && details.sms_sending_profile_id.is_none() {
        return Err(validation::invalid(
            "from_name",
            "either from_name or sms_sending_profile_id is required",
        ));
    }

    if !message.scheduling.send_now && message.scheduling.scheduled_date_utc.is_none() {
        return Err(validation::invalid(
            "scheduled_date_utc",
            "scheduled_date_utc is required unless send_now is set",
        ));
    }

    validation::require_non_empty("mobile", &message.mobiles)?;
    for mobile in &message.mobiles {
        validation::require("phone_number", Some(mobile.phone_number.as_str()))?;
    }
    Ok(())
}

pub(crate) fn send_operational_request(message: &OperationalMessage) -> Result<RequestSpec> {
    check_operational(message)?;
    RequestSpec::post(OPERATIONAL).json_from(message)
}

pub(crate) fn get_operational_request(id: &str) -> Result<RequestSpec> {
    Ok(RequestSpec::get(item_path(OPERATIONAL, "message_id", id)?))
}

pub(crate) fn update_operational_request(
    id: &str,
    message: &OperationalMessage,
) -> Result<RequestSpec> {
    let path = item_path(OPERATIONAL, "message_id", id)?;
    check_operational(message)?;
    RequestSpec::put(path).json_from(message)
}

/// SMS campaigns API resource.
#[derive(Debug, Clone)]
pub struct SmsCampaigns {
    executor: Executor,
}

impl SmsCampaigns {
    pub(crate) fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// List SMS campaigns.
    #[tracing::instrument(skip_all, fields(limit = query.limit, offset = query.offset))]
    pub async fn list(&self, query: &SmsCampaignQuery) -> Result<Page<SmsCampaign>> {
        self.executor.execute_as(list_request(query)).await
    }

    /// Get one SMS campaign.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn get(&self, id: impl Display) -> Result<SmsCampaign> {
        self.executor
            .execute_as(get_request(&id.to_string())?)
            .await
    }

    /// Create an SMS campaign.
    #[tracing::instrument(skip_all)]
    pub async fn create(&self, input: &SmsCampaignInput) -> Result<SmsCampaign> {
        self.executor.execute_as(create_request(input)?).await
    }

    /// Update an SMS campaign.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn update(&self, id: impl Display, input: &SmsCampaignInput) -> Result<SmsCampaign> {
        self.executor
            .execute_as(update_request(&id.to_string(), input)?)
            .await
    }

    /// Delete an SMS campaign.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn delete(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(delete_request(&id.to_string())?)
            .await
    }

    /// Schedule an SMS campaign for `at`.
    #[tracing::instrument(skip_all, fields(id = %id, at = %at))]
    pub async fn schedule(&self, id: impl Display, at: DateTime<Utc>) -> Result<Value> {
        self.executor
            .execute(schedule_request(&id.to_string(), at)?)
            .await
    }

    /// Send an SMS campaign immediately.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn send_now(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(send_now_request(&id.to_string())?)
            .await
    }

    /// Send a test of the campaign to `recipients`.
    #[tracing::instrument(skip_all, fields(id = %id, recipients = recipients.len()))]
    pub async fn test(&self, id: impl Display, recipients: &[String]) -> Result<Value> {
        self.executor
            .execute(test_request(&id.to_string(), recipients)?)
            .await
    }

    /// Delivery counters for a campaign.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn statistics(&self, id: impl Display) -> Result<SmsStatistics> {
        self.executor
            .execute_as(statistics_request(&id.to_string())?)
            .await
    }

    /// Recipients of a campaign with their delivery status.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn recipients(&self, id: impl Display, query: &RecipientQuery) -> Result<Page<Value>> {
        self.executor
            .execute_as(recipients_request(&id.to_string(), query)?)
            .await
    }

    /// Delivery status of a campaign.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn delivery_status(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(delivery_status_request(&id.to_string(), None)?)
            .await
    }

    /// Delivery status of a campaign for one contact.
    #[tracing::instrument(skip_all, fields(id = %id, contact_id = %contact_id))]
    pub async fn contact_delivery_status(
        &self,
        id: impl Display,
        contact_id: impl Display,
    ) -> Result<Value> {
        let contact_id = contact_id.to_string();
        self.executor
            .execute(delivery_status_request(&id.to_string(), Some(&contact_id))?)
            .await
    }

    /// Performance overview of a campaign.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn report(&self, id: impl Display) -> Result<SmsCampaignReport> {
        self.executor
            .execute_as(report_request(&id.to_string())?)
            .await
    }

    /// Contacts the campaign was delivered to.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn delivered_contacts(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(delivered_request(&id.to_string())?)
            .await
    }

    /// Send an SMS to individual mobile numbers.
    #[tracing::instrument(skip_all, fields(mobiles = message.mobiles.len()))]
    pub async fn send_operational(
        &self,
        message: &OperationalMessage,
    ) -> Result<OperationalMessageInfo> {
        self.executor
            .execute_as(send_operational_request(message)?)
            .await
    }

    /// Get one operational message.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn get_operational(&self, id: impl Display) -> Result<OperationalMessageInfo> {
        self.executor
            .execute_as(get_operational_request(&id.to_string())?)
            .await
    }

    /// Update an operational message that has not been sent yet.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn update_operational(
        &self,
        id: impl Display,
        message: &OperationalMessage,
    ) -> Result<OperationalMessageInfo> {
        self.executor
            .execute_as(update_operational_request(&id.to_string(), message)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::{OperationalScheduling, SmsDetails, SmsSegment};
    use assert_matches::assert_matches;
    use chrono::TimeZone;
    use http::Method;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn valid_input() -> SmsCampaignInput {
        SmsCampaignInput {
            name: Some("Sale".to_string()),
            content: Some("20% off".to_string()),
            unsubscribe_text: Some("STOP".to_string()),
            from_name: Some("Shop".to_string()),
            segment: Some(SmsSegment::groups([7u64])),
            ..Default::default()
        }
    }

    fn valid_message() -> OperationalMessage {
        let details = SmsDetails::builder()
            .name("Code")
            .content("Your code is 1234")
            .from_name("Shop")
            .build()
            .unwrap();
        OperationalMessage::new(details, ["0521234567"])
    }

    #[test]
    fn test_create_request() {
        let spec = create_request(&valid_input()).unwrap();
        assert_eq!(spec.method, Method::POST);
        assert_eq!(spec.path, "smscampaign/Campaign");
    }

    #[test]
    fn test_create_validation() {
        let missing_content = SmsCampaignInput {
            content: None,
            ..valid_input()
        };
        assert_matches!(create_request(&missing_content), Err(Error::Validation(detail)) => {
            assert_eq!(detail.message, "content is required");
        });

        let no_groups = SmsCampaignInput {
            segment: Some(SmsSegment::default()),
            ..valid_input()
        };
        assert_matches!(create_request(&no_groups), Err(Error::Validation(_)));

        let no_sender = SmsCampaignInput {
            from_name: None,
            ..valid_input()
        };
        assert_matches!(create_request(&no_sender), Err(Error::Validation(detail)) => {
            assert!(detail.message.contains("sms_sending_profile_id"));
        });
    }

    #[test]
    fn test_campaign_paths() {
        assert_eq!(get_request("5").unwrap().path, "smscampaign/Campaign/5");
        assert_eq!(update_request("5", &valid_input()).unwrap().path, "smscampaign/5");
        assert_eq!(delete_request("5").unwrap().method, Method::DELETE);
        assert_eq!(statistics_request("5").unwrap().path, "smscampaign/5/statistics");
        assert_eq!(report_request("5").unwrap().path, "smscampaignreport/5");

        let spec = delivered_request("5").unwrap();
        assert_eq!(spec.path, "smscampaignreport/5/Delivered");
        assert_eq!(spec.query, vec![("id".to_string(), "5".to_string())]);

        let spec = delivery_status_request("5", Some("9")).unwrap();
        assert_eq!(spec.path, "smscampaign/Campaign/5/delivery-status");
        assert_eq!(spec.query, vec![("contact_id".to_string(), "9".to_string())]);
        assert!(delivery_status_request("5", None).unwrap().query.is_empty());
    }

    #[test]
    fn test_action_bodies() {
        let at = Utc.with_ymd_and_hms(2026, 7, 1, 6, 0, 0).unwrap();
        let spec = schedule_request("5", at).unwrap();
        assert_eq!(spec.path, "smscampaign/5/schedule");
        assert_eq!(
            spec.body,
            Some(json!({"campaignId": 5, "scheduledTime": "2026-07-01T06:00:00Z"}))
        );

        let spec = send_now_request("5").unwrap();
        assert_eq!(spec.path, "smscampaign/5/send");
        assert_eq!(spec.body, Some(json!({"campaignId": 5})));

        let recipients = vec!["0521234567".to_string()];
        let spec = test_request("5", &recipients).unwrap();
        assert_eq!(spec.path, "smscampaign/5/test");
        assert_eq!(
            spec.body,
            Some(json!({"campaignId": 5, "recipients": ["0521234567"]}))
        );
        assert_matches!(test_request("5", &[]), Err(Error::Validation(_)));
    }

    #[test]
    fn test_recipients_query() {
        let spec = recipients_request("5", &RecipientQuery::new().status("failed").limit(10)).unwrap();
        assert_eq!(spec.path, "smscampaign/5/recipients");
        assert_eq!(
            spec.query,
            vec![
                ("campaignId".to_string(), "5".to_string()),
                ("status".to_string(), "failed".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
    }

    #[test]
    fn test_operational_validation() {
        let spec = send_operational_request(&valid_message()).unwrap();
        assert_eq!(spec.path, "smscampaign/OperationalMessage");

        let no_mobiles = OperationalMessage {
            mobiles: Vec::new(),
            ..valid_message()
        };
        assert_matches!(send_operational_request(&no_mobiles), Err(Error::Validation(_)));

        let unscheduled = OperationalMessage {
            scheduling: OperationalScheduling {
                scheduled_date_utc: None,
                send_now: false,
            },
            ..valid_message()
        };
        assert_matches!(send_operational_request(&unscheduled), Err(Error::Validation(_)));

        let spec = update_operational_request("12", &valid_message()).unwrap();
        assert_eq!(spec.method, Method::PUT);
        assert_eq!(spec.path, "smscampaign/OperationalMessage/12");
        assert_eq!(
            get_operational_request("12").unwrap().path,
            "smscampaign/OperationalMessage/12"
        );
    }
}
