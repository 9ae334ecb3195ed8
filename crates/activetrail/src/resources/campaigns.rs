//! Campaigns API endpoint

use super::item_path;
use crate::error::Result;
use crate::http::{Executor, RequestSpec};
use crate::types::{
    Campaign, CampaignInput, CloneRequest, ListOptions, Page, ScheduleRequest, Statistics,
};
use crate::validation;
use serde_json::Value;
use std::fmt::Display;

const COLLECTION: &str = "campaigns";

fn campaign_path(id: &str) -> Result<String> {
    item_path(COLLECTION, "campaign_id", id)
}

pub(crate) fn list_request(options: &ListOptions) -> RequestSpec {
    options.apply(RequestSpec::get(COLLECTION))
}

pub(crate) fn get_request(id: &str) -> Result<RequestSpec> {
    Ok(RequestSpec::get(campaign_path(id)?))
}

pub(crate) fn create_request(input: &CampaignInput) -> Result<RequestSpec> {
    validation::require("name", input.name.as_deref())?;
    RequestSpec::post(COLLECTION).json_from(input)
}

pub(crate) fn update_request(id: &str, input: &CampaignInput) -> Result<RequestSpec> {
    RequestSpec::put(campaign_path(id)?).json_from(input)
}

pub(crate) fn delete_request(id: &str) -> Result<RequestSpec> {
    Ok(RequestSpec::delete(campaign_path(id)?))
}

pub(crate) fn schedule_request(id: &str, schedule: &ScheduleRequest) -> Result<RequestSpec> {
    let path = campaign_path(id)?;
    if schedule.send_time.is_none() {
        return Err(validation::invalid("send_time", "send_time is required"));
    }
    RequestSpec::post(format!("{path}/schedule")).json_from(schedule)
}

pub(crate) fn send_now_request(id: &str) -> Result<RequestSpec> {
    Ok(RequestSpec::post(format!("{}/send", campaign_path(id)?)))
}

pub(crate) fn statistics_request(id: &str) -> Result<RequestSpec> {
    Ok(RequestSpec::get(format!("{}/statistics", campaign_path(id)?)))
}

pub(crate) fn clone_request(id: &str, name: Option<&str>) -> Result<RequestSpec> {
    RequestSpec::post(format!("{}/clone", campaign_path(id)?)).json_from(&CloneRequest { name })
}

/// Campaigns API resource.
#[derive(Debug, Clone)]
pub struct Campaigns {
    executor: Executor,
}

impl Campaigns {
    pub(crate) fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// List campaigns.
    #[tracing::instrument(skip_all, fields(limit = options.limit, offset = options.offset))]
    pub async fn list(&self, options: &ListOptions) -> Result<Page<Campaign>> {
        self.executor.execute_as(list_request(options)).await
    }

    /// Get one campaign.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn get(&self, id: impl Display) -> Result<Campaign> {
        self.executor
            .execute_as(get_request(&id.to_string())?)
            .await
    }

    /// Create a campaign. `name` is required.
    #[tracing::instrument(skip_all)]
    pub async fn create(&self, input: &CampaignInput) -> Result<Campaign> {
        self.executor.execute_as(create_request(input)?).await
    }

    /// Update a campaign.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn update(&self, id: impl Display, input: &CampaignInput) -> Result<Campaign> {
        self.executor
            .execute_as(update_request(&id.to_string(), input)?)
            .await
    }

    /// Delete a campaign.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn delete(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(delete_request(&id.to_string())?)
            .await
    }

    /// Schedule a campaign. `send_time` is required.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn schedule(&self, id: impl Display, schedule: &ScheduleRequest) -> Result<Value> {
        self.executor
            .execute(schedule_request(&id.to_string(), schedule)?)
            .await
    }

    /// Send a campaign immediately.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn send_now(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(send_now_request(&id.to_string())?)
            .await
    }

    /// Delivery statistics for a campaign.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn statistics(&self, id: impl Display) -> Result<Statistics> {
        self.executor
            .execute_as(statistics_request(&id.to_string())?)
            .await
    }

    /// Copy a campaign, optionally under a new name.
    ///
    /// Named `clone_campaign` so it does not shadow [`Clone::clone`].
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn clone_campaign(&self, id: impl Display, name: Option<&str>) -> Result<Campaign> {
        self.executor
            .execute_as(clone_request(&id.to_string(), name)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};
    use http::Method;
    use serde_json::json;

    #[test]
    fn test_create_requires_name() {
        let input = CampaignInput {
            subject: Some("Hi".to_string()),
            ..Default::default()
        };
        assert_matches!(create_request(&input), Err(Error::Validation(detail)) => {
            assert_eq!(detail.message, "name is required");
        });
    }

    #[test]
    fn test_schedule_requires_send_time() {
        assert_matches!(
            schedule_request("5", &ScheduleRequest::default()),
            Err(Error::Validation(_))
        );

        let when = Utc.with_ymd_and_hms(2026, 5, 1, 8, 0, 0).unwrap();
        let spec = schedule_request("5", &ScheduleRequest::at(when)).unwrap();
        assert_eq!(spec.method, Method::POST);
        assert_eq!(spec.path, "campaigns/5/schedule");
        assert_eq!(spec.body, Some(json!({"sendTime": "2026-05-01T08:00:00Z"})));
    }

    #[test]
    fn test_action_paths() {
        assert_eq!(send_now_request("5").unwrap().path, "campaigns/5/send");
        assert_eq!(statistics_request("5").unwrap().path, "campaigns/5/statistics");
        assert_eq!(statistics_request("5").unwrap().method, Method::GET);
    }

    #[test]
    fn test_clone_body() {
        let spec = clone_request("5", Some("Copy")).unwrap();
        assert_eq!(spec.path, "campaigns/5/clone");
        assert_eq!(spec.body, Some(json!({"name": "Copy"})));

        let spec = clone_request("5", None).unwrap();
        assert_eq!(spec.body, Some(json!({})));
    }
}
