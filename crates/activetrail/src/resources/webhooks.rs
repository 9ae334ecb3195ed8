//! Webhooks API endpoint

use super::item_path;
use crate::error::Result;
use crate::http::{Executor, RequestSpec};
use crate::types::{Page, Webhook, WebhookInput};
use crate::validation;
use serde_json::Value;
use std::fmt::Display;

const COLLECTION: &str = "webhooks";

fn webhook_path(id: &str) -> Result<String> {
    item_path(COLLECTION, "webhook_id", id)
}

pub(crate) fn list_request() -> RequestSpec {
    RequestSpec::get(COLLECTION)
}

pub(crate) fn get_request(id: &str) -> Result<RequestSpec> {
    Ok(RequestSpec::get(webhook_path(id)?))
}

pub(crate) fn create_request(input: &WebhookInput) -> Result<RequestSpec> {
    let url = validation::require("url", input.url.as_deref())?;
    validation::require_http_url("url", url)?;
    validation::require_non_empty("event", input.events.as_deref().unwrap_or_default())?;

    RequestSpec::post(COLLECTION).json_from(input)
}

pub(crate) fn update_request(id: &str, input: &WebhookInput) -> Result<RequestSpec> {
    let path = webhook_path(id)?;
    if input.is_empty() {
        return Err(validation::invalid(
            "webhook",
            "at least one field is required to update a webhook",
        ));
    }
    if let Some(url) = input.url.as_deref() {
        validation::require_http_url("url", url)?;
    }

    RequestSpec::put(path).json_from(input)
}

pub(crate) fn delete_request(id: &str) -> Result<RequestSpec> {
    Ok(RequestSpec::delete(webhook_path(id)?))
}

pub(crate) fn test_request(id: &str) -> Result<RequestSpec> {
    Ok(RequestSpec::post(format!("{}/test", webhook_path(id)?)))
}

/// Webhooks API resource.
#[derive(Debug, Clone)]
pub struct Webhooks {
    executor: Executor,
}

impl Webhooks {
    pub(crate) fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// List all registered webhooks.
    #[tracing::instrument(skip_all)]
    pub async fn list(&self) -> Result<Page<Webhook>> {
        self.executor.execute_as(list_request()).await
    }

    /// Get one webhook.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn get(&self, id: impl Display) -> Result<Webhook> {
        self.executor
            .execute_as(get_request(&id.to_string())?)
            .await
    }

    /// Register a webhook. Requires an http(s) `url` and at least one event.
    #[tracing::instrument(skip_all)]
    pub async fn create(&self, input: &WebhookInput) -> Result<Webhook> {
        self.executor.execute_as(create_request(input)?).await
    }

    /// Update a webhook. At least one field must be set.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn update(&self, id: impl Display, input: &WebhookInput) -> Result<Webhook> {
        self.executor
            .execute_as(update_request(&id.to_string(), input)?)
            .await
    }

    /// Delete a webhook.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn delete(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(delete_request(&id.to_string())?)
            .await
    }

    /// Ask the server to deliver a test event.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn test(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(test_request(&id.to_string())?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn input(url: &str, events: &[&str]) -> WebhookInput {
        WebhookInput {
            url: Some(url.to_string()),
            events: Some(events.iter().map(|e| e.to_string()).collect()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_validation() {
        assert_matches!(
            create_request(&input("ftp://x.com/h", &["contact.created"])),
            Err(Error::Validation(_))
        );
        assert_matches!(
            create_request(&input("https://x.com/h", &[])),
            Err(Error::Validation(_))
        );
        assert_matches!(
            create_request(&WebhookInput::default()),
            Err(Error::Validation(_))
        );

        let spec = create_request(&input("https://x.com/h", &["contact.created"])).unwrap();
        assert_eq!(
            spec.body,
            Some(json!({"url": "https://x.com/h", "events": ["contact.created"]}))
        );
    }

    #[test]
    fn test_update_requires_a_field() {
        assert_matches!(
            update_request("3", &WebhookInput::default()),
            Err(Error::Validation(detail)) => assert!(detail.message.contains("at least one field"))
        );

        let change = WebhookInput {
            description: Some("orders".to_string()),
            ..Default::default()
        };
        let spec = update_request("3", &change).unwrap();
        assert_eq!(spec.method, http::Method::PUT);
        assert_eq!(spec.path, "webhooks/3");
    }

    #[test]
    fn test_test_request_path() {
        let spec = test_request("3").unwrap();
        assert_eq!(spec.method, http::Method::POST);
        assert_eq!(spec.path, "webhooks/3/test");
        assert!(spec.body.is_none());
    }
}
