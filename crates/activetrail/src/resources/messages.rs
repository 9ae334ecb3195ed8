//! Transactional messages API endpoint

use super::item_path;
use crate::error::Result;
use crate::http::{Executor, RequestSpec};
use crate::types::{EmailMessage, MessageReceipt, MessageStatus, SmsMessage, Statistics};
use crate::validation;
use std::fmt::Display;

const COLLECTION: &str = "messages";

pub(crate) fn send_email_request(message: &EmailMessage) -> Result<RequestSpec> {
    validation::require("subject", message.subject.as_deref())?;
    validation::require("content", message.content.as_deref())?;
    validation::require_non_empty("recipient", &message.recipients)?;
    for recipient in &message.recipients {
        validation::require_email("recipients", recipient)?;
    }

    RequestSpec::post(format!("{COLLECTION}/email")).json_from(message)
}

pub(crate) fn send_sms_request(message: &SmsMessage) -> Result<RequestSpec> {
    validation::require("content", message.content.as_deref())?;
    validation::require_non_empty("recipient", &message.recipients)?;

    RequestSpec::post(format!("{COLLECTION}/sms")).json_from(message)
}

pub(crate) fn status_request(id: &str) -> Result<RequestSpec> {
    Ok(RequestSpec::get(format!(
        "{}/status",
        item_path(COLLECTION, "message_id", id)?
    )))
}

pub(crate) fn statistics_request(id: &str) -> Result<RequestSpec> {
    Ok(RequestSpec::get(format!(
        "{}/statistics",
        item_path(COLLECTION, "message_id", id)?
    )))
}

/// Transactional messages API resource.
#[derive(Debug, Clone)]
pub struct Messages {
    executor: Executor,
}

impl Messages {
    pub(crate) fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// Send a transactional email.
    ///
    /// `subject`, `content` and at least one well-formed recipient are
    /// required.
    #[tracing::instrument(skip_all, fields(recipients = message.recipients.len()))]
    pub async fn send_email(&self, message: &EmailMessage) -> Result<MessageReceipt> {
        self.executor.execute_as(send_email_request(message)?).await
    }

    /// Send a transactional SMS. `content` and at least one recipient are
    /// required.
    #[tracing::instrument(skip_all, fields(recipients = message.recipients.len()))]
    pub async fn send_sms(&self, message: &SmsMessage) -> Result<MessageReceipt> {
        self.executor.execute_as(send_sms_request(message)?).await
    }

    /// Delivery status of a sent message.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn status(&self, id: impl Display) -> Result<MessageStatus> {
        self.executor
            .execute_as(status_request(&id.to_string())?)
            .await
    }

    /// Engagement statistics of a sent message.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn statistics(&self, id: impl Display) -> Result<Statistics> {
        self.executor
            .execute_as(statistics_request(&id.to_string())?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use assert_matches::assert_matches;
    use rstest::rstest;

    fn email() -> EmailMessage {
        EmailMessage {
            subject: Some("Receipt".to_string()),
            content: Some("<p>Thanks</p>".to_string()),
            recipients: vec!["a@b.co".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_send_email_request_shape() {
        let spec = send_email_request(&email()).unwrap();
        assert_eq!(spec.method, http::Method::POST);
        assert_eq!(spec.path, "messages/email");
        assert_eq!(spec.body.unwrap()["recipients"][0], "a@b.co");
    }

    #[rstest]
    #[case::no_subject(EmailMessage { subject: None, ..email() })]
    #[case::blank_content(EmailMessage { content: Some(" ".to_string()), ..email() })]
    #[case::no_recipients(EmailMessage { recipients: vec![], ..email() })]
    #[case::bad_recipient(EmailMessage { recipients: vec!["a@b.co".to_string(), "nope".to_string()], ..email() })]
    fn test_send_email_validation(#[case] message: EmailMessage) {
        assert_matches!(send_email_request(&message), Err(Error::Validation(detail)) => {
            assert_eq!(detail.status, 0);
        });
    }

    #[test]
    fn test_send_sms_validation() {
        let sms = SmsMessage {
            content: Some("hi".to_string()),
            ..Default::default()
        };
        assert_matches!(send_sms_request(&sms), Err(Error::Validation(_)));

        let sms = SmsMessage {
            recipients: vec!["0521234567".to_string()],
            ..sms
        };
        assert_eq!(send_sms_request(&sms).unwrap().path, "messages/sms");
    }

    #[test]
    fn test_lookup_paths() {
        assert_eq!(status_request("m-1").unwrap().path, "messages/m-1/status");
        assert_eq!(statistics_request("m-1").unwrap().path, "messages/m-1/statistics");
        assert!(status_request("").is_err());
    }
}
