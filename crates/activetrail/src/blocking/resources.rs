//! Blocking resource façades
//!
//! Same operations, validation and request shapes as the async resources;
//! each call blocks the current thread until the response is mapped.

use super::executor::BlockingExecutor;
use crate::error::Result;
use crate::resources::{campaigns, contacts, groups, messages, sms_campaigns, webhooks};
use crate::types::{
    Campaign, CampaignInput, Contact, ContactInput, EmailMessage, ExternalContact, Group,
    GroupInput, GroupMemberInput, ListOptions, MemberQuery, MessageReceipt, MessageStatus,
    OperationalMessage, OperationalMessageInfo, Page, RecipientQuery, ScheduleRequest,
    SmsCampaign, SmsCampaignInput, SmsCampaignQuery, SmsCampaignReport, SmsMessage,
    SmsStatistics, Statistics, Webhook, WebhookInput,
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt::Display;

/// Contacts API resource.
#[derive(Debug, Clone)]
pub struct Contacts {
    executor: BlockingExecutor,
}

impl Contacts {
    pub(crate) fn new(executor: BlockingExecutor) -> Self {
        Self { executor }
    }

    /// List contacts.
    pub fn list(&self, options: &ListOptions) -> Result<Page<Contact>> {
        self.executor.execute_as(contacts::list_request(options))
    }

    /// Get one contact.
    pub fn get(&self, id: impl Display) -> Result<Contact> {
        self.executor
            .execute_as(contacts::get_request(&id.to_string())?)
    }

    /// Create a contact.
    pub fn create(&self, input: &ContactInput) -> Result<Contact> {
        self.executor.execute_as(contacts::create_request(input)?)
    }

    /// Update a contact.
    pub fn update(&self, id: impl Display, input: &ContactInput) -> Result<Contact> {
        self.executor
            .execute_as(contacts::update_request(&id.to_string(), input)?)
    }

    /// Delete a contact.
    pub fn delete(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(contacts::delete_request(&id.to_string())?)
    }
}

/// Campaigns API resource.
#[derive(Debug, Clone)]
pub struct Campaigns {
    executor: BlockingExecutor,
}

impl Campaigns {
    pub(crate) fn new(executor: BlockingExecutor) -> Self {
        Self { executor }
    }

    /// List campaigns.
    pub fn list(&self, options: &ListOptions) -> Result<Page<Campaign>> {
        self.executor.execute_as(campaigns::list_request(options))
    }

    /// Get one campaign.
    pub fn get(&self, id: impl Display) -> Result<Campaign> {
        self.executor
            .execute_as(campaigns::get_request(&id.to_string())?)
    }

    /// Create a campaign.
    pub fn create(&self, input: &CampaignInput) -> Result<Campaign> {
        self.executor.execute_as(campaigns::create_request(input)?)
    }

    /// Update a campaign.
    pub fn update(&self, id: impl Display, input: &CampaignInput) -> Result<Campaign> {
        self.executor
            .execute_as(campaigns::update_request(&id.to_string(), input)?)
    }

    /// Delete a campaign.
    pub fn delete(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(campaigns::delete_request(&id.to_string())?)
    }

    /// Schedule a campaign.
    pub fn schedule(&self, id: impl Display, schedule: &ScheduleRequest) -> Result<Value> {
        self.executor
            .execute(campaigns::schedule_request(&id.to_string(), schedule)?)
    }

    /// Send a campaign immediately.
    pub fn send_now(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(campaigns::send_now_request(&id.to_string())?)
    }

    /// Delivery statistics for a campaign.
    pub fn statistics(&self, id: impl Display) -> Result<Statistics> {
        self.executor
            .execute_as(campaigns::statistics_request(&id.to_string())?)
    }

    /// Copy a campaign, optionally under a new name.
    pub fn clone_campaign(&self, id: impl Display, name: Option<&str>) -> Result<Campaign> {
        self.executor
            .execute_as(campaigns::clone_request(&id.to_string(), name)?)
    }
}

/// Transactional messages API resource.
#[derive(Debug, Clone)]
pub struct Messages {
    executor: BlockingExecutor,
}

impl Messages {
    pub(crate) fn new(executor: BlockingExecutor) -> Self {
        Self { executor }
    }

    /// Send a transactional email.
    pub fn send_email(&self, message: &EmailMessage) -> Result<MessageReceipt> {
        self.executor
            .execute_as(messages::send_email_request(message)?)
    }

    /// Send a transactional SMS.
    pub fn send_sms(&self, message: &SmsMessage) -> Result<MessageReceipt> {
        self.executor.execute_as(messages::send_sms_request(message)?)
    }

    /// Delivery status of a sent message.
    pub fn status(&self, id: impl Display) -> Result<MessageStatus> {
        self.executor
            .execute_as(messages::status_request(&id.to_string())?)
    }

    /// Engagement statistics of a sent message.
    pub fn statistics(&self, id: impl Display) -> Result<Statistics> {
        self.executor
            .execute_as(messages::statistics_request(&id.to_string())?)
    }
}

/// Webhooks API resource.
#[derive(Debug, Clone)]
pub struct Webhooks {
    executor: BlockingExecutor,
}

impl Webhooks {
    pub(crate) fn new(executor: BlockingExecutor) -> Self {
        Self { executor }
    }

    /// List all registered webhooks.
    pub fn list(&self) -> Result<Page<Webhook>> {
        self.executor.execute_as(webhooks::list_request())
    }

    /// Get one webhook.
    pub fn get(&self, id: impl Display) -> Result<Webhook> {
        self.executor
            .execute_as(webhooks::get_request(&id.to_string())?)
    }

    /// Register a webhook.
    pub fn create(&self, input: &WebhookInput) -> Result<Webhook> {
        self.executor.execute_as(webhooks::create_request(input)?)
    }

    /// Update a webhook.
    pub fn update(&self, id: impl Display, input: &WebhookInput) -> Result<Webhook> {
        self.executor
            .execute_as(webhooks::update_request(&id.to_string(), input)?)
    }

    /// Delete a webhook.
    pub fn delete(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(webhooks::delete_request(&id.to_string())?)
    }

    /// Ask the server to deliver a test event.
    pub fn test(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(webhooks::test_request(&id.to_string())?)
    }
}

/// Contact groups API resource.
#[derive(Debug, Clone)]
pub struct Groups {
    executor: BlockingExecutor,
}

impl Groups {
    pub(crate) fn new(executor: BlockingExecutor) -> Self {
        Self { executor }
    }

    /// List groups.
    pub fn list(&self, options: &ListOptions) -> Result<Page<Group>> {
        self.executor.execute_as(groups::list_request(options))
    }

    /// Get one group.
    pub fn get(&self, id: impl Display) -> Result<Group> {
        self.executor
            .execute_as(groups::get_request(&id.to_string())?)
    }

    /// Create a group.
    pub fn create(&self, input: &GroupInput) -> Result<Group> {
        self.executor.execute_as(groups::create_request(input)?)
    }

    /// Update a group.
    pub fn update(&self, id: impl Display, input: &GroupInput) -> Result<Group> {
        self.executor
            .execute_as(groups::update_request(&id.to_string(), input)?)
    }

    /// Delete a group.
    pub fn delete(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(groups::delete_request(&id.to_string())?)
    }

    /// Contacts belonging to a group.
    pub fn contacts(&self, id: impl Display, options: &ListOptions) -> Result<Page<Contact>> {
        self.executor
            .execute_as(groups::contacts_request(&id.to_string(), options)?)
    }

    /// Group members matching `query`.
    pub fn members(&self, id: impl Display, query: &MemberQuery) -> Result<Page<Contact>> {
        self.executor
            .execute_as(groups::members_request(&id.to_string(), query)?)
    }

    /// Add a contact to a group.
    pub fn add_member(&self, id: impl Display, member: &GroupMemberInput) -> Result<Value> {
        self.executor
            .execute(groups::add_member_request(&id.to_string(), member)?)
    }

    /// Remove a contact from a group.
    pub fn remove_member(&self, id: impl Display, contact_id: impl Display) -> Result<Value> {
        self.executor.execute(groups::remove_member_request(
            &id.to_string(),
            &contact_id.to_string(),
        )?)
    }
    /// Add several contacts to a group, one request each, stopping at the
    /// first failure. Nothing is sent unless every member is valid.
    pub fn add_members(&self, id: impl Display, members: &[GroupMemberInput]) -> Result<Vec<Value>> {
        groups::add_members_requests(&id.to_string(), members)?
            .into_iter()
            .map(|spec| self.executor.execute(spec))
            .collect()
    }

    /// Remove several contacts from a group, stopping at the first failure.
    pub fn remove_members<C: Display>(
        &self,
        id: impl Display,
        contact_ids: impl IntoIterator<Item = C>,
    ) -> Result<Vec<Value>> {
        let contact_ids: Vec<String> = contact_ids.into_iter().map(|c| c.to_string()).collect();
        groups::remove_members_requests(&id.to_string(), &contact_ids)?
            .into_iter()
            .map(|spec| self.executor.execute(spec))
            .collect()
    }

    /// Link contacts from an external system to a group.
    pub fn add_external_contacts(
        &self,
        id: impl Display,
        contacts: &[ExternalContact],
    ) -> Result<Value> {
        self.executor
            .execute(groups::add_external_request(&id.to_string(), contacts)?)
    }
}

/// SMS campaigns API resource.
#[derive(Debug, Clone)]
pub struct SmsCampaigns {
    executor: BlockingExecutor,
}

impl SmsCampaigns {
    pub(crate) fn new(executor: BlockingExecutor) -> Self {
        Self { executor }
    }

    /// List SMS campaigns.
    pub fn list(&self, query: &SmsCampaignQuery) -> Result<Page<SmsCampaign>> {
        self.executor.execute_as(sms_campaigns::list_request(query))
    }

    /// Get one SMS campaign.
    pub fn get(&self, id: impl Display) -> Result<SmsCampaign> {
        self.executor
            .execute_as(sms_campaigns::get_request(&id.to_string())?)
    }

    /// Create an SMS campaign.
    pub fn create(&self, input: &SmsCampaignInput) -> Result<SmsCampaign> {
        self.executor
            .execute_as(sms_campaigns::create_request(input)?)
    }

    /// Update an SMS campaign.
    pub fn update(&self, id: impl Display, input: &SmsCampaignInput) -> Result<SmsCampaign> {
        self.executor
            .execute_as(sms_campaigns::update_request(&id.to_string(), input)?)
    }

    /// Delete an SMS campaign.
    pub fn delete(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(sms_campaigns::delete_request(&id.to_string())?)
    }

    /// Schedule an SMS campaign for `at`.
    pub fn schedule(&self, id: impl Display, at: DateTime<Utc>) -> Result<Value> {
        self.executor
            .execute(sms_campaigns::schedule_request(&id.to_string(), at)?)
    }

    /// Send an SMS campaign immediately.
    pub fn send_now(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(sms_campaigns::send_now_request(&id.to_string())?)
    }

    /// Send a test of the campaign to `recipients`.
    pub fn test(&self, id: impl Display, recipients: &[String]) -> Result<Value> {
        self.executor
            .execute(sms_campaigns::test_request(&id.to_string(), recipients)?)
    }

    /// Delivery counters for a campaign.
    pub fn statistics(&self, id: impl Display) -> Result<SmsStatistics> {
        self.executor
            .execute_as(sms_campaigns::statistics_request(&id.to_string())?)
    }

    /// Recipients of a campaign with their delivery status.
    pub fn recipients(&self, id: impl Display, query: &RecipientQuery) -> Result<Page<Value>> {
        self.executor
            .execute_as(sms_campaigns::recipients_request(&id.to_string(), query)?)
    }

    /// Delivery status of a campaign.
    pub fn delivery_status(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(sms_campaigns::delivery_status_request(&id.to_string(), None)?)
    }

    /// Delivery status of a campaign for one contact.
    pub fn contact_delivery_status(
        &self,
        id: impl Display,
        contact_id: impl Display,
    ) -> Result<Value> {
        let contact_id = contact_id.to_string();
        self.executor.execute(sms_campaigns::delivery_status_request(
            &id.to_string(),
            Some(&contact_id),
        )?)
    }

    /// Performance overview of a campaign.
    pub fn report(&self, id: impl Display) -> Result<SmsCampaignReport> {
        self.executor
            .execute_as(sms_campaigns::report_request(&id.to_string())?)
    }

    /// Contacts the campaign was delivered to.
    pub fn delivered_contacts(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(sms_campaigns::delivered_request(&id.to_string())?)
    }

    /// Send an SMS to individual mobile numbers.
    pub fn send_operational(&self, message: &OperationalMessage) -> Result<OperationalMessageInfo> {
        self.executor
            .execute_as(sms_campaigns::send_operational_request(message)?)
    }

    /// Get one operational message.
    pub fn get_operational(&self, id: impl Display) -> Result<OperationalMessageInfo> {
        self.executor
            .execute_as(sms_campaigns::get_operational_request(&id.to_string())?)
    }

    /// Update an operational message that has not been sent yet.
    pub fn update_operational(
        &self,
        id: impl Display,
        message: &OperationalMessage,
    ) -> Result<OperationalMessageInfo> {
        self.executor.execute_as(sms_campaigns::update_operational_request(
            &id.to_string(),
            message,
        )?)
    }
}
