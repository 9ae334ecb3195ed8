//! Contact groups API endpoint

use super::item_path;
use crate::error::Result;
use crate::http::{Executor, RequestSpec};
use crate::types::{
    Contact, ExternalContact, Group, GroupInput, GroupMemberInput, ListOptions, MemberQuery, Page,
};
use crate::validation;
use serde_json::Value;
use std::fmt::Display;

const COLLECTION: &str = "groups";

fn group_path(id: &str) -> Result<String> {
    item_path(COLLECTION, "group_id", id)
}

pub(crate) fn list_request(options: &ListOptions) -> RequestSpec {
    options.apply(RequestSpec::get(COLLECTION))
}

pub(crate) fn get_request(id: &str) -> Result<RequestSpec> {
    Ok(RequestSpec::get(group_path(id)?))
}

pub(crate) fn create_request(input: &GroupInput) -> Result<RequestSpec> {
    validation::require("name", input.name.as_deref())?;
    RequestSpec::post(COLLECTION).json_from(input)
}

pub(crate) fn update_request(id: &str, input: &GroupInput) -> Result<RequestSpec> {
    RequestSpec::put(group_path(id)?).json_from(input)
}

pub(crate) fn delete_request(id: &str) -> Result<RequestSpec> {
    Ok(RequestSpec::delete(group_path(id)?))
}

pub(crate) fn contacts_request(id: &str, options: &ListOptions) -> Result<RequestSpec> {
    let path = format!("{}/contacts", group_path(id)?);
    Ok(options.apply(RequestSpec::get(path)))
}

pub(crate) fn members_request(id: &str, query: &MemberQuery) -> Result<RequestSpec> {
    let path = format!("{}/members", group_path(id)?);
    Ok(query.apply(RequestSpec::get(path)))
}

pub(crate) fn add_member_request(id: &str, member: &GroupMemberInput) -> Result<RequestSpec> {
    let path = format!("{}/members", group_path(id)?);

    let has = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.trim().is_empty());
    if !has(&member.email) && !has(&member.sms) {
        return Err(validation::invalid(
            "member",
            "a group member needs an email or an sms number",
        ));
    }
    if let Some(email) = member.email.as_deref().filter(|e| !e.trim().is_empty()) {
        validation::require_email("email", email)?;
    }

    RequestSpec::post(path).json_from(member)
}

pub(crate) fn remove_member_request(id: &str, contact_id: &str) -> Result<RequestSpec> {
    let path = group_path(id)?;
    let member = item_path("members", "contact_id", contact_id)?;
    Ok(RequestSpec::delete(format!("{path}/{member}")))
}

/// One add request per member. Every member is checked before any
/// request exists.
pub(crate) fn add_members_requests(
    id: &str,
    members: &[GroupMemberInput],
) -> Result<Vec<RequestSpec>> {
    validation::require_non_empty("member", members)?;
    members
        .iter()
        .map(|member| add_member_request(id, member))
        .collect()
}

pub(crate) fn remove_members_requests(id: &str, contact_ids: &[String]) -> Result<Vec<RequestSpec>> {
    validation::require_non_empty("contact_id", contact_ids)?;
    contact_ids
        .iter()
        .map(|contact_id| remove_member_request(id, contact_id))
        .collect()
}

pub(crate) fn add_external_request(id: &str, contacts: &[ExternalContact]) -> Result<RequestSpec> {
    validation::require_non_empty("contact", contacts)?;
    let path = item_path("external/group", "group_id", id)?;
    RequestSpec::post(path).json_from(contacts)
}

/// Contact groups API resource.
#[derive(Debug, Clone)]
pub struct Groups {
    executor: Executor,
}

impl Groups {
    pub(crate) fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// List groups.
    #[tracing::instrument(skip_all, fields(limit = options.limit, offset = options.offset))]
    pub async fn list(&self, options: &ListOptions) -> Result<Page<Group>> {
        self.executor.execute_as(list_request(options)).await
    }

    /// Get one group.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn get(&self, id: impl Display) -> Result<Group> {
        self.executor
            .execute_as(get_request(&id.to_string())?)
            .await
    }

    /// Create a group. `name` is required.
    #[tracing::instrument(skip_all)]
    pub async fn create(&self, input: &GroupInput) -> Result<Group> {
        self.executor.execute_as(create_request(input)?).await
    }

    /// Update a group.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn update(&self, id: impl Display, input: &GroupInput) -> Result<Group> {
        self.executor
            .execute_as(update_request(&id.to_string(), input)?)
            .await
    }

    /// Delete a group.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn delete(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(delete_request(&id.to_string())?)
            .await
    }

    /// Contacts belonging to a group.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn contacts(&self, id: impl Display, options: &ListOptions) -> Result<Page<Contact>> {
        self.executor
            .execute_as(contacts_request(&id.to_string(), options)?)
            .await
    }

    /// Group members, filtered by state, search term and date range.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn members(&self, id: impl Display, query: &MemberQuery) -> Result<Page<Contact>> {
        self.executor
            .execute_as(members_request(&id.to_string(), query)?)
            .await
    }

    /// Add a contact to a group. The member needs an `email` or an `sms`.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn add_member(&self, id: impl Display, member: &GroupMemberInput) -> Result<Value> {
        self.executor
            .execute(add_member_request(&id.to_string(), member)?)
            .await
    }

    /// Remove a contact from a group.
    #[tracing::instrument(skip_all, fields(id = %id, contact_id = %contact_id))]
    pub async fn remove_member(&self, id: impl Display, contact_id: impl Display) -> Result<Value> {
        self.executor
            .execute(remove_member_request(&id.to_string(), &contact_id.to_string())?)
            .await
    }

    /// Add several contacts to a group, one request each.
    ///
    /// Nothing is sent unless every member is valid. Requests run in order
    /// and stop at the first failure; members added before it stay in the
    /// group.
    #[tracing::instrument(skip_all, fields(id = %id, count = members.len()))]
    pub async fn add_members(
        &self,
        id: impl Display,
        members: &[GroupMemberInput],
    ) -> Result<Vec<Value>> {
        let mut responses = Vec::with_capacity(members.len());
        for spec in add_members_requests(&id.to_string(), members)? {
            responses.push(self.executor.execute(spec).await?);
        }
        Ok(responses)
    }

    /// Remove several contacts from a group, one request each.
    ///
    /// Stops at the first failure, like [`add_members`](Self::add_members).
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn remove_members<C: Display>(
        &self,
        id: impl Display,
        contact_ids: impl IntoIterator<Item = C>,
    ) -> Result<Vec<Value>> {
        let contact_ids: Vec<String> = contact_ids.into_iter().map(|c| c.to_string()).collect();
        let mut responses = Vec::with_capacity(contact_ids.len());
        for spec in remove_members_requests(&id.to_string(), &contact_ids)? {
            responses.push(self.executor.execute(spec).await?);
        }
        Ok(responses)
    }

    /// Link contacts from an external system to a group in one request.
    #[tracing::instrument(skip_all, fields(id = %id, count = contacts.len()))]
    pub async fn add_external_contacts(
        &self,
        id: impl Display,
        contacts: &[ExternalContact],
    ) -> Result<Value> {
        self.executor
            .execute(add_external_request(&id.to_string(), contacts)?)
            .await
    }
}
