//! Contact group types

use super::common::{Extra, Id};
use crate::http::RequestSpec;
use chrono::NaiveDate;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A contact group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Group id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    /// Group name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of contacts in the group
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_count: Option<u64>,
    /// Creation timestamp, as sent by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp, as sent by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Unmodeled fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// Payload for creating or updating a group. `name` is required on create.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default, setter(into, strip_option), build_fn(error = "crate::Error"))]
#[serde(rename_all = "camelCase")]
pub struct GroupInput {
    /// Group name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Raw fields sent alongside the modeled ones
    #[serde(flatten)]
    #[builder(setter(custom))]
    pub extra: Extra,
}

impl GroupInput {
    /// Create a builder for constructing a GroupInput.
    pub fn builder() -> GroupInputBuilder {
        GroupInputBuilder::default()
    }

    /// Shorthand for an input carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

impl GroupInputBuilder {
    /// Send an extra top-level field the SDK does not model.
    pub fn extra_field(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.extra
            .get_or_insert_with(Extra::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Payload for adding a member to a group.
///
/// Either `email` or `sms` identifies the contact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default, setter(into, strip_option), build_fn(error = "crate::Error"))]
#[serde(rename_all = "camelCase")]
pub struct GroupMemberInput {
    /// Email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Mobile number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms: Option<String>,
    /// First name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Email subscription status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// SMS subscription status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_status: Option<String>,
    /// Campaign to send to the new member
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<Id>,
    /// IP address the subscription came from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribe_ip: Option<String>,
    /// Double opt-in settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub double_optin: Option<Extra>,
    /// Delete the contact instead of adding it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
    /// Raw fields sent alongside the modeled ones
    #[serde(flatten)]
    #[builder(setter(custom))]
    pub extra: Extra,
}

impl GroupMemberInput {
    /// Create a builder for constructing a GroupMemberInput.
    pub fn builder() -> GroupMemberInputBuilder {
        GroupMemberInputBuilder::default()
    }
}

impl GroupMemberInputBuilder {
    /// Send an extra top-level field the SDK does not model.
    pub fn extra_field(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.extra
            .get_or_insert_with(Extra::new)
            .insert(key.into(), value.into());
        self
    }
}

/// A contact from an external system, linked to a group by its own id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalContact {
    /// Id in the external system
    pub external_id: Id,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_name: Option<String>,
}

impl ExternalContact {
    /// Link `id` under `name`.
    pub fn new(id: impl Into<Id>, name: impl Into<String>) -> Self {
        Self {
            external_id: id.into(),
            external_name: Some(name.into()),
        }
    }
}

/// Filters for listing group members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberQuery {
    /// Contact states to include, e.g. `Active`, `Unsubscribed`
    pub customer_states: Vec<String>,
    /// Search by mobile number
    pub search_term: Option<String>,
    /// Joined on or after
    pub from_date: Option<NaiveDate>,
    /// Joined on or before
    pub to_date: Option<NaiveDate>,
    /// Page number
    pub page: Option<u32>,
    /// Page size (1-100)
    pub limit: Option<u32>,
}

impl MemberQuery {
    /// No filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Include contacts in `state`.
    pub fn customer_state(mut self, state: impl Into<String>) -> Self {
        self.customer_states.push(state.into());
        self
    }

    /// Search by mobile number.
    pub fn search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    /// Restrict to a date range.
    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from_date = Some(from);
        self.to_date = Some(to);
        self
    }

    /// Select a page.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub(crate) fn apply(&self, spec: RequestSpec) -> RequestSpec {
        spec.query_pairs(
            self.customer_states
                .iter()
                .map(|state| ("CustomerStates", state)),
        )
        .query_opt("SearchTerm", self.search_term.as_deref())
        .query_opt("FromDate", self.from_date.map(|d| d.format("%Y-%m-%d")))
        .query_opt("ToDate", self.to_date.map(|d| d.format("%Y-%m-%d")))
        .query_opt("Page", self.page)
        .query_opt("Limit", self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_member_query_encoding() {
        let from = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let spec = MemberQuery::new()
            .customer_state("Active")
            .customer_state("Bounced")
            .between(from, to)
            .limit(50)
            .apply(RequestSpec::get("groups/1/members"));

        let pairs: Vec<(&str, &str)> = spec
            .query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("CustomerStates", "Active"),
                ("CustomerStates", "Bounced"),
                ("FromDate", "2025-01-01"),
                ("ToDate", "2025-01-31"),
                ("Limit", "50"),
            ]
        );
    }

    #[test]
    fn test_member_input_serializes_api_names() {
        let member = GroupMemberInput::builder()
            .sms("0521234567")
            .first_name("Noa")
            .sms_status("active")
            .is_deleted(false)
            .build()
            .unwrap();

        assert_eq!(
            serde_json::to_value(&member).unwrap(),
            json!({
                "sms": "0521234567",
                "firstName": "Noa",
                "smsStatus": "active",
                "isDeleted": false
            })
        );
    }

    #[test]
    fn test_external_contact_keys() {
        assert_eq!(
            serde_json::to_value(ExternalContact::new(31u64, "Dana")).unwrap(),
            json!({"externalId": 31, "externalName": "Dana"})
        );
    }

    #[test]
    fn test_group_decodes_contact_count() {
        let group: Group =
            serde_json::from_value(json!({"id": 5, "name": "VIP", "contactCount": 12})).unwrap();
        assert_eq!(group.contact_count, Some(12));
    }
}
