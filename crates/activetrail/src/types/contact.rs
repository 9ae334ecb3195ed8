//! Contact types

use super::common::{Extra, Id};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A contact as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Contact id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
    /// Email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// First name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Mobile phone, used for SMS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_phone: Option<String>,
    /// Street address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// City
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State or district
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal code
    #[serde(rename = "zip", skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    /// Country
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Company
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Birthday, as sent by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    /// Subscription status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Account-defined custom fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Extra>,
    /// Unmodeled fields
    #[serde(flatten)]
    pub extra: Extra,
}

/// Payload for creating or updating a contact.
///
/// `email` is required on create; every other field is optional.
///
/// ```rust
/// use activetrail::types::ContactInput;
///
/// let contact = ContactInput::builder()
///     .email("dana@example.co.il")
///     .first_name("Dana")
///     .phone("0521234567")
///     .build()?;
/// assert_eq!(contact.email.as_deref(), Some("dana@example.co.il"));
/// # Ok::<(), activetrail::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
#[builder(default, setter(into, strip_option), build_fn(error = "crate::Error"))]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    /// Email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// First name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Phone number, Israeli mobile format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Mobile phone, used for SMS
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_phone: Option<String>,
    /// Street address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// City
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State or district
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal code
    #[serde(rename = "zip", skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    /// Country
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Company
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Birthday
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<String>,
    /// Account-defined custom fields
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(setter(custom))]
    pub custom_fields: Option<Extra>,
    /// Raw fields sent alongside the modeled ones
    #[serde(flatten)]
    #[builder(setter(custom))]
    pub extra: Extra,
}

impl ContactInput {
    /// Create a builder for constructing a ContactInput.
    pub fn builder() -> ContactInputBuilder {
        ContactInputBuilder::default()
    }

    /// Shorthand for an input carrying only an email address.
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Default::default()
        }
    }
}

impl ContactInputBuilder {
    /// Set one custom field.
    pub fn custom_field(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.custom_fields
            .get_or_insert_with(|| Some(Extra::new()))
            .get_or_insert_with(Extra::new)
            .insert(key.into(), value.into());
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

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_contact_input_serializes_api_names() {
        let input = ContactInput::builder()
            .email("dana@example.co.il")
            .first_name("Dana")
            .last_name("Levi")
            .mobile_phone("0521234567")
            .zip_code("6100000")
            .custom_field("tier", "gold")
            .extra_field("source", "import")
            .build()
            .unwrap();

        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "email": "dana@example.co.il",
                "firstName": "Dana",
                "lastName": "Levi",
                "mobilePhone": "0521234567",
                "zip": "6100000",
                "customFields": {"tier": "gold"},
                "source": "import"
            })
        );
    }

    #[test]
    fn test_contact_round_trip_keeps_unknown_fields() {
        let raw = json!({
            "id": 7,
            "email": "a@b.co",
            "firstName": "A",
            "status": "active",
            "subscribeDate": "2024-01-02",
            "tags": ["vip"]
        });

        let contact: Contact = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(contact.id, Some(Id::Number(7)));
        assert_eq!(contact.first_name.as_deref(), Some("A"));
        assert_eq!(contact.extra.len(), 2);
        assert_eq!(serde_json::to_value(&contact).unwrap(), raw);
    }

    #[test]
    fn test_empty_builder_builds() {
        let input = ContactInput::builder().build().unwrap();
        assert_eq!(input, ContactInput::default());
    }
}
