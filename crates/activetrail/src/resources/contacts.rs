//! Contacts API endpoint

use super::item_path;
use crate::error::Result;
use crate::http::{Executor, RequestSpec};
use crate::types::{Contact, ContactInput, ListOptions, Page};
use crate::validation;
use serde_json::Value;
use std::fmt::Display;

const COLLECTION: &str = "contacts";

pub(crate) fn list_request(options: &ListOptions) -> RequestSpec {
    options.apply(RequestSpec::get(COLLECTION))
}

pub(crate) fn get_request(id: &str) -> Result<RequestSpec> {
    Ok(RequestSpec::get(item_path(COLLECTION, "contact_id", id)?))
}

pub(crate) fn create_request(input: &ContactInput) -> Result<RequestSpec> {
    let email = validation::require("email", input.email.as_deref())?;
    validation::require_email("email", email)?;
    check_phone(input)?;

    RequestSpec::post(COLLECTION).json_from(input)
}

pub(crate) fn update_request(id: &str, input: &ContactInput) -> Result<RequestSpec> {
    let path = item_path(COLLECTION, "contact_id", id)?;
    if let Some(email) = input.email.as_deref() {
        validation::require_email("email", email)?;
    }
    check_phone(input)?;

    RequestSpec::put(path).json_from(input)
}

pub(crate) fn delete_request(id: &str) -> Result<RequestSpec> {
    Ok(RequestSpec::delete(item_path(COLLECTION, "contact_id", id)?))
}

fn check_phone(input: &ContactInput) -> Result<()> {
    match input.phone.as_deref() {
        Some(phone) if !phone.is_empty() => validation::require_israeli_phone("phone", phone),
        _ => Ok(()),
    }
}

/// Contacts API resource.
///
/// ```rust,no_run
/// use activetrail::{Client, types::ContactInput};
///
/// # async fn example() -> activetrail::Result<()> {
/// let client = Client::new("api-key")?;
/// client
///     .scope(|client| async move {
///         let contact = client
///             .contacts()
///             .create(&ContactInput::with_email("dana@example.co.il"))
///             .await?;
///         println!("created {:?}", contact.id);
///         Ok(())
///     })
///     .await
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Contacts {
    executor: Executor,
}

impl Contacts {
    pub(crate) fn new(executor: Executor) -> Self {
        Self { executor }
    }

    /// List contacts.
    #[tracing::instrument(skip_all, fields(limit = options.limit, offset = options.offset))]
    pub async fn list(&self, options: &ListOptions) -> Result<Page<Contact>> {
        self.executor.execute_as(list_request(options)).await
    }

    /// Get one contact.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn get(&self, id: impl Display) -> Result<Contact> {
        self.executor
            .execute_as(get_request(&id.to_string())?)
            .await
    }

    /// Create a contact. `email` is required and must be well formed; a
    /// `phone`, if given, must be an Israeli mobile number.
    #[tracing::instrument(skip_all)]
    pub async fn create(&self, input: &ContactInput) -> Result<Contact> {
        self.executor.execute_as(create_request(input)?).await
    }

    /// Update a contact. Only the fields present in `input` are sent.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn update(&self, id: impl Display, input: &ContactInput) -> Result<Contact> {
        self.executor
            .execute_as(update_request(&id.to_string(), input)?)
            .await
    }

    /// Delete a contact.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn delete(&self, id: impl Display) -> Result<Value> {
        self.executor
            .execute(delete_request(&id.to_string())?)
            .await
    }
}
