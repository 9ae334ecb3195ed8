//! API resource endpoints
//!
//! Each resource module owns the request builders for its operations
//! (local validation plus [`RequestSpec`](crate::http::RequestSpec)
//! construction) and an async façade over the shared executor. The blocking
//! client reuses the same builders.

pub mod campaigns;
pub mod contacts;
pub mod groups;
pub mod messages;
pub mod sms_campaigns;
pub mod webhooks;

pub use campaigns::Campaigns;
pub use contacts::Contacts;
pub use groups::Groups;
pub use messages::Messages;
pub use sms_campaigns::SmsCampaigns;
pub use webhooks::Webhooks;

use crate::error::Result;
use crate::http::path_segment;
use crate::validation;

/// `collection/{id}` with the id validated and encoded as one segment.
pub(crate) fn item_path(collection: &str, field: &str, id: &str) -> Result<String> {
    validation::require_id(field, id)?;
    if id == "." || id == ".." {
        return Err(validation::invalid(field, format!("{field} cannot be '{id}'")));
    }
    Ok(format!("{collection}/{}", path_segment(id)))
}
