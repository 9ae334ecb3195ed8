//! Types shared across resources

use crate::http::RequestSpec;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Fields the SDK does not model, kept so nothing is lost on a round trip.
pub type Extra = Map<String, Value>;

/// Resource identifier. The API uses both numeric and string ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// Numeric id
    Number(u64),
    /// String id
    Text(String),
}

impl Id {
    /// Read an id from its text form: numeric when it parses as one.
    pub fn parse(raw: &str) -> Self {
        raw.parse().map(Id::Number).unwrap_or_else(|_| Id::Text(raw.to_string()))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(n) => write!(f, "{n}"),
            Id::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Id {
    fn from(n: u64) -> Self {
        Id::Number(n)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::Text(s.to_string())
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::Text(s)
    }
}

/// Paging and filtering for list operations.
///
/// ```rust
/// use activetrail::ListOptions;
///
/// let options = ListOptions::new().limit(50).offset(100).filter("status", "active");
/// assert_eq!(options.limit, Some(50));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Maximum number of items to return
    pub limit: Option<u32>,
    /// Number of items to skip
    pub offset: Option<u32>,
    /// Additional query filters, sent as-is
    pub filters: Vec<(String, String)>,
}

impl ListOptions {
    /// Empty options: server defaults apply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the number of items to skip.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Add a query filter. Keys may repeat.
    pub fn filter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((key.into(), value.to_string()));
        self
    }

    pub(crate) fn apply(&self, spec: RequestSpec) -> RequestSpec {
        spec.query_opt("limit", self.limit)
            .query_opt("offset", self.offset)
            .query_pairs(self.filters.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

/// One page of a list response.
///
/// Accepts a bare JSON array or an object carrying the items under `items`
/// or `data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,

    /// Total number of items, when the server reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,

    /// Unmodeled fields of the wrapping object
    #[serde(flatten)]
    pub extra: Extra,
}

impl<T> Page<T> {
    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the items.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageRepr<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(default = "Vec::new", alias = "data", alias = "Items", alias = "Data")]
        items: Vec<T>,
        #[serde(default, alias = "totalCount", alias = "TotalCount", alias = "count")]
        total: Option<u64>,
        #[serde(flatten)]
        extra: Extra,
    },
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Page<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match PageRepr::deserialize(deserializer)? {
            PageRepr::Bare(items) => Page {
                items,
                total: None,
                extra: Extra::new(),
            },
            PageRepr::Wrapped {
                items,
                total,
                extra,
            } => Page {
                items,
                total,
                extra,
            },
        })
    }
}

/// Delivery statistics for a campaign or message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Messages sent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sent: Option<u64>,
    /// Messages delivered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered: Option<u64>,
    /// Unique opens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opened: Option<u64>,
    /// Unique clicks
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicked: Option<u64>,
    /// Bounces
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounced: Option<u64>,
    /// Unsubscribes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unsubscribed: Option<u64>,
    /// Unmodeled fields
    #[serde(flatten)]
    pub extra: Extra,
}
