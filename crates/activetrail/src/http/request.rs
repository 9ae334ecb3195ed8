//! Relative API requests built by the resource modules
//!
//! A [`RequestSpec`] is the transport-neutral description of one API call:
//! verb, path relative to the base URL, query pairs, optional JSON body and
//! extra headers. Resource modules build them; executors resolve and send
//! them.

use crate::error::{Error, Result};
use http::Method;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Description of a single API request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// HTTP method
    pub method: Method,
    /// Path relative to the base URL, e.g. `contacts/42`
    pub path: String,
    /// Query pairs, in order. Keys may repeat.
    pub query: Vec<(String, String)>,
    /// JSON body
    pub body: Option<Value>,
    /// Extra headers; these override the client's defaults
    pub headers: BTreeMap<String, String>,
}

impl RequestSpec {
    /// Create a request for `method` and `path`.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: BTreeMap::new(),
        }
    }

    /// `GET path`
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST path`
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PUT path`
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// `DELETE path`
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Append a query pair.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append a query pair when `value` is present.
    pub fn query_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Append several query pairs.
    pub fn query_pairs<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.to_string())));
        self
    }

    /// Set a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `payload` as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns a local [`Error::Validation`] if the payload cannot be
    /// represented as JSON.
    pub fn json_from<T: Serialize + ?Sized>(self, payload: &T) -> Result<Self> {
        let body = serde_json::to_value(payload)
            .map_err(|e| Error::validation(format!("request body is not valid JSON: {e}")))?;
        Ok(self.json(body))
    }

    /// Set an extra header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// Encode `id` as a single path segment.
///
/// Reserved characters, including `/`, are percent-encoded so an id can
/// never escape its segment. Callers reject dot segments.
pub fn path_segment(id: &str) -> String {
    url::form_urlencoded::byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_builder_collects_parts() {
        let spec = RequestSpec::get("contacts")
            .query("limit", 10)
            .query_opt("offset", None::<u32>)
            .query_opt("search", Some("dana"))
            .header("x-trace", "abc");

        assert_eq!(spec.method, Method::GET);
        assert_eq!(spec.path, "contacts");
        assert_eq!(
            spec.query,
            vec![
                ("limit".to_string(), "10".to_string()),
                ("search".to_string(), "dana".to_string()),
            ]
        );
        assert_eq!(spec.headers.get("x-trace").map(String::as_str), Some("abc"));
        assert!(spec.body.is_none());
    }

    #[test]
    fn test_repeated_query_keys_are_kept() {
        let spec = RequestSpec::get("groups")
            .query_pairs([("tag", "a"), ("tag", "b")]);

        assert_eq!(spec.query.len(), 2);
        assert_eq!(spec.query[1], ("tag".to_string(), "b".to_string()));
    }

    #[test]
    fn test_json_from_serializes_payload() {
        #[derive(Serialize)]
        struct Payload {
            email: &'static str,
        }

        let spec = RequestSpec::post("contacts")
            .json_from(&Payload { email: "a@b.co" })
            .unwrap();

        assert_eq!(spec.body, Some(json!({"email": "a@b.co"})));
    }

    #[test]
    fn test_path_segment_encodes_reserved_characters() {
        assert_eq!(path_segment("42"), "42");
        assert_eq!(path_segment("a/b"), "a%2Fb");
        assert_eq!(path_segment("a b"), "a%20b");
        assert_eq!(path_segment("x?y#z"), "x%3Fy%23z");
    }
}
