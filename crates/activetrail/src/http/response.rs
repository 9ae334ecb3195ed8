//! Response mapping
//!
//! Turns a raw [`HttpResponse`] into either decoded JSON or a classified
//! [`Error`].

use crate::error::{ApiError, Error, Result};
use activetrail_transport::HttpResponse;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Map a raw response to its JSON body or a classified error.
///
/// - 2xx with an empty body yields `Value::Null`.
/// - 2xx with a non-JSON body yields the text as `Value::String`.
/// - anything else is classified by status.
pub fn map_response(response: &HttpResponse) -> Result<Value> {
    if !response.is_success() {
        return Err(Error::from_response(
            response.status,
            &response.text(),
            &response.headers,
        ));
    }

    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    match serde_json::from_slice(&response.body) {
        Ok(json) => Ok(json),
        Err(_) => Ok(Value::String(response.text())),
    }
}

/// A successful response after mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Success {
    /// HTTP status (2xx)
    pub status: u16,
    /// Mapped body, see [`map_response`]
    pub value: Value,
    /// Body text as received
    pub body: String,
}

impl Success {
    /// Map `response`, keeping its status and body text for later decoding.
    pub fn from_response(response: &HttpResponse) -> Result<Self> {
        let value = map_response(response)?;
        Ok(Self {
            status: response.status,
            value,
            body: response.text(),
        })
    }

    /// Deserialize the body into `T`.
    ///
    /// An empty body decodes as `null` if `T` accepts it, otherwise as an
    /// empty object, so resource types come back with every field unset.
    /// A shape mismatch is reported as [`Error::Unknown`] carrying the status
    /// and the body text as received.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T> {
        let decoded = match &self.value {
            Value::Null => T::deserialize(&Value::Null)
                .or_else(|_| T::deserialize(&Value::Object(Map::new()))),
            value => T::deserialize(value),
        };

        decoded.map_err(|e| {
            Error::Unknown(
                ApiError::new(self.status, format!("failed to decode response: {e}"))
                    .with_raw_body(self.body),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use assert_matches::assert_matches;
    use http::HeaderMap;
    use proptest::prelude::*;
    use serde_json::json;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse::new(status, HeaderMap::new(), body.as_bytes().to_vec())
    }

    #[test]
    fn test_success_decodes_json() {
        let value = map_response(&response(200, r#"{"id":1,"email":"a@b.co"}"#)).unwrap();
        assert_eq!(value, json!({"id": 1, "email": "a@b.co"}));
    }

    #[test]
    fn test_success_empty_body_is_null() {
        assert_eq!(map_response(&response(204, "")).unwrap(), Value::Null);
        assert_eq!(map_response(&response(200, "  \n")).unwrap(), Value::Null);
    }

    #[test]
    fn test_success_plain_text_is_string() {
        assert_eq!(
            map_response(&response(200, "OK")).unwrap(),
            Value::String("OK".to_string())
        );
    }

    #[test]
    fn test_error_is_classified() {
        let err = map_response(&response(404, r#"{"message":"gone"}"#)).unwrap_err();
        assert_matches!(err, Error::NotFound(detail) => {
            assert_eq!(detail.status, 404);
            assert_eq!(detail.message, "gone");
        });
    }

    #[derive(Debug, serde::Deserialize)]
    #[allow(dead_code)]
    struct Strict {
        id: u64,
    }

    #[derive(Debug, Default, PartialEq, serde::Deserialize)]
    struct Loose {
        id: Option<u64>,
    }

    #[test]
    fn test_decode_failure_is_unknown_with_body() {
        let success = Success::from_response(&response(200, r#"{"id": "not-a-number"}"#)).unwrap();
        let err = success.decode::<Strict>().unwrap_err();
        assert_matches!(err, Error::Unknown(detail) => {
            assert_eq!(detail.status, 200);
            assert_eq!(detail.raw_body.as_deref(), Some(r#"{"id": "not-a-number"}"#));
        });
    }

    #[rstest::rstest]
    #[case::created(201)]
    #[case::no_content(204)]
    #[case::ok(200)]
    fn test_empty_success_decodes_to_default(#[case] status: u16) {
        let success = Success::from_response(&response(status, "")).unwrap();
        assert_eq!(success.clone().decode::<Loose>().unwrap(), Loose::default());
        assert_eq!(success.decode::<Value>().unwrap(), Value::Null);
    }

    #[test]
    fn test_empty_success_keeps_raw_text_on_mismatch() {
        let success = Success::from_response(&response(201, "  ")).unwrap();
        let err = success.decode::<Strict>().unwrap_err();
        assert_matches!(err, Error::Unknown(detail) => {
            assert_eq!(detail.status, 201);
            assert_eq!(detail.raw_body.as_deref(), Some("  "));
        });
    }

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-zA-Z0-9 @._-]{0,16}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,8}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_success_returns_body_unchanged(status in 200u16..300, value in json_value()) {
            prop_assume!(!value.is_null());
            let body = serde_json::to_vec(&value).unwrap();
            let raw = HttpResponse::new(status, HeaderMap::new(), body);
            prop_assert_eq!(map_response(&raw).unwrap(), value);
        }

        #[test]
        fn prop_every_error_status_is_classified(status in 300u16..1000, body in ".{0,64}") {
            let err = map_response(&response(status, &body)).unwrap_err();
            let kind = err.kind();
            prop_assert_eq!(kind, Some(ErrorKind::from_status(status)));
            prop_assert_eq!(err.status(), Some(status));
        }
    }
}
