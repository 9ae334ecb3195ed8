//! Local request validation
//!
//! Checks run before a request is built. A failure is an
//! [`Error::Validation`] with status 0 and nothing is sent.
//!
//! # Examples
//!
//! ```rust
//! use activetrail::validation::{is_valid_email, is_valid_israeli_phone};
//!
//! assert!(is_valid_email("dana@example.co.il"));
//! assert!(!is_valid_email("dana@"));
//!
//! assert!(is_valid_israeli_phone("0521234567"));
//! assert!(is_valid_israeli_phone("+972521234567"));
//! assert!(!is_valid_israeli_phone("031234567"));
//! ```

use crate::error::{Error, Result};
use crate::observability::log_validation_error;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern is valid")
});

// Mobile numbers only: 05X-XXXXXXX, local or +972
static ISRAELI_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+972|0)(5[0-9]{8})$").expect("phone pattern is valid"));

/// Check an email address against the accepted format.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Check an Israeli mobile number (`05XXXXXXXX` or `+9725XXXXXXXX`).
pub fn is_valid_israeli_phone(phone: &str) -> bool {
    ISRAELI_PHONE.is_match(phone)
}

/// Fail with a validation error naming `field`.
pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Error {
    let reason = reason.into();
    log_validation_error(field, &reason);
    Error::validation(reason)
}

/// Require a non-blank string.
pub fn require<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(invalid(field, format!("{field} is required"))),
    }
}

/// Require a non-blank path id.
pub fn require_id(field: &str, id: &str) -> Result<()> {
    require(field, Some(id)).map(|_| ())
}

/// Require a valid email address.
pub fn require_email(field: &str, email: &str) -> Result<()> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(invalid(field, format!("invalid email format: {email}")))
    }
}

/// Require a valid Israeli mobile number.
pub fn require_israeli_phone(field: &str, phone: &str) -> Result<()> {
    if is_valid_israeli_phone(phone) {
        Ok(())
    } else {
        Err(invalid(
            field,
            format!("invalid Israeli phone number format: {phone}"),
        ))
    }
}

/// Require an absolute http(s) URL.
pub fn require_http_url(field: &str, raw: &str) -> Result<()> {
    match url::Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host_str().is_some() => Ok(()),
        _ => Err(invalid(
            field,
            format!("{field} must be an absolute http(s) URL: {raw}"),
        )),
    }
}

/// Require a non-empty collection.
pub fn require_non_empty<T>(field: &str, items: &[T]) -> Result<()> {
    if items.is_empty() {
        Err(invalid(field, format!("at least one {field} is required")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rstest::rstest;

    #[rstest]
    #[case("user@example.com", true)]
    #[case("first.last+tag@sub.example.co.il", true)]
    #[case("u_100%@x.io", true)]
    #[case("user@example", false)]
    #[case("user@example.c", false)]
    #[case("@example.com", false)]
    #[case("user example@x.com", false)]
    #[case("", false)]
    fn test_email_format(#[case] email: &str, #[case] valid: bool) {
        assert_eq!(is_valid_email(email), valid);
    }

    #[rstest]
    #[case("0501234567", true)]
    #[case("0591234567", true)]
    #[case("+972541234567", true)]
    #[case("972541234567", false)]
    #[case("050123456", false)]
    #[case("05012345678", false)]
    #[case("0312345678", false)]
    #[case("+9720541234567", false)]
    #[case("050-1234567", false)]
    fn test_israeli_phone_format(#[case] phone: &str, #[case] valid: bool) {
        assert_eq!(is_valid_israeli_phone(phone), valid);
    }

    #[test]
    fn test_require() {
        assert_eq!(require("name", Some("June")).unwrap(), "June");

        let err = require("name", Some("  ")).unwrap_err();
        assert_matches!(&err, Error::Validation(detail) => {
            assert_eq!(detail.status, 0);
            assert_eq!(detail.message, "name is required");
        });
        assert_matches!(require("name", None), Err(Error::Validation(_)));
    }

    #[test]
    fn test_require_id() {
        assert!(require_id("contact_id", "17").is_ok());
        assert_matches!(require_id("contact_id", ""), Err(Error::Validation(_)));
    }

    #[rstest]
    #[case("https://hooks.example.com/at", true)]
    #[case("http://localhost:8080/hook", true)]
    #[case("ftp://example.com/hook", false)]
    #[case("/relative/hook", false)]
    fn test_http_url(#[case] raw: &str, #[case] valid: bool) {
        assert_eq!(require_http_url("url", raw).is_ok(), valid);
    }

    #[test]
    fn test_require_non_empty() {
        assert!(require_non_empty("event", &["contact.created"]).is_ok());
        assert_matches!(
            require_non_empty::<&str>("event", &[]),
            Err(Error::Validation(detail)) => assert_eq!(detail.message, "at least one event is required")
        );
    }
}
