//! Request DTOs
//!
//! Bodies use camelCase names. Required create fields are `Option`s checked
//! with `#[validate(required)]` so every missing field is reported at once.
//! Patch fields that may be cleared are `Option<Option<T>>`: absent leaves
//! the column alone, `null` clears it.

pub mod directory;
pub mod guarantee;
pub mod credit;
pub mod query;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FieldError;

/// A calendar date sent either as `YYYY-MM-DD` or as an RFC 3339 timestamp
///
/// Serializes back as `YYYY-MM-DD`, which is what validation errors echo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FlexDate(pub NaiveDate);

impl TryFrom<String> for FlexDate {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let value = value.trim();
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
            .map(FlexDate)
            .map_err(|_| format!("invalid date {value:?}, expected YYYY-MM-DD"))
    }
}

impl From<FlexDate> for String {
    fn from(value: FlexDate) -> Self {
        value.0.format("%Y-%m-%d").to_string()
    }
}

impl From<FlexDate> for NaiveDate {
    fn from(value: FlexDate) -> Self {
        value.0
    }
}

/// Distinguishes an explicit `null` from an absent field
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Takes a field that `#[validate(required)]` has already checked
pub(crate) fn required<T>(value: Option<T>, field: &str) -> Result<T, FieldError> {
    value.ok_or_else(|| FieldError::required(field))
}

/// Trims a patched text field, rejecting a blank replacement
pub(crate) fn non_blank(value: Option<String>, field: &str) -> Result<Option<String>, FieldError> {
    match value {
        Some(text) if text.trim().is_empty() => {
            Err(FieldError::new(field, format!("{field} must not be empty")))
        }
        Some(text) => Ok(Some(text.trim().to_string())),
        None => Ok(None),
    }
}

pub(crate) fn date(value: Option<FlexDate>) -> Option<NaiveDate> {
    value.map(NaiveDate::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        notes: Option<Option<String>>,
        #[serde(default)]
        when: Option<FlexDate>,
    }

    #[test]
    fn test_flex_date_accepts_both_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(FlexDate::try_from("2024-03-01".to_string()).unwrap().0, expected);
        assert_eq!(
            FlexDate::try_from("2024-03-01T00:00:00.000Z".to_string()).unwrap().0,
            expected
        );
        assert!(FlexDate::try_from("01/03/2024".to_string()).is_err());
    }

    #[test]
    fn test_flex_date_serializes_as_calendar_date() {
        let date: FlexDate = serde_json::from_str(r#""2024-03-01T10:30:00+03:00""#).unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), r#""2024-03-01""#);
    }

    #[test]
    fn test_double_option_distinguishes_null() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.notes, None);
        assert!(absent.when.is_none());

        let cleared: Patch = serde_json::from_str(r#"{"notes": null}"#).unwrap();
        assert_eq!(cleared.notes, Some(None));

        let set: Patch = serde_json::from_str(r#"{"notes": "x", "when": "2024-01-02"}"#).unwrap();
        assert_eq!(set.notes, Some(Some("x".to_string())));
        assert_eq!(set.when.map(|d| d.0), NaiveDate::from_ymd_opt(2024, 1, 2));
    }

    #[test]
    fn test_non_blank() {
        assert!(non_blank(Some("  ".to_string()), "name").is_err());
        assert_eq!(non_blank(Some(" a ".to_string()), "name").unwrap(), Some("a".to_string()));
        assert_eq!(non_blank(None, "name").unwrap(), None);
    }
}
