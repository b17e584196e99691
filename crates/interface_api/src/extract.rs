//! Request extractors

use std::str::FromStr;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::{ApiError, FieldError};

/// JSON body that has been deserialized and passed its `validator` rules
///
/// Both a body that does not deserialize and one that fails validation are
/// rejected as `validation_error` with per-field messages.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejected_body)?;
        value.validate().map_err(field_errors)?;
        Ok(Self(value))
    }
}

fn rejected_body(rejection: JsonRejection) -> ApiError {
    let text = rejection.body_text();
    let field = missing_field(&text).unwrap_or("body").to_string();
    ApiError::invalid(field, text)
}

/// Pulls the name out of serde's "missing field `name`" message
fn missing_field(message: &str) -> Option<&str> {
    let rest = &message[message.find("missing field `")? + "missing field `".len()..];
    rest.split('`').next()
}

/// Flattens `validator` output into camelCase field errors, sorted by field
pub fn field_errors(errors: ValidationErrors) -> ApiError {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = camel_case(&field.to_string());
            errs.iter()
                .map(|err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{field} is invalid ({})", err.code));
                    FieldError::new(field.clone(), message)
                })
                .collect::<Vec<_>>()
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    ApiError::Validation(fields)
}

fn camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Parses a path identifier; anything unparseable is an unknown record
pub fn path_id<I: FromStr>(raw: &str, entity: &str) -> Result<I, ApiError> {
    raw.parse().map_err(|_| ApiError::not_found(entity))
}

/// Parses an optional query identifier; blank counts as absent
pub fn query_id<I: FromStr>(raw: Option<&str>, field: &str) -> Result<Option<I>, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| ApiError::invalid(field, format!("{field} is not a valid id"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ProjectId;

    #[test]
    fn test_missing_field_is_extracted() {
        let message = "Failed to deserialize the JSON body into the target type: \
                       missing field `letterId` at line 1 column 2";
        assert_eq!(missing_field(message), Some("letterId"));
        assert_eq!(missing_field("expected value at line 1 column 1"), None);
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("bsmv_and_other_costs"), "bsmvAndOtherCosts");
        assert_eq!(camel_case("name"), "name");
    }

    #[test]
    fn test_query_id_blank_is_none() {
        assert_eq!(query_id::<ProjectId>(Some("  "), "projectId").unwrap(), None);
        assert!(query_id::<ProjectId>(Some("nope"), "projectId").is_err());
    }

    #[test]
    fn test_path_id_malformed_is_not_found() {
        let err = path_id::<ProjectId>("nope", "Project").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
