//! Request body validation.
//!
//! Payloads derive [`validator::Validate`]; failures are flattened into a
//! [`ValidationErrorSet`] that is sent back to the client as-is.

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::ApiError;

/// Field name -> human readable message, one entry per failing field.
pub type ValidationErrorSet = HashMap<String, String>;

/// Flatten `validator` errors into one message per field.
///
/// When a field carries several errors the last one wins.
pub fn field_error_set(errors: &ValidationErrors) -> ValidationErrorSet {
    let mut set = ValidationErrorSet::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors.iter() {
            set.insert(field.to_string(), default_message(error));
        }
    }

    set
}

fn default_message(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    match error.code.as_ref() {
        "length" => "size is out of range".to_string(),
        "range" => "is out of range".to_string(),
        "regex" => "has an invalid format".to_string(),
        code => format!("is invalid ({code})"),
    }
}

/// Run schema validation on a bound payload.
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), ApiError> {
    payload
        .validate()
        .map_err(|errors| ApiError::Validation(field_error_set(&errors)))
}

/// Rejects blank strings, including whitespace-only ones.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// JSON body extractor that also validates the payload.
///
/// Malformed bodies are reported as `BadRequest`, schema failures as
/// `Validation` with the per-field messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        validate_payload(&payload)?;

        Ok(ValidatedJson(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Sample {
        #[validate(custom(function = "not_blank"))]
        name: String,
        #[validate(length(max = 3))]
        code: Option<String>,
        #[validate(range(min = 1, max = 10, message = "must be between 1 and 10"))]
        rank: Option<i32>,
    }

    #[test]
    fn not_blank_rejects_whitespace() {
        assert!(not_blank("").is_err());
        assert!(not_blank("   \t").is_err());
        assert!(not_blank("Jordan").is_ok());
    }

    #[test]
    fn collects_every_failing_field() {
        let sample = Sample {
            name: " ".to_string(),
            code: None,
            rank: Some(11),
        };

        let set = field_error_set(&sample.validate().unwrap_err());
        assert_eq!(set.len(), 2);
        assert_eq!(set["name"], "must not be blank");
        assert_eq!(set["rank"], "must be between 1 and 10");
    }

    #[test]
    fn falls_back_to_code_based_message() {
        let sample = Sample {
            name: "ok".to_string(),
            code: Some("toolong".to_string()),
            rank: None,
        };

        let set = field_error_set(&sample.validate().unwrap_err());
        assert_eq!(set["code"], "size is out of range");
    }

    #[test]
    fn last_error_for_a_field_wins() {
        let mut errors = ValidationErrors::new();
        let mut first = ValidationError::new("first");
        first.message = Some("first message".into());
        let mut second = ValidationError::new("second");
        second.message = Some("second message".into());
        errors.add("name", first);
        errors.add("name", second);

        let set = field_error_set(&errors);
        assert_eq!(set.len(), 1);
        assert_eq!(set["name"], "second message");
    }

    #[test]
    fn validate_payload_maps_to_validation_error() {
        let sample = Sample {
            name: String::new(),
            code: None,
            rank: None,
        };

        match validate_payload(&sample) {
            Err(ApiError::Validation(set)) => assert!(set.contains_key("name")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
