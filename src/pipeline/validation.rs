//! Submission field validation.
//!
//! # Design Decisions
//! - Rules run in order; the first failure wins
//! - Deliberately permissive: no trimming, no email/phone format
//!   checks — the hard boundary is presence, type and size
//! - Error display strings are the exact client-facing messages

use serde_json::Value;
use thiserror::Error;

/// Maximum accepted length for the identifier and the secret.
pub const MAX_FIELD_LEN: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid input type")]
    InvalidType,

    #[error("Input exceeds maximum length")]
    TooLong,
}

/// Fields that passed validation, ready for hashing and storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFields {
    pub identifier: String,
    pub secret: String,
    /// Client-supplied timestamp, trusted as-is.
    pub timestamp: Value,
}

fn present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Validate the raw JSON body of a submission.
pub fn validate(body: &Value) -> Result<ValidatedFields, ValidationError> {
    let identifier = body.get("emailOrPhone");
    let secret = body.get("password");
    let timestamp = body.get("timestamp");

    if !present(identifier) || !present(secret) || !present(timestamp) {
        return Err(ValidationError::MissingFields);
    }

    let (Some(Value::String(identifier)), Some(Value::String(secret))) = (identifier, secret)
    else {
        return Err(ValidationError::InvalidType);
    };

    if identifier.len() > MAX_FIELD_LEN || secret.len() > MAX_FIELD_LEN {
        return Err(ValidationError::TooLong);
    }

    Ok(ValidatedFields {
        identifier: identifier.clone(),
        secret: secret.clone(),
        timestamp: timestamp.cloned().unwrap_or(Value::Null),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "emailOrPhone": "a@b.com",
            "password": "hunter2",
            "timestamp": "2024-01-01T00:00:00Z"
        })
    }

    #[test]
    fn test_valid_body_passes() {
        let fields = validate(&valid_body()).unwrap();
        assert_eq!(fields.identifier, "a@b.com");
        assert_eq!(fields.secret, "hunter2");
        assert_eq!(fields.timestamp, json!("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_missing_fields() {
        for field in ["emailOrPhone", "password", "timestamp"] {
            let mut body = valid_body();
            body.as_object_mut().unwrap().remove(field);
            assert_eq!(validate(&body), Err(ValidationError::MissingFields), "{field}");
        }

        let mut body = valid_body();
        body["password"] = json!("");
        assert_eq!(validate(&body), Err(ValidationError::MissingFields));

        let mut body = valid_body();
        body["timestamp"] = Value::Null;
        assert_eq!(validate(&body), Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_invalid_types() {
        let mut body = valid_body();
        body["emailOrPhone"] = json!(12345);
        assert_eq!(validate(&body), Err(ValidationError::InvalidType));

        let mut body = valid_body();
        body["password"] = json!(["h", "unter2"]);
        assert_eq!(validate(&body), Err(ValidationError::InvalidType));
    }

    #[test]
    fn test_length_boundary() {
        let mut body = valid_body();
        body["password"] = json!("x".repeat(MAX_FIELD_LEN));
        assert!(validate(&body).is_ok());

        body["password"] = json!("x".repeat(MAX_FIELD_LEN + 1));
        assert_eq!(validate(&body), Err(ValidationError::TooLong));

        let mut body = valid_body();
        body["emailOrPhone"] = json!("x".repeat(MAX_FIELD_LEN + 1));
        assert_eq!(validate(&body), Err(ValidationError::TooLong));
    }

    #[test]
    fn test_first_failure_wins() {
        // Missing field outranks a type problem elsewhere in the body.
        let body = json!({ "emailOrPhone": 42, "password": "hunter2" });
        assert_eq!(validate(&body), Err(ValidationError::MissingFields));
    }
}
