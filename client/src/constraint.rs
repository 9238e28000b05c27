//! Validation constraint builders.

use serde_json::{json, Map, Value};

/// Default messages the server understands for each constraint.
mod messages {
    pub const REQUIRED: &str = "messages.required";
    pub const MIN: &str = "messages.min";
    pub const MAX: &str = "messages.max";
    pub const SIZE: &str = "messages.size";
    pub const DIGITS: &str = "messages.digits";
    pub const PATTERN: &str = "messages.pattern";
    pub const EMAIL: &str = "messages.email";
    pub const FALSE: &str = "messages.false";
    pub const TRUE: &str = "messages.true";
    pub const FUTURE: &str = "messages.future";
    pub const PAST: &str = "messages.past";
    pub const URL: &str = "messages.url";
}

/// A named validation constraint with its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    name: String,
    payload: Map<String, Value>,
}

impl Constraint {
    fn build(name: &str, payload: Value) -> Self {
        let payload = match payload {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            name: name.to_string(),
            payload,
        }
    }

    /// Name of the constraint, e.g. `required` or `max`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Payload sent to the server.
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// The field must not be blank.
    pub fn required() -> Self {
        Self::build("required", json!({"message": messages::REQUIRED}))
    }

    /// The field must be a number `>= min`.
    pub fn min(min: i64) -> Self {
        Self::build("min", json!({"value": min, "message": messages::MIN}))
    }

    /// The field must be a number `<= max`.
    pub fn max(max: i64) -> Self {
        Self::build("max", json!({"value": max, "message": messages::MAX}))
    }

    /// The field length must be within `[min, max]`.
    pub fn size(min: i64, max: i64) -> Self {
        Self::build(
            "size",
            json!({"min": min, "max": max, "message": messages::SIZE}),
        )
    }

    /// The field must be a number with at most the given integer and fraction digits.
    pub fn digits(integer: i64, fraction: i64) -> Self {
        Self::build(
            "digits",
            json!({"integer": integer, "fraction": fraction, "message": messages::DIGITS}),
        )
    }

    /// The field must match the regular expression.
    pub fn pattern(regex: impl Into<String>) -> Self {
        Self::build(
            "pattern",
            json!({"value": regex.into(), "message": messages::PATTERN}),
        )
    }

    pub fn email() -> Self {
        Self::build("email", json!({"message": messages::EMAIL}))
    }

    /// The field must be `false`.
    pub fn falsy() -> Self {
        Self::build("false", json!({"message": messages::FALSE}))
    }

    /// The field must be `true`.
    pub fn truthy() -> Self {
        Self::build("true", json!({"message": messages::TRUE}))
    }

    /// The field must be a date in the future.
    pub fn future() -> Self {
        Self::build("future", json!({"message": messages::FUTURE}))
    }

    /// The field must be a date in the past.
    pub fn past() -> Self {
        Self::build("past", json!({"message": messages::PAST}))
    }

    pub fn url() -> Self {
        Self::build("url", json!({"message": messages::URL}))
    }
}
