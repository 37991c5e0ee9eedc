use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ServiceError;

/// Create/update payload: no id, the store assigns it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordInput {
    pub name: String,
    pub age: u32,
}

impl RecordInput {
    /// Build from trusted values, trimming the name.
    pub fn new(name: impl AsRef<str>, age: u32) -> Self {
        Self { name: name.as_ref().trim().to_string(), age }
    }

    /// Parse an untyped request body.
    /// - both `name` and `age` must be present
    /// - `name` is a string, trimmed, non-empty
    /// - `age` is an integer or a string holding one, and not negative
    pub fn from_json(body: &Value) -> Result<Self, ServiceError> {
        let obj = body
            .as_object()
            .filter(|o| o.contains_key("name") && o.contains_key("age"))
            .ok_or_else(|| ServiceError::Validation("name and age are required".into()))?;

        let name = obj["name"]
            .as_str()
            .ok_or_else(|| ServiceError::Validation("name must be a string".into()))?;
        let age = parse_age(&obj["age"])?;

        let input = Self::new(name, age);
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.name.trim().is_empty() {
            return Err(ServiceError::Validation("name must not be empty".into()));
        }
        Ok(())
    }
}

fn parse_age(value: &Value) -> Result<u32, ServiceError> {
    let invalid = || ServiceError::Validation("age must be a valid number".into());
    let raw: i64 = match value {
        Value::Number(n) => n.as_i64().ok_or_else(invalid)?,
        Value::String(s) => s.trim().parse().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };
    if raw < 0 {
        return Err(ServiceError::Validation("age must be a non-negative number".into()));
    }
    u32::try_from(raw).map_err(|_| ServiceError::Validation("age is out of range".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validation_msg(body: Value) -> String {
        match RecordInput::from_json(&body) {
            Err(ServiceError::Validation(msg)) => msg,
            other => panic!("expected validation error for {body}, got {other:?}"),
        }
    }

    #[test]
    fn accepts_integer_and_numeric_string_age() {
        let a = RecordInput::from_json(&json!({"name": "  Ana ", "age": 30})).unwrap();
        assert_eq!(a, RecordInput { name: "Ana".into(), age: 30 });
        let b = RecordInput::from_json(&json!({"name": "Bruno", "age": " 25 "})).unwrap();
        assert_eq!(b.age, 25);
    }

    #[test]
    fn zero_age_is_valid() {
        assert_eq!(RecordInput::from_json(&json!({"name": "Baby", "age": 0})).unwrap().age, 0);
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert_eq!(validation_msg(json!({"name": "Ana"})), "name and age are required");
        assert_eq!(validation_msg(json!({"age": 3})), "name and age are required");
        assert_eq!(validation_msg(json!(null)), "name and age are required");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(validation_msg(json!({"name": "   ", "age": 3})), "name must not be empty");
        assert_eq!(validation_msg(json!({"name": "", "age": 3})), "name must not be empty");
        assert_eq!(validation_msg(json!({"name": 12, "age": 3})), "name must be a string");
    }

    #[test]
    fn bad_ages_are_rejected() {
        assert_eq!(validation_msg(json!({"name": "Ana", "age": -1})), "age must be a non-negative number");
        assert_eq!(validation_msg(json!({"name": "Ana", "age": "-1"})), "age must be a non-negative number");
        assert_eq!(validation_msg(json!({"name": "Ana", "age": "abc"})), "age must be a valid number");
        assert_eq!(validation_msg(json!({"name": "Ana", "age": 1.5})), "age must be a valid number");
        // whole-valued floats are not integers either
        assert_eq!(validation_msg(json!({"name": "Ana", "age": 30.0})), "age must be a valid number");
        assert_eq!(validation_msg(json!({"name": "Ana", "age": "30.0"})), "age must be a valid number");
        assert_eq!(validation_msg(json!({"name": "Ana", "age": null})), "age must be a valid number");
        assert_eq!(validation_msg(json!({"name": "Ana", "age": 5_000_000_000i64})), "age is out of range");
    }
}
