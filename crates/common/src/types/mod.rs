use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Uniform response wrapper: `{success, data?, message}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
}

impl<T> Envelope<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self { success: true, data: Some(data), message: message.into() }
    }
}

impl Envelope<()> {
    /// Success without a payload (delete, export).
    pub fn done(message: impl Into<String>) -> Self {
        Self { success: true, data: None, message: message.into() }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, data: None, message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn data_is_omitted_when_absent() {
        let v = serde_json::to_value(Envelope::failure("record not found")).unwrap();
        assert_eq!(v, json!({"success": false, "message": "record not found"}));
    }

    #[test]
    fn data_is_present_on_success() {
        let v = serde_json::to_value(Envelope::ok(vec![1, 2], "listed")).unwrap();
        assert_eq!(v, json!({"success": true, "data": [1, 2], "message": "listed"}));
    }
}
