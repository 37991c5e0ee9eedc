use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::ModelError;

/// Person record managed by the registry.
/// - id: assigned by the store, never by callers; never changes
/// - name: non-empty after trimming
/// - age: non-negative
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    pub id: u64,
    pub name: String,
    pub age: u32,
}

impl Record {
    pub fn new(id: u64, name: impl Into<String>, age: u32) -> Self {
        Self { id, name: name.into(), age }
    }

    /// Serializable map form `{id, name, age}`.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("id".into(), Value::from(self.id));
        map.insert("name".into(), Value::from(self.name.clone()));
        map.insert("age".into(), Value::from(self.age));
        map
    }

    /// Rebuild a record from its persisted map form.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, ModelError> {
        let id = map
            .get("id")
            .ok_or_else(|| ModelError::malformed("missing key `id`"))?
            .as_u64()
            .ok_or_else(|| ModelError::malformed("`id` must be a non-negative integer"))?;
        let name = map
            .get("name")
            .ok_or_else(|| ModelError::malformed(format!("record {id}: missing key `name`")))?
            .as_str()
            .ok_or_else(|| ModelError::malformed(format!("record {id}: `name` must be a string")))?
            .to_string();
        let age = map
            .get("age")
            .ok_or_else(|| ModelError::malformed(format!("record {id}: missing key `age`")))?
            .as_u64()
            .and_then(|a| u32::try_from(a).ok())
            .ok_or_else(|| ModelError::malformed(format!("record {id}: `age` out of range")))?;
        Ok(Self { id, name, age })
    }

    /// Parse an untyped JSON value holding one record.
    pub fn from_value(value: &Value) -> Result<Self, ModelError> {
        match value.as_object() {
            Some(map) => Self::from_map(map),
            None => Err(ModelError::malformed("record entry is not an object")),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} - {} years", self.id, self.name, self.age)
    }
}
