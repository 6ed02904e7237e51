use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which the admin credential digest is persisted.
pub const CREDENTIAL_KEY: &str = "password";

/// The installation's configuration record, persisted as a single JSON object.
///
/// Only `password` is interpreted here; any other keys are kept as-is so
/// settings written by later versions survive a round trip.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct ConfigRecord {
    entries: Map<String, Value>,
}

impl ConfigRecord {
    /// An empty record, as written on a fresh install.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a record from parsed JSON, rejecting shapes that would expose a
    /// partially configured installation.
    pub fn from_value(value: Value) -> Result<Self, String> {
        let entries = match value {
            Value::Object(map) => map,
            other => {
                return Err(format!(
                    "expected a JSON object at the top level, found {}",
                    json_kind(&other)
                ))
            }
        };

        let record = ConfigRecord { entries };
        record.validate()?;
        Ok(record)
    }

    /// Checks the invariants a stored record must hold to be loadable again.
    pub fn validate(&self) -> Result<(), String> {
        match self.entries.get(CREDENTIAL_KEY) {
            None => Ok(()),
            Some(Value::String(s)) if !s.is_empty() => Ok(()),
            Some(Value::String(_)) => Err(format!("'{}' is present but empty", CREDENTIAL_KEY)),
            Some(other) => Err(format!(
                "'{}' must be a string, found {}",
                CREDENTIAL_KEY,
                json_kind(other)
            )),
        }
    }

    /// The stored credential digest, if setup has completed.
    pub fn credential_hash(&self) -> Option<&str> {
        self.entries
            .get(CREDENTIAL_KEY)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn is_setup_complete(&self) -> bool {
        self.credential_hash().is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys currently held, for logging without leaking values.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_record_is_not_configured() {
        let record = ConfigRecord::empty();
        assert!(!record.is_setup_complete());
        assert_eq!(record.credential_hash(), None);
    }

    #[test]
    fn credential_marks_setup_complete() {
        let record = ConfigRecord::from_value(json!({ "password": "abc123" })).unwrap();
        assert!(record.is_setup_complete());
        assert_eq!(record.credential_hash(), Some("abc123"));
    }

    #[test]
    fn unknown_keys_are_preserved() {
        let record =
            ConfigRecord::from_value(json!({ "manager": true, "port": 8211 })).unwrap();
        assert!(!record.is_setup_complete());
        assert_eq!(record.get("port"), Some(&json!(8211)));

        let serialized = serde_json::to_value(&record).unwrap();
        assert_eq!(serialized, json!({ "manager": true, "port": 8211 }));
    }

    #[test]
    fn rejects_non_object_documents() {
        let err = ConfigRecord::from_value(json!(["password"])).unwrap_err();
        assert!(err.contains("an array"), "unexpected message: {}", err);
    }

    #[test]
    fn rejects_malformed_credentials() {
        assert!(ConfigRecord::from_value(json!({ "password": "" })).is_err());
        assert!(ConfigRecord::from_value(json!({ "password": 42 })).is_err());
        assert!(ConfigRecord::from_value(json!({ "password": null })).is_err());
    }

    #[test]
    fn validate_flags_in_memory_edits() {
        let mut record = ConfigRecord::empty();
        assert!(record.validate().is_ok());

        record.insert("password", 42);
        assert!(record.validate().unwrap_err().contains("a number"));

        record.insert("password", "abc123");
        assert!(record.validate().is_ok());
    }
}
