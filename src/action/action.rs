use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::DEFAULT_KIND_FIELD;
use crate::error::StoreError;

/// A validated signal: a plain record carrying its kind field.
///
/// Stores hand these to the transition function. Callers usually build the
/// raw [`Value`] themselves, or use [`Action::new`] and let `From` convert it.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    record: Map<String, Value>,
    kind_field: String,
}

impl Action {
    /// Create an action of the given kind under the default `"type"` field.
    ///
    /// ```
    /// use rudder::Action;
    ///
    /// let action = Action::new("ADD").with("payload", 5);
    /// assert_eq!(action.kind_str(), Some("ADD"));
    /// assert_eq!(action.payload(), Some(&serde_json::json!(5)));
    /// ```
    pub fn new(kind: impl Into<Value>) -> Self {
        let mut record = Map::new();
        record.insert(DEFAULT_KIND_FIELD.to_string(), kind.into());
        Self {
            record,
            kind_field: DEFAULT_KIND_FIELD.to_string(),
        }
    }

    pub(crate) fn from_record(record: Map<String, Value>, kind_field: &str) -> Self {
        Self {
            record,
            kind_field: kind_field.to_string(),
        }
    }

    /// Add or replace a field.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.record.insert(key.into(), value.into());
        self
    }

    /// The kind field's value. May be `null`, which is still a kind.
    pub fn kind(&self) -> &Value {
        self.record.get(&self.kind_field).unwrap_or(&Value::Null)
    }

    /// The kind as a string, if it is one.
    pub fn kind_str(&self) -> Option<&str> {
        self.kind().as_str()
    }

    /// Check the kind against a string.
    pub fn is(&self, kind: &str) -> bool {
        self.kind_str() == Some(kind)
    }

    /// Any field of the record, the kind field included.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record.get(key)
    }

    /// The conventional `payload` field.
    pub fn payload(&self) -> Option<&Value> {
        self.get("payload")
    }

    /// The whole record.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.record
    }

    /// Decode the whole record into a typed signal, usually an enum tagged
    /// with `#[serde(tag = "type")]`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        Ok(serde_json::from_value(Value::Object(self.record.clone()))?)
    }

    /// Back to the plain record this action was validated from.
    pub fn into_value(self) -> Value {
        Value::Object(self.record)
    }
}

impl From<Action> for Value {
    fn from(action: Action) -> Self {
        action.into_value()
    }
}
