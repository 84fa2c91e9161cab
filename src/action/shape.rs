use serde_json::Value;

use super::Action;
use crate::error::StoreError;

/// Returns true if `value` is a plain record: an object, not `null`, a scalar
/// or an array.
pub fn is_plain_record(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Checks a raw signal and turns it into an [`Action`].
///
/// Only an absent `kind_field` is rejected; a present `null`, `0` or `""` is
/// a valid kind.
pub(crate) fn validate(signal: Value, kind_field: &str) -> Result<Action, StoreError> {
    let record = match signal {
        Value::Object(record) => record,
        other => {
            return Err(StoreError::InvalidSignalShape {
                found: describe(&other),
            })
        }
    };
    if !record.contains_key(kind_field) {
        return Err(StoreError::MissingSignalKind {
            field: kind_field.to_string(),
        });
    }
    Ok(Action::from_record(record, kind_field))
}
