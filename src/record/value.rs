//! Closed set of values a record may contain

use serde_json::{Map, Number, Value};
use thiserror::Error;

/// A value headed for the wire.
///
/// Every variant except [`RecordValue::Opaque`] has a JSON form. `Opaque`
/// stands for anything the encoder does not know how to represent.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Text(String),
    /// Array-like container, encoded as a JSON array
    Sequence(Vec<RecordValue>),
    /// Field list of a convertible object, encoded in field order
    Object(Vec<(String, RecordValue)>),
    /// Unrepresentable value; encoding it always fails
    Opaque { type_name: String },
}

/// Record serialization errors
#[derive(Debug, Error)]
pub enum SerializeError {
    /// Value type has no JSON representation
    #[error("Object of type {type_name} at {path} is not JSON serializable")]
    Unsupported { path: String, type_name: String },
    /// NaN or infinity, which JSON cannot carry
    #[error("Non-finite number {value} at {path}")]
    NonFinite { path: String, value: f64 },
    /// serde_json failed to write the document
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Capability to turn a value into a record object
pub trait ToRecord {
    fn to_record(&self) -> RecordValue;
}

impl From<i64> for RecordValue {
    fn from(v: i64) -> Self {
        RecordValue::Int(v)
    }
}

impl From<u64> for RecordValue {
    fn from(v: u64) -> Self {
        RecordValue::UInt(v)
    }
}

impl From<f64> for RecordValue {
    fn from(v: f64) -> Self {
        RecordValue::Float(v)
    }
}

impl From<bool> for RecordValue {
    fn from(v: bool) -> Self {
        RecordValue::Bool(v)
    }
}

impl From<&str> for RecordValue {
    fn from(v: &str) -> Self {
        RecordValue::Text(v.to_string())
    }
}

impl From<String> for RecordValue {
    fn from(v: String) -> Self {
        RecordValue::Text(v)
    }
}

impl<T: Into<RecordValue>> From<Vec<T>> for RecordValue {
    fn from(v: Vec<T>) -> Self {
        RecordValue::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl RecordValue {
    /// Convert to a JSON value, rooted at `$`
    pub fn to_json(&self) -> Result<Value, SerializeError> {
        self.to_json_at("$")
    }

    fn to_json_at(&self, path: &str) -> Result<Value, SerializeError> {
        match self {
            RecordValue::Int(v) => Ok(Value::from(*v)),
            RecordValue::UInt(v) => Ok(Value::from(*v)),
            RecordValue::Float(v) => Number::from_f64(*v)
                .map(Value::Number)
                .ok_or_else(|| SerializeError::NonFinite {
                    path: path.to_string(),
                    value: *v,
                }),
            RecordValue::Bool(v) => Ok(Value::Bool(*v)),
            RecordValue::Text(v) => Ok(Value::String(v.clone())),
            RecordValue::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| item.to_json_at(&format!("{}[{}]", path, i)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            RecordValue::Object(fields) => {
                let mut map = Map::with_capacity(fields.len());
                for (name, value) in fields {
                    let json = value.to_json_at(&format!("{}.{}", path, name))?;
                    map.insert(name.clone(), json);
                }
                Ok(Value::Object(map))
            }
            RecordValue::Opaque { type_name } => Err(SerializeError::Unsupported {
                path: path.to_string(),
                type_name: type_name.clone(),
            }),
        }
    }
}
