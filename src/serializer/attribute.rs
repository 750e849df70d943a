//! Meta attribute descriptors: renamed, calculated and nested.

use super::{CalculationHook, Serializer};
use crate::error::CalculationError;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Function behind a calculated attribute. Receives the source object.
pub type CalculateFn = dyn Fn(&Map<String, Value>) -> Result<Value, CalculationError> + Send + Sync;

/// How one meta attribute is computed from the source object.
#[derive(Clone)]
pub enum Attribute {
    /// Copy `source[key]`, or `null` when the key is absent.
    Renamed(String),
    /// Result of a function over the whole source; failures become `null`.
    Calculated(Arc<CalculateFn>),
    /// `source[key]` passed through a child serializer. Arrays come back unwrapped.
    Nested { key: String, serializer: Arc<Serializer> },
}

impl Attribute {
    pub fn renamed(key: impl Into<String>) -> Self {
        Attribute::Renamed(key.into())
    }

    pub fn calculated<F>(func: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> Result<Value, CalculationError> + Send + Sync + 'static,
    {
        Attribute::Calculated(Arc::new(func))
    }

    pub fn nested(key: impl Into<String>, serializer: impl Into<Arc<Serializer>>) -> Self {
        Attribute::Nested {
            key: key.into(),
            serializer: serializer.into(),
        }
    }

    /// Evaluate against the source object, surfacing calculation failures.
    pub fn try_evaluate(&self, source: &Map<String, Value>) -> Result<Value, CalculationError> {
        self.evaluate_with(source, None)
    }

    /// Nested children report their own failures to `hook` unless they carry a hook of their own.
    pub(super) fn evaluate_with(
        &self,
        source: &Map<String, Value>,
        hook: Option<&Arc<CalculationHook>>,
    ) -> Result<Value, CalculationError> {
        match self {
            Attribute::Renamed(key) => Ok(source.get(key).cloned().unwrap_or(Value::Null)),
            Attribute::Calculated(func) => func(source),
            Attribute::Nested { key, serializer } => Ok(match source.get(key) {
                Some(Value::Array(items)) => Value::Array(serializer.serialize_elements_with(items, hook)),
                Some(value) => serializer.serialize_with(value, hook),
                None => Value::Null,
            }),
        }
    }
}

impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Renamed(key) => f.debug_tuple("Renamed").field(key).finish(),
            Attribute::Calculated(_) => f.write_str("Calculated(..)"),
            Attribute::Nested { key, serializer } => f
                .debug_struct("Nested")
                .field("key", key)
                .field("collection_name", &serializer.collection_name())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn eval(attr: &Attribute, value: Value) -> Value {
        attr.try_evaluate(&object(value)).unwrap_or(Value::Null)
    }

    #[test]
    fn renamed_reads_key_or_null() {
        let attr = Attribute::renamed("keyToRename");
        assert_eq!(eval(&attr, json!({})), Value::Null);
        assert_eq!(eval(&attr, json!({ "keyToRename": 123 })), json!(123));
        assert_eq!(eval(&attr, json!({ "keyToRename": null })), Value::Null);
    }

    #[test]
    fn calculated_swallows_failure() {
        let failing = Attribute::calculated(|_| Err(CalculationError::Failed("cant serialize".into())));
        assert_eq!(eval(&failing, json!({ "a": 1 })), Value::Null);
        assert!(failing.try_evaluate(&object(json!({ "a": 1 }))).is_err());

        let ok = Attribute::calculated(|o| Ok(json!(format!("some value: {}", o["a"]))));
        assert_eq!(eval(&ok, json!({ "a": 1 })), json!("some value: 1"));
    }

    #[test]
    fn nested_unwraps_arrays_only() {
        let child = Serializer::builder("nested").base_fields(["a", "b"]).build().unwrap();
        let attr = Attribute::nested("nestedInput", child);

        assert_eq!(eval(&attr, json!({})), Value::Null);
        assert_eq!(
            eval(&attr, json!({ "nestedInput": [{ "a": "1", "c": "2" }, { "a": "3", "b": "4" }] })),
            json!([{ "a": "1", "b": null }, { "a": "3", "b": "4" }])
        );
        assert_eq!(
            eval(&attr, json!({ "nestedInput": { "a": "1", "c": "1" } })),
            json!({ "a": "1", "b": null })
        );
        assert_eq!(eval(&attr, json!({ "nestedInput": "scalar" })), Value::Null);
    }
}
