//! Declarative serializer: projects JSON records into response payloads.
//!
//! A [`Serializer`] copies its base fields in declaration order, then evaluates each meta
//! [`Attribute`] against the original record. Arrays are wrapped as `{ collection_name: [...] }`.
//! Serializers are immutable once built, and nested children are held by `Arc`, so a serializer
//! graph can never reference itself.

mod attribute;
mod builder;

pub use attribute::{Attribute, CalculateFn};
pub use builder::SerializerBuilder;

use crate::error::{AppError, CalculationError};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Diagnostic callback for swallowed calculation failures: `(attribute key, error)`.
pub type CalculationHook = dyn Fn(&str, &CalculationError) + Send + Sync;

#[derive(Clone)]
pub struct Serializer {
    collection_name: String,
    base_fields: Vec<String>,
    meta: Vec<(String, Attribute)>,
    on_calculation_error: Option<Arc<CalculationHook>>,
}

impl Serializer {
    pub fn builder(collection_name: impl Into<String>) -> SerializerBuilder {
        SerializerBuilder::new(collection_name)
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    pub fn base_fields(&self) -> &[String] {
        &self.base_fields
    }

    pub fn meta(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.meta.iter().map(|(k, a)| (k.as_str(), a))
    }

    /// Serialize an object or an array of objects. Anything else yields `null`.
    pub fn serialize(&self, value: &Value) -> Value {
        self.serialize_with(value, None)
    }

    /// Like [`Serializer::serialize`], with a fallback hook for children that have none.
    pub(crate) fn serialize_with(
        &self,
        value: &Value,
        inherited: Option<&Arc<CalculationHook>>,
    ) -> Value {
        match value {
            Value::Object(source) => Value::Object(self.serialize_one_with(source, inherited)),
            Value::Array(items) => {
                let mut wrapper = Map::with_capacity(1);
                wrapper.insert(
                    self.collection_name.clone(),
                    Value::Array(self.serialize_elements_with(items, inherited)),
                );
                Value::Object(wrapper)
            }
            _ => Value::Null,
        }
    }

    /// Serialize a typed record by converting it to JSON first.
    pub fn serialize_from<T: Serialize>(&self, record: &T) -> Result<Value, AppError> {
        let value = serde_json::to_value(record)?;
        Ok(self.serialize(&value))
    }

    /// Serialize a single source object. Meta keys overwrite colliding base fields in place.
    pub fn serialize_one(&self, source: &Map<String, Value>) -> Map<String, Value> {
        self.serialize_one_with(source, None)
    }

    fn serialize_one_with(
        &self,
        source: &Map<String, Value>,
        inherited: Option<&Arc<CalculationHook>>,
    ) -> Map<String, Value> {
        let hook = self.on_calculation_error.as_ref().or(inherited);
        let mut out = Map::with_capacity(self.base_fields.len() + self.meta.len());
        for field in &self.base_fields {
            out.insert(field.clone(), source.get(field).cloned().unwrap_or(Value::Null));
        }
        for (key, attribute) in &self.meta {
            let value = attribute.evaluate_with(source, hook).unwrap_or_else(|e| {
                self.report_calculation_error(key, &e, hook);
                Value::Null
            });
            out.insert(key.clone(), value);
        }
        out
    }

    /// Serialize each element without the collection wrapper. Non-object elements become `null`.
    pub(crate) fn serialize_elements(&self, items: &[Value]) -> Vec<Value> {
        self.serialize_elements_with(items, None)
    }

    pub(crate) fn serialize_elements_with(
        &self,
        items: &[Value],
        inherited: Option<&Arc<CalculationHook>>,
    ) -> Vec<Value> {
        items
            .iter()
            .map(|item| match item {
                Value::Object(source) => Value::Object(self.serialize_one_with(source, inherited)),
                _ => Value::Null,
            })
            .collect()
    }

    fn report_calculation_error(
        &self,
        key: &str,
        error: &CalculationError,
        hook: Option<&Arc<CalculationHook>>,
    ) {
        tracing::debug!(
            collection = %self.collection_name,
            attribute = %key,
            error = %error,
            "calculated attribute failed, emitting null"
        );
        if let Some(hook) = hook {
            hook(key, error);
        }
    }
}

impl fmt::Debug for Serializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Serializer")
            .field("collection_name", &self.collection_name)
            .field("base_fields", &self.base_fields)
            .field("meta", &self.meta)
            .finish_non_exhaustive()
    }
}
