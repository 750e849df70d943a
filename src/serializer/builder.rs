//! Builder producing an immutable [`Serializer`].

use super::{Attribute, CalculationHook, Serializer};
use crate::error::{CalculationError, ConfigError};
use serde_json::{Map, Value};
use std::sync::Arc;

pub struct SerializerBuilder {
    collection_name: String,
    base_fields: Vec<String>,
    meta: Vec<(String, Attribute)>,
    on_calculation_error: Option<Arc<CalculationHook>>,
}

impl SerializerBuilder {
    pub(super) fn new(collection_name: impl Into<String>) -> Self {
        SerializerBuilder {
            collection_name: collection_name.into(),
            base_fields: Vec::new(),
            meta: Vec::new(),
            on_calculation_error: None,
        }
    }

    pub fn base_field(mut self, name: impl Into<String>) -> Self {
        self.base_fields.push(name.into());
        self
    }

    pub fn base_fields<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_fields.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declare a meta attribute. Re-declaring a key replaces the earlier descriptor in place.
    pub fn attribute(mut self, key: impl Into<String>, attribute: Attribute) -> Self {
        let key = key.into();
        match self.meta.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = attribute,
            None => self.meta.push((key, attribute)),
        }
        self
    }

    pub fn renamed(self, key: impl Into<String>, source_key: impl Into<String>) -> Self {
        self.attribute(key, Attribute::renamed(source_key))
    }

    pub fn calculated<F>(self, key: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> Result<Value, CalculationError> + Send + Sync + 'static,
    {
        self.attribute(key, Attribute::calculated(func))
    }

    pub fn nested(
        self,
        key: impl Into<String>,
        source_key: impl Into<String>,
        serializer: impl Into<Arc<Serializer>>,
    ) -> Self {
        self.attribute(key, Attribute::nested(source_key, serializer))
    }

    /// Called with the attribute key whenever a calculated attribute fails, including inside
    /// nested serializers that have no hook of their own.
    pub fn on_calculation_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &CalculationError) + Send + Sync + 'static,
    {
        self.on_calculation_error = Some(Arc::new(hook));
        self
    }

    pub fn build(self) -> Result<Serializer, ConfigError> {
        if self.collection_name.is_empty() {
            return Err(ConfigError::MissingCollectionName);
        }
        Ok(Serializer {
            collection_name: self.collection_name,
            base_fields: self.base_fields,
            meta: self.meta,
            on_calculation_error: self.on_calculation_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_name_is_rejected() {
        let err = Serializer::builder("").build().unwrap_err();
        assert!(matches!(err, ConfigError::MissingCollectionName));
    }

    #[test]
    fn new_serializer_starts_empty() {
        let serializer = Serializer::builder("serializers").build().unwrap();
        assert_eq!(serializer.collection_name(), "serializers");
        assert!(serializer.base_fields().is_empty());
        assert_eq!(serializer.meta().count(), 0);
    }

    #[test]
    fn redeclared_attribute_keeps_first_position() {
        let serializer = Serializer::builder("test")
            .renamed("x", "a")
            .renamed("y", "b")
            .renamed("x", "c")
            .build()
            .unwrap();
        let meta: Vec<_> = serializer.meta().collect();
        assert_eq!(meta.len(), 2);
        assert_eq!(meta[0].0, "x");
        assert!(matches!(meta[0].1, Attribute::Renamed(k) if k == "c"));
        assert_eq!(meta[1].0, "y");
    }
}
