//! Resolved serializers and the registry of named calculations they draw from.

use crate::error::CalculationError;
use crate::serializer::{CalculateFn, Serializer};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Named functions that `calculated` attributes refer to by `function`.
#[derive(Clone, Default)]
pub struct CalculationRegistry {
    functions: HashMap<String, Arc<CalculateFn>>,
}

impl CalculationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(&mut self, name: impl Into<String>, func: F) -> &mut Self
    where
        F: Fn(&Map<String, Value>) -> Result<Value, CalculationError> + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Arc::new(func));
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<CalculateFn>> {
        self.functions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }
}

/// Serializers built from config, looked up by id.
#[derive(Clone, Debug, Default)]
pub struct SerializerSet {
    pub serializer_by_id: HashMap<String, Arc<Serializer>>,
}

impl SerializerSet {
    pub fn get(&self, id: &str) -> Option<&Arc<Serializer>> {
        self.serializer_by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.serializer_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.serializer_by_id.is_empty()
    }
}
