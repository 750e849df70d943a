//! Load serializer configs from disk and build them into a [`SerializerSet`].

use crate::config::{build_order, AttributeKind, CalculationRegistry, SerializerConfig, SerializerSet};
use crate::error::ConfigError;
use crate::serializer::{Attribute, Serializer};
use crate::settings::Settings;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Build every configured serializer (validates first). Nested children are shared by `Arc`.
pub fn resolve(configs: &[SerializerConfig], registry: &CalculationRegistry) -> Result<SerializerSet, ConfigError> {
    let order = build_order(configs, registry)?;
    let mut serializer_by_id: HashMap<String, Arc<Serializer>> = HashMap::with_capacity(order.len());

    for config in order {
        let mut builder = Serializer::builder(config.collection_name.clone().unwrap_or_default())
            .base_fields(config.base_fields.iter().cloned());

        for attr in &config.meta {
            let attribute = match attr.attribute_kind()? {
                AttributeKind::Renamed => Attribute::renamed(attr.required_source()?),
                AttributeKind::Calculated => {
                    let name = attr.required_function()?;
                    let func = registry.get(name).ok_or_else(|| ConfigError::MissingReference {
                        kind: "function",
                        id: name.to_string(),
                    })?;
                    Attribute::Calculated(func)
                }
                AttributeKind::Nested => {
                    let child_id = attr.required_serializer()?;
                    let child = serializer_by_id
                        .get(child_id)
                        .cloned()
                        .ok_or_else(|| ConfigError::MissingReference {
                            kind: "serializer",
                            id: child_id.to_string(),
                        })?;
                    Attribute::nested(attr.required_source()?, child)
                }
            };
            builder = builder.attribute(attr.key.clone(), attribute);
        }

        let serializer = builder.build()?;
        tracing::debug!(id = %config.id, collection = %serializer.collection_name(), "resolved serializer");
        serializer_by_id.insert(config.id.clone(), Arc::new(serializer));
    }

    tracing::info!(count = serializer_by_id.len(), "serializers resolved");
    Ok(SerializerSet { serializer_by_id })
}

/// Read a JSON array of serializer configs.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Vec<SerializerConfig>, ConfigError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&raw).map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))
}

/// Resolve the serializers named by `SERIALIZERS_PATH`, or an empty set when none is configured.
pub fn load_configured(settings: &Settings, registry: &CalculationRegistry) -> Result<SerializerSet, ConfigError> {
    match &settings.serializers_path {
        Some(path) => resolve(&load_from_path(path)?, registry),
        None => Ok(SerializerSet::default()),
    }
}
