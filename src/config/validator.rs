//! Config validation: descriptor kinds, references and nesting cycles.

use crate::config::{AttributeKind, CalculationRegistry, SerializerConfig};
use crate::error::ConfigError;
use std::collections::HashMap;

pub fn validate(configs: &[SerializerConfig], registry: &CalculationRegistry) -> Result<(), ConfigError> {
    build_order(configs, registry).map(|_| ())
}

/// Validate configs and order them so every nested child comes before the serializers that use it.
pub fn build_order<'a>(
    configs: &'a [SerializerConfig],
    registry: &CalculationRegistry,
) -> Result<Vec<&'a SerializerConfig>, ConfigError> {
    let mut by_id: HashMap<&str, &SerializerConfig> = HashMap::new();
    for config in configs {
        if config.collection_name.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingCollectionName);
        }
        if by_id.insert(config.id.as_str(), config).is_some() {
            return Err(ConfigError::DuplicateId(config.id.clone()));
        }
    }

    for config in configs {
        for attr in &config.meta {
            match attr.attribute_kind()? {
                AttributeKind::Renamed => {
                    attr.required_source()?;
                }
                AttributeKind::Calculated => {
                    let name = attr.required_function()?;
                    if !registry.contains(name) {
                        return Err(ConfigError::MissingReference {
                            kind: "function",
                            id: name.to_string(),
                        });
                    }
                }
                AttributeKind::Nested => {
                    attr.required_source()?;
                    let child = attr.required_serializer()?;
                    if !by_id.contains_key(child) {
                        return Err(ConfigError::MissingReference {
                            kind: "serializer",
                            id: child.to_string(),
                        });
                    }
                }
            }
        }
    }

    let mut marks = HashMap::new();
    let mut order = Vec::with_capacity(configs.len());
    for config in configs {
        visit(config.id.as_str(), &by_id, &mut marks, &mut order)?;
    }
    Ok(order)
}

enum Mark {
    Visiting,
    Done,
}

fn visit<'a>(
    id: &'a str,
    by_id: &HashMap<&'a str, &'a SerializerConfig>,
    marks: &mut HashMap<&'a str, Mark>,
    order: &mut Vec<&'a SerializerConfig>,
) -> Result<(), ConfigError> {
    match marks.get(id) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Visiting) => return Err(ConfigError::CyclicReference(id.to_string())),
        None => {}
    }
    let config = by_id.get(id).copied().ok_or_else(|| ConfigError::MissingReference {
        kind: "serializer",
        id: id.to_string(),
    })?;
    marks.insert(id, Mark::Visiting);
    for attr in &config.meta {
        if attr.kind == "nested" {
            if let Some(child) = attr.serializer.as_deref() {
                visit(child, by_id, marks, order)?;
            }
        }
    }
    marks.insert(id, Mark::Done);
    order.push(config);
    Ok(())
}
