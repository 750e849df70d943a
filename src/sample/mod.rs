//! Sample things/categories resource showing renamed, calculated and nested attributes.

mod categories;
mod things;

pub use categories::{category_serializer, Category};
pub use things::{reverse_name, thing_create_rules, thing_serializer, validate_create, Thing, THING_VALID_PARAMS};

use crate::config::CalculationRegistry;
use crate::error::ConfigError;
use crate::serializer::Serializer;
use std::sync::Arc;

/// Serializer for thing listings: no nested relations.
pub fn thing_index_serializer() -> Result<Serializer, ConfigError> {
    thing_serializer(None)
}

/// Serializer for a single thing: its category, and that category's things, two levels deep.
pub fn thing_show_serializer() -> Result<Serializer, ConfigError> {
    let things = Arc::new(thing_serializer(None)?);
    let category = Arc::new(category_serializer(Some(things))?);
    thing_serializer(Some(category))
}

/// Calculations the sample serializer configs refer to by name.
pub fn sample_calculations() -> CalculationRegistry {
    let mut registry = CalculationRegistry::new();
    registry.register("reverse_name", reverse_name);
    registry
}
