//! Sample category resource.

use super::things::Thing;
use crate::error::ConfigError;
use crate::serializer::Serializer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub things: Option<Vec<Thing>>,
}

/// `categories` serializer; nests `things` when a thing serializer is given.
pub fn category_serializer(things: Option<Arc<Serializer>>) -> Result<Serializer, ConfigError> {
    let builder = Serializer::builder("categories").base_fields(["name", "created_at", "updated_at"]);
    match things {
        Some(things) => builder.nested("things", "things", things),
        None => builder,
    }
    .build()
}
