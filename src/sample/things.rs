//! Sample thing resource: serializer, calculated attribute and create validation.

use super::categories::Category;
use crate::error::{AppError, CalculationError, ConfigError};
use crate::serializer::Serializer;
use crate::validation::{pick, RequestValidator, ValidationRule};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

pub const THING_VALID_PARAMS: [&str; 2] = ["name", "category_id"];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Thing {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default = "default_active")]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

fn default_active() -> bool {
    true
}

/// `name` reversed character by character.
pub fn reverse_name(source: &Map<String, Value>) -> Result<Value, CalculationError> {
    let name = source
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| CalculationError::MissingField("name".into()))?;
    Ok(Value::String(name.chars().rev().collect()))
}

/// `things` serializer; nests `category` when a category serializer is given.
pub fn thing_serializer(category: Option<Arc<Serializer>>) -> Result<Serializer, ConfigError> {
    let builder = Serializer::builder("things")
        .base_fields(["name", "created_at", "updated_at"])
        .renamed("the_name", "name")
        .calculated("reverseName", reverse_name);
    match category {
        Some(category) => builder.nested("category", "category", category),
        None => builder,
    }
    .build()
}

pub fn thing_create_rules() -> Vec<(String, ValidationRule)> {
    vec![
        ("name".into(), ValidationRule::string().required().min_length(3)),
        ("category_id".into(), ValidationRule::number().required()),
    ]
}

/// Whitelist and validate a create body, returning the accepted params.
pub fn validate_create(body: &Value) -> Result<Map<String, Value>, AppError> {
    let thing = body
        .as_object()
        .ok_or_else(|| AppError::validation(format!("expected valid 'thing' object, got {}", body)))?;
    let params = pick(thing, &THING_VALID_PARAMS);
    RequestValidator::validate(&params, &thing_create_rules())
}
