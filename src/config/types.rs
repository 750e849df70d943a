//! Raw serializer definitions as they appear in JSON config files.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SerializerConfig {
    pub id: String,
    #[serde(default)]
    pub collection_name: Option<String>,
    #[serde(default)]
    pub base_fields: Vec<String>,
    #[serde(default)]
    pub meta: Vec<AttributeConfig>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AttributeConfig {
    /// Output key.
    pub key: String,
    /// One of `renamed`, `calculated`, `nested`.
    pub kind: String,
    /// Source key for `renamed` and `nested`.
    #[serde(default)]
    pub source: Option<String>,
    /// Registered function name for `calculated`.
    #[serde(default)]
    pub function: Option<String>,
    /// Serializer id for `nested`.
    #[serde(default)]
    pub serializer: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    Renamed,
    Calculated,
    Nested,
}

impl AttributeConfig {
    pub fn attribute_kind(&self) -> Result<AttributeKind, ConfigError> {
        match self.kind.as_str() {
            "renamed" => Ok(AttributeKind::Renamed),
            "calculated" => Ok(AttributeKind::Calculated),
            "nested" => Ok(AttributeKind::Nested),
            other => Err(ConfigError::UnsupportedDescriptor {
                key: self.key.clone(),
                kind: other.to_string(),
            }),
        }
    }

    pub fn required_source(&self) -> Result<&str, ConfigError> {
        self.source.as_deref().ok_or_else(|| ConfigError::MissingField {
            key: self.key.clone(),
            field: "source",
        })
    }

    pub fn required_function(&self) -> Result<&str, ConfigError> {
        self.function.as_deref().ok_or_else(|| ConfigError::MissingField {
            key: self.key.clone(),
            field: "function",
        })
    }

    pub fn required_serializer(&self) -> Result<&str, ConfigError> {
        self.serializer.as_deref().ok_or_else(|| ConfigError::MissingField {
            key: self.key.clone(),
            field: "serializer",
        })
    }
}
