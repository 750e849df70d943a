//! Response shaping: serialize resources, attach page data, write JSON bodies.

use crate::error::AppError;
use crate::serializer::Serializer;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Requested page, zero-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    pub page: u64,
    pub page_size: u64,
}

impl PageConfig {
    /// Read `page` (>= 0) and `pageSize` (>= 1) from query params. Missing or invalid values use defaults.
    pub fn from_query(params: &HashMap<String, String>, default_page_size: u32) -> Self {
        let page = params
            .get("page")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(0);
        let page_size = params
            .get("pageSize")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|n| *n >= 1)
            .unwrap_or_else(|| u64::from(default_page_size.max(1)));
        PageConfig { page, page_size }
    }
}

/// One page of results as returned by a data-access layer, with the unpaged total.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub total: u64,
}

impl<T: Serialize> Page<T> {
    pub fn into_json(self) -> Result<Page<Value>, AppError> {
        let results = self
            .results
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            results,
            total: self.total,
        })
    }
}

/// Serialize a resource for a response body.
pub fn with_response(serializer: &Serializer, resource: &Value) -> Value {
    let body = serializer.serialize(resource);
    tracing::debug!(collection = %serializer.collection_name(), body = %body, "serialized response");
    body
}

/// Serialize a page as `{ collection: [...], pageData: { total, page, pageSize } }`.
pub fn with_paged_response(serializer: &Serializer, page: &Page<Value>, config: &PageConfig) -> Value {
    let mut body = Map::with_capacity(2);
    body.insert(
        serializer.collection_name().to_string(),
        Value::Array(serializer.serialize_elements(&page.results)),
    );
    body.insert(
        "pageData".to_string(),
        serde_json::json!({
            "total": page.total,
            "page": config.page,
            "pageSize": config.page_size
        }),
    );
    let body = Value::Object(body);
    tracing::debug!(collection = %serializer.collection_name(), body = %body, "serialized paged response");
    body
}

/// Serialized body plus status, written as JSON.
#[derive(Debug)]
pub struct SerializedBody {
    pub status: StatusCode,
    pub body: Value,
}

impl IntoResponse for SerializedBody {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

pub fn ok(body: Value) -> SerializedBody {
    SerializedBody {
        status: StatusCode::OK,
        body,
    }
}

pub fn created(body: Value) -> SerializedBody {
    SerializedBody {
        status: StatusCode::CREATED,
        body,
    }
}
