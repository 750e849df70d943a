//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("serializer needs a collection name")]
    MissingCollectionName,
    #[error("duplicate serializer id: {0}")]
    DuplicateId(String),
    #[error("unsupported descriptor kind '{kind}' for attribute '{key}'")]
    UnsupportedDescriptor { key: String, kind: String },
    #[error("attribute '{key}' is missing required field '{field}'")]
    MissingField { key: String, field: &'static str },
    #[error("missing reference: {kind} id '{id}'")]
    MissingReference { kind: &'static str, id: String },
    #[error("cyclic nested reference through serializer '{0}'")]
    CyclicReference(String),
    #[error("config load: {0}")]
    Load(String),
}

/// Failure of a calculated attribute. Swallowed by the serializer, which emits `null` instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    #[error("missing or mistyped field '{0}'")]
    MissingField(String),
    #[error("{0}")]
    Failed(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("validation: {details}")]
    Validation { details: String },
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },
    #[error("unauthorized")]
    Unauthorized,
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    pub fn validation(details: impl Into<String>) -> Self {
        AppError::Validation {
            details: details.into(),
        }
    }

    /// Status and code for errors a client is expected to see. `None` means the error is internal.
    pub fn expected_status(&self) -> Option<(StatusCode, &'static str)> {
        match self {
            AppError::BadRequest(_) => Some((StatusCode::BAD_REQUEST, "bad_request")),
            AppError::Validation { .. } => Some((StatusCode::BAD_REQUEST, "validation_error")),
            AppError::NotFound { .. } => Some((StatusCode::NOT_FOUND, "not_found")),
            AppError::Unauthorized => Some((StatusCode::UNAUTHORIZED, "unauthorized")),
            AppError::Config(_) | AppError::Serialization(_) => None,
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::Validation { details } => Some(serde_json::Value::String(details.clone())),
            AppError::NotFound { id, .. } => Some(serde_json::json!({ "id": id })),
            _ => None,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        let (status, error) = match self.expected_status() {
            Some((status, code)) => (
                status,
                ErrorDetail {
                    code: code.to_string(),
                    message: self.to_string(),
                    details: self.details(),
                },
            ),
            None => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "internal_error".to_string(),
                    message: "Internal Server Error".to_string(),
                    details: None,
                },
            ),
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}
