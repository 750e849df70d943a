//! Request body validation from per-field rules.

use crate::error::AppError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Number,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub kind: Option<ValueKind>,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub minimum: Option<f64>,
}

impl ValidationRule {
    pub fn string() -> Self {
        ValidationRule {
            kind: Some(ValueKind::String),
            ..Default::default()
        }
    }

    pub fn number() -> Self {
        ValidationRule {
            kind: Some(ValueKind::Number),
            ..Default::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }
}

pub struct RequestValidator;

impl RequestValidator {
    /// Validate body against rules in order; the first failing field is reported.
    /// Returns the body with numeric strings converted for `number` fields.
    pub fn validate(body: &Map<String, Value>, rules: &[(String, ValidationRule)]) -> Result<Map<String, Value>, AppError> {
        let mut out = body.clone();
        for (col, rule) in rules {
            let val = body.get(col);
            if rule.required && val.map_or(true, Value::is_null) {
                return Err(AppError::validation(format!("{} is required", col)));
            }
            if let Some(v) = val {
                let converted = validate_field(col, v, rule)?;
                out.insert(col.clone(), converted);
            }
        }
        Ok(out)
    }
}

/// Parse a numeric string the way `number` fields accept it: integers stay integers.
fn number_from_str(s: &str) -> Option<Value> {
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Some(Value::Number(n.into()));
    }
    s.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}

fn validate_field(col: &str, v: &Value, rule: &ValidationRule) -> Result<Value, AppError> {
    if v.is_null() {
        return Ok(Value::Null);
    }
    let v = match rule.kind {
        Some(ValueKind::String) if !v.is_string() => {
            return Err(AppError::validation(format!("{} must be a string", col)));
        }
        Some(ValueKind::Number) if !v.is_number() => v
            .as_str()
            .and_then(number_from_str)
            .ok_or_else(|| AppError::validation(format!("{} must be a number", col)))?,
        _ => v.clone(),
    };
    if let Some(s) = v.as_str() {
        let len = s.chars().count();
        if let Some(min) = rule.min_length {
            if len < min {
                return Err(AppError::validation(format!(
                    "{} must be at least {} characters",
                    col, min
                )));
            }
        }
        if let Some(max) = rule.max_length {
            if len > max {
                return Err(AppError::validation(format!(
                    "{} must be at most {} characters",
                    col, max
                )));
            }
        }
        if let Some(ref pattern) = rule.pattern {
            let re = Regex::new(pattern).map_err(|_| AppError::validation(format!("invalid pattern for {}", col)))?;
            if !re.is_match(s) {
                return Err(AppError::validation(format!("{} does not match required pattern", col)));
            }
        }
    }
    if let (Some(min), Some(n)) = (rule.minimum, v.as_f64()) {
        if n < min {
            return Err(AppError::validation(format!("{} must be at least {}", col, min)));
        }
    }
    Ok(v)
}

/// Keep only the listed keys that are present in `object`.
pub fn pick(object: &Map<String, Value>, keys: &[&str]) -> Map<String, Value> {
    keys.iter()
        .filter_map(|k| object.get(*k).map(|v| (k.to_string(), v.clone())))
        .collect()
}
