//! Loose input coercion.
//!
//! Request bodies carry numbers as JSON numbers, numeric strings or booleans,
//! either as named fields or as a positional `data` array. Values are coerced
//! to the integer/float/bool kind each estimator expects. Range checks do not
//! happen here; the estimators clamp, including infinities and NaN.

use serde_json::Value;
use thiserror::Error;

use crate::config::parse_bool;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    #[error("missing value for `{field}`")]
    Missing { field: &'static str },
    #[error("`{field}` expected {expected}, found {found}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("`{field}`: cannot convert '{value}' to {expected}")]
    Unparsable {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error("request body must be an object or a positional `data` array, found {found}")]
    Shape { found: &'static str },
    #[error("batch body must carry an `items` array, found {found}")]
    BatchShape { found: &'static str },
    #[error("item {index}: {source}")]
    Item {
        index: usize,
        #[source]
        source: Box<CoercionError>,
    },
}

/// One input of an operation: its position in the `data` array and the keys
/// it may appear under. The first key is the canonical name used in errors.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub position: usize,
    pub keys: &'static [&'static str],
}

impl Field {
    pub const fn new(position: usize, keys: &'static [&'static str]) -> Self {
        Self { position, keys }
    }

    pub fn name(&self) -> &'static str {
        self.keys.first().copied().unwrap_or("value")
    }
}

#[derive(Debug, Clone, Copy)]
enum Layout<'a> {
    Positional(&'a [Value]),
    Named(&'a serde_json::Map<String, Value>),
}

/// Borrowed view over a request body
#[derive(Debug, Clone, Copy)]
pub struct Args<'a> {
    layout: Layout<'a>,
}

impl<'a> Args<'a> {
    pub fn new(body: &'a Value) -> Result<Self, CoercionError> {
        let layout = match body {
            Value::Array(items) => Layout::Positional(items),
            Value::Object(map) => match map.get("data") {
                Some(Value::Array(items)) => Layout::Positional(items),
                _ => Layout::Named(map),
            },
            other => {
                return Err(CoercionError::Shape {
                    found: type_name(other),
                })
            }
        };
        Ok(Self { layout })
    }

    fn lookup(&self, field: &Field) -> Result<&'a Value, CoercionError> {
        let value = match self.layout {
            Layout::Positional(items) => items.get(field.position),
            Layout::Named(map) => field.keys.iter().find_map(|key| map.get(*key)),
        };
        match value {
            Some(Value::Null) | None => Err(CoercionError::Missing {
                field: field.name(),
            }),
            Some(value) => Ok(value),
        }
    }

    pub fn int(&self, field: &Field) -> Result<i64, CoercionError> {
        coerce_int(field.name(), self.lookup(field)?)
    }

    pub fn float(&self, field: &Field) -> Result<f64, CoercionError> {
        coerce_float(field.name(), self.lookup(field)?)
    }

    pub fn boolean(&self, field: &Field) -> Result<bool, CoercionError> {
        coerce_bool(field.name(), self.lookup(field)?)
    }
}

/// Integers pass through, floats truncate toward zero (saturating), strings
/// must hold an integer
pub fn coerce_int(field: &'static str, value: &Value) -> Result<i64, CoercionError> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            if n.as_u64().is_some() {
                return Ok(i64::MAX);
            }
            let f = number_as_f64(field, n)?;
            Ok(f.trunc() as i64)
        }
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| CoercionError::Unparsable {
            field,
            expected: "an integer",
            value: s.clone(),
        }),
        Value::Bool(b) => Ok(i64::from(*b)),
        other => Err(CoercionError::InvalidType {
            field,
            expected: "an integer",
            found: type_name(other),
        }),
    }
}

/// Overflowing or non-finite values (`"1e400"`, `"inf"`, `"NaN"`) pass through
/// unchanged for the estimators to clamp
pub fn coerce_float(field: &'static str, value: &Value) -> Result<f64, CoercionError> {
    match value {
        Value::Number(n) => number_as_f64(field, n),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| CoercionError::Unparsable {
            field,
            expected: "a number",
            value: s.clone(),
        }),
        Value::Bool(b) => Ok(f64::from(u8::from(*b))),
        other => Err(CoercionError::InvalidType {
            field,
            expected: "a number",
            found: type_name(other),
        }),
    }
}

fn number_as_f64(field: &'static str, n: &serde_json::Number) -> Result<f64, CoercionError> {
    n.as_f64().ok_or_else(|| CoercionError::Unparsable {
        field,
        expected: "a number",
        value: n.to_string(),
    })
}

pub fn coerce_bool(field: &'static str, value: &Value) -> Result<bool, CoercionError> {
    match value {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => Ok(n.as_f64().map(|f| f != 0.0).unwrap_or(false)),
        Value::String(s) => parse_bool(s).ok_or_else(|| CoercionError::Unparsable {
            field,
            expected: "a boolean",
            value: s.clone(),
        }),
        other => Err(CoercionError::InvalidType {
            field,
            expected: "a boolean",
            found: type_name(other),
        }),
    }
}

/// `{"items": [...]}` with each item in any single-request layout
pub fn batch_items(body: &Value) -> Result<&[Value], CoercionError> {
    match body.get("items") {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(CoercionError::BatchShape {
            found: type_name(other),
        }),
        None => Err(CoercionError::BatchShape {
            found: type_name(body),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
