//! Open parameter record supplied by the caller.
//!
//! Parameters arrive as a loosely-typed JSON document: numbers may be
//! encoded as strings, fields may be missing or spelled under several
//! aliases. This type stores the document as-is; engines read only the
//! fields they understand through the [`normalize`](crate::normalize) layer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied key → value mapping with no fixed schema.
///
/// The wrapped document is usually a JSON object. Any other JSON value is
/// accepted at construction time; engines reject it at evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationParameters {
    raw: Value,
}

impl SimulationParameters {
    /// Creates an empty parameter object.
    pub fn new() -> Self {
        Self {
            raw: Value::Object(Map::new()),
        }
    }

    /// Wraps an arbitrary JSON document.
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// Sets a field. Replaces a non-object document with a fresh object.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if !self.raw.is_object() {
            self.raw = Value::Object(Map::new());
        }
        if let Value::Object(map) = &mut self.raw {
            map.insert(key.into(), value.into());
        }
        self
    }

    /// The underlying object, if the document is one.
    pub fn as_object(&self) -> Option<&Map<String, Value>> {
        self.raw.as_object()
    }

    /// The underlying document.
    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    /// Whether the document is a JSON object.
    pub fn is_object(&self) -> bool {
        self.raw.is_object()
    }

    /// JSON type name of the document (`"object"`, `"array"`, ...).
    pub fn kind(&self) -> &'static str {
        match &self.raw {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    /// Raw field lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Looks up a field and coerces it to a finite number.
    ///
    /// Returns `None` for missing fields, non-numeric strings, nulls,
    /// arrays, objects and non-finite values.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(coerce_number)
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Value> for SimulationParameters {
    fn from(raw: Value) -> Self {
        Self::from_value(raw)
    }
}

/// Coerces a JSON value to a finite `f64`.
///
/// - numbers: as-is
/// - strings: trimmed and parsed; the empty string is `0`
/// - booleans: `1` / `0`
pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().ok()?
            }
        }
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    n.is_finite().then_some(n)
}
