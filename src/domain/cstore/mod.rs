//! Chain store domain: replicated key/value and hash storage.

pub mod client;
pub mod wire;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

// ─── ChainStoreValue ─────────────────────────────────────────────────────────

/// A value accepted by `set` / `hset`.
///
/// The store only keeps strings: strings are sent verbatim, other scalars in
/// their plain string form, objects and arrays as JSON text. Floats use the
/// shortest form without a trailing `.0` (`1.0` is sent as `"1"`).
#[derive(Debug, Clone, PartialEq)]
pub struct ChainStoreValue(Value);

impl ChainStoreValue {
    /// Wrap any serializable value.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self(serde_json::to_value(value)?))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    pub fn to_wire_string(&self) -> String {
        match &self.0 {
            Value::String(s) => s.clone(),
            Value::Number(n) if n.is_f64() => match n.as_f64() {
                Some(f) => float_string(f),
                None => n.to_string(),
            },
            other => other.to_string(),
        }
    }
}

impl From<Value> for ChainStoreValue {
    fn from(v: Value) -> Self {
        Self(v)
    }
}

impl From<&str> for ChainStoreValue {
    fn from(v: &str) -> Self {
        Self(Value::String(v.to_string()))
    }
}

impl From<String> for ChainStoreValue {
    fn from(v: String) -> Self {
        Self(Value::String(v))
    }
}

impl From<bool> for ChainStoreValue {
    fn from(v: bool) -> Self {
        Self(Value::Bool(v))
    }
}

impl From<i64> for ChainStoreValue {
    fn from(v: i64) -> Self {
        Self(Value::from(v))
    }
}

impl From<i32> for ChainStoreValue {
    fn from(v: i32) -> Self {
        Self(Value::from(v))
    }
}

impl From<u64> for ChainStoreValue {
    fn from(v: u64) -> Self {
        Self(Value::from(v))
    }
}

/// Non-finite floats have no JSON number form and are kept as their string form.
impl From<f64> for ChainStoreValue {
    fn from(v: f64) -> Self {
        match serde_json::Number::from_f64(v) {
            Some(n) => Self(Value::Number(n)),
            None => Self(Value::String(float_string(v))),
        }
    }
}

/// Float formatting the store expects: `NaN`, `Infinity`, exponent form
/// outside `[1e-6, 1e21)`, no trailing `.0`, no negative zero.
fn float_string(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }
    let abs = v.abs();
    if (1e-6..1e21).contains(&abs) {
        return v.to_string();
    }
    let exp = format!("{:e}", v);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

// ─── Requests ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct SetValueRequest {
    pub key: String,
    pub value: ChainStoreValue,
}

impl SetValueRequest {
    pub fn new(key: impl Into<String>, value: impl Into<ChainStoreValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetValueRequest {
    pub key: String,
}

impl GetValueRequest {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HSetRequest {
    pub hkey: String,
    pub key: String,
    pub value: ChainStoreValue,
}

impl HSetRequest {
    pub fn new(
        hkey: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<ChainStoreValue>,
    ) -> Self {
        Self {
            hkey: hkey.into(),
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HGetRequest {
    pub hkey: String,
    pub key: String,
}

impl HGetRequest {
    pub fn new(hkey: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            hkey: hkey.into(),
            key: key.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HGetAllRequest {
    pub hkey: String,
}

impl HGetAllRequest {
    pub fn new(hkey: impl Into<String>) -> Self {
        Self { hkey: hkey.into() }
    }
}

// ─── Results ─────────────────────────────────────────────────────────────────

/// Result of `GET /get_status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CStoreStatus {
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// All fields of one hash.
pub type HashValues = HashMap<String, String>;
