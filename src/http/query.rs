//! Query-string construction.
//!
//! The remote services parse query parameters with one fixed convention:
//! strings verbatim, other scalars via their plain string form, and objects or
//! arrays as JSON text. Missing values are left out entirely.

use serde_json::Value;

/// A single query value before encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryValue(Value);

impl QueryValue {
    /// The encoded form, or `None` if the value should be omitted.
    fn encode(&self) -> Option<String> {
        match &self.0 {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            compound @ (Value::Array(_) | Value::Object(_)) => Some(compound.to_string()),
        }
    }
}

impl From<Value> for QueryValue {
    fn from(v: Value) -> Self {
        QueryValue(v)
    }
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        QueryValue(Value::String(v.to_string()))
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        QueryValue(Value::String(v))
    }
}

impl From<&String> for QueryValue {
    fn from(v: &String) -> Self {
        QueryValue(Value::String(v.clone()))
    }
}

impl From<bool> for QueryValue {
    fn from(v: bool) -> Self {
        QueryValue(Value::Bool(v))
    }
}

impl From<i64> for QueryValue {
    fn from(v: i64) -> Self {
        QueryValue(Value::from(v))
    }
}

impl From<u64> for QueryValue {
    fn from(v: u64) -> Self {
        QueryValue(Value::from(v))
    }
}

impl From<i32> for QueryValue {
    fn from(v: i32) -> Self {
        QueryValue(Value::from(v))
    }
}

impl From<u32> for QueryValue {
    fn from(v: u32) -> Self {
        QueryValue(Value::from(v))
    }
}

impl From<f64> for QueryValue {
    fn from(v: f64) -> Self {
        QueryValue(Value::from(v))
    }
}

impl<T: Into<QueryValue>> From<Option<T>> for QueryValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(QueryValue(Value::Null))
    }
}

/// Ordered query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pairs: Vec<(String, QueryValue)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: &str, value: impl Into<QueryValue>) -> Self {
        self.pairs.push((key.to_string(), value.into()));
        self
    }

    /// Push only when `value` is a non-empty string.
    pub fn push_non_empty(self, key: &str, value: Option<&str>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => self.push(key, v),
            None => self,
        }
    }

    /// Form-urlencoded query string without the leading `?`.
    pub fn encode(&self) -> Result<String, serde_urlencoded::ser::Error> {
        let encoded: Vec<(&str, String)> = self
            .pairs
            .iter()
            .filter_map(|(k, v)| v.encode().map(|v| (k.as_str(), v)))
            .collect();
        serde_urlencoded::to_string(encoded)
    }

    /// `path` with the encoded query appended, if any.
    pub fn append_to(&self, path: &str) -> Result<String, serde_urlencoded::ser::Error> {
        let qs = self.encode()?;
        Ok(if qs.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, qs)
        })
    }
}
