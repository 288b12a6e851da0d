//! Core type definitions for comment-query

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Query arguments forwarded to the host's comment query engine
pub type QueryArgs = Map<String, Value>;

/// Ordered key/value parameters backing every accessor object
///
/// Keys keep their insertion order. Values stay native-typed so that strict
/// comparisons (see [`crate::comment::QueriedComment::is_approved`]) can tell
/// the integer `1` apart from the string `"1"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamsBag {
    data: Map<String, Value>,
}

impl ParamsBag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bag from an existing mapping
    pub fn from_map(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Get a value by key, or the given default when the key is absent
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.data.get(key).unwrap_or(default)
    }

    /// Get a typed value by key
    pub fn get_as<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.data
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Get a value rendered as text, `""` when absent
    pub fn get_text(&self, key: &str) -> String {
        self.data.get(key).map(value_to_text).unwrap_or_default()
    }

    /// Get a value cast to a non-negative integer, `0` when absent
    pub fn get_id(&self, key: &str) -> u64 {
        self.data.get(key).map(value_to_id).unwrap_or(0)
    }

    /// Set a value by key
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    /// Check if a key is present
    pub fn has(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Remove a value by key
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    /// Iterate over the keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    /// Number of stored parameters
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the bag is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the whole mapping
    pub fn all(&self) -> &Map<String, Value> {
        &self.data
    }
}

impl From<Map<String, Value>> for ParamsBag {
    fn from(data: Map<String, Value>) -> Self {
        Self::from_map(data)
    }
}

/// Cast a value to an integer the way the host CMS casts record fields.
///
/// Numeric strings are read from their leading numeric prefix
/// (`"42abc"` is 42, `"abc"` is 0), booleans become 0/1 and null becomes 0.
pub fn value_to_int(value: &Value) -> i64 {
    match value {
        Value::Null => 0,
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => leading_int(s),
        Value::Array(items) => i64::from(!items.is_empty()),
        Value::Object(_) => 1,
    }
}

/// Cast a value to a record identifier; negative values collapse to 0
pub fn value_to_id(value: &Value) -> u64 {
    match value {
        Value::Number(n) if n.is_u64() => n.as_u64().unwrap_or(0),
        other => u64::try_from(value_to_int(other)).unwrap_or(0),
    }
}

/// Render a value as text: strings as-is, numbers in decimal form,
/// `true` as `"1"`, `false` and null as `""`
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        compound => compound.to_string(),
    }
}

/// Check whether a value counts as "empty" for the host CMS.
///
/// Null, `false`, zero, `""`, `"0"`, and empty arrays/objects are all empty.
/// Meta lookups use this to decide when to hand back the caller's default,
/// which makes a stored `""` indistinguishable from a missing key.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map(|f| f == 0.0).unwrap_or(false),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Same emptiness rule applied to a plain string
pub fn is_empty_str(s: &str) -> bool {
    s.is_empty() || s == "0"
}

fn leading_int(s: &str) -> i64 {
    let trimmed = s.trim_start();

    if let Ok(n) = trimmed.trim_end().parse::<i64>() {
        return n;
    }
    if let Ok(f) = trimmed.trim_end().parse::<f64>() {
        if f.is_finite() {
            return f as i64;
        }
    }

    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return 0;
    }

    // Overflowing prefixes saturate like the host's cast does
    trimmed[..end].parse::<i64>().unwrap_or_else(|_| {
        if trimmed.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}
