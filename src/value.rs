//! Dynamic input values and the ordered attribute bag handed in by templates
//!
//! Templating hosts pass loosely typed data. [`Value`] is the closed set of
//! shapes this crate accepts; anything that needs a stricter type (icon names,
//! variants, sizes) is normalized from a `Value` at the resolver boundary.

use indexmap::IndexMap;

use crate::error::IconError;

/// A loosely typed input value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    /// Symbol-like identifier, e.g. `:solid` in a Ruby-ish template
    Symbol(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Value>),
    Map(Vec<(String, Value)>),
    Null,
}

impl Value {
    /// Short type name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Bool(_) => "boolean",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Null => "null",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Normalize an identifier (icon name or variant) to its string form
    ///
    /// Only strings and symbols are accepted.
    pub fn to_identifier(&self, what: &'static str) -> Result<String, IconError> {
        match self {
            Value::Str(s) | Value::Symbol(s) => Ok(s.clone()),
            other => Err(IconError::InvalidIdentifier {
                what,
                found: other.kind().to_string(),
            }),
        }
    }

    /// Coerce to an integer the way a size option is read
    ///
    /// Strings use their leading integer (`"32px"` is 32); anything
    /// non-numeric coerces to zero.
    pub fn to_int(&self) -> i64 {
        match self {
            Value::Int(n) => *n,
            Value::Float(f) => f.trunc() as i64,
            Value::Str(s) | Value::Symbol(s) => leading_int(s),
            _ => 0,
        }
    }

    /// Text emitted for this value as an attribute, `None` for null
    pub fn to_attribute(&self) -> Option<String> {
        match self {
            Value::Str(s) | Value::Symbol(s) => Some(s.clone()),
            Value::Int(n) => Some(n.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::List(items) => Some(
                items
                    .iter()
                    .filter_map(Value::to_attribute)
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join(" "),
            ),
            Value::Map(_) | Value::Null => None,
        }
    }

    /// Truthiness of a flag option such as `unsafe`
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Bool(false))
    }
}

fn leading_int(text: &str) -> i64 {
    let text = text.trim_start();
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(0.0)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

/// Normalize an attribute key
///
/// Symbol-style `aria_*` and `data_*` keys become hyphenated so `aria_label`
/// and `aria-label` name the same attribute. Other keys are kept verbatim.
pub fn normalize_key(key: &str) -> String {
    if key.starts_with("aria_") || key.starts_with("data_") {
        key.replace('_', "-")
    } else {
        key.to_string()
    }
}

/// Ordered attribute bag supplied by the caller
///
/// Insertion order is preserved and is the order pass-through attributes are
/// emitted in. Keys are normalized on insert; setting a key twice keeps its
/// first position and the latest value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    entries: IndexMap<String, Value>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.entries.insert(normalize_key(key), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(&normalize_key(key))
    }

    /// Value for `key` unless it is missing or null
    pub fn present(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|v| !v.is_null())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Entries with null values dropped
    pub fn present_entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.iter().filter(|(_, v)| !v.is_null())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build options from a map-shaped value
    pub fn from_value(value: &Value) -> Result<Self, IconError> {
        match value {
            Value::Map(entries) => Ok(entries
                .iter()
                .fold(Options::new(), |opts, (k, v)| opts.with(k, v.clone()))),
            Value::Null => Ok(Options::new()),
            other => Err(IconError::InvalidIdentifier {
                what: "options",
                found: other.kind().to_string(),
            }),
        }
    }
}

impl<K: AsRef<str>, V: Into<Value>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Options::new();
        for (k, v) in iter {
            options.insert(k.as_ref(), v);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identifier_accepts_string_and_symbol() {
        assert_eq!(Value::from("x").to_identifier("name"), Ok("x".to_string()));
        assert_eq!(
            Value::Symbol("solid".into()).to_identifier("variant"),
            Ok("solid".to_string())
        );
    }

    #[test]
    fn test_identifier_rejects_numbers_and_collections() {
        for value in [Value::Int(3), Value::List(vec![]), Value::Map(vec![]), Value::Null] {
            let err = value.to_identifier("name").unwrap_err();
            assert!(matches!(err, IconError::InvalidIdentifier { what: "name", .. }));
        }
    }

    #[test]
    fn test_to_int_coercion() {
        assert_eq!(Value::from(32).to_int(), 32);
        assert_eq!(Value::from("32").to_int(), 32);
        assert_eq!(Value::from("32px").to_int(), 32);
        assert_eq!(Value::from(" -4").to_int(), -4);
        assert_eq!(Value::from("large").to_int(), 0);
        assert_eq!(Value::from(12.9).to_int(), 12);
        assert_eq!(Value::Bool(true).to_int(), 0);
    }

    #[test]
    fn test_list_attribute_is_space_joined() {
        let value = Value::from(vec!["a", "", "b"]);
        assert_eq!(value.to_attribute(), Some("a b".to_string()));
    }

    #[test]
    fn test_normalize_key_hyphenates_aria_and_data() {
        assert_eq!(normalize_key("aria_label"), "aria-label");
        assert_eq!(normalize_key("data_controller"), "data-controller");
        assert_eq!(normalize_key("stroke_width"), "stroke_width");
    }

    #[test]
    fn test_options_keep_first_position_on_overwrite() {
        let opts = Options::new().with("a", 1).with("b", 2).with("a", 3);
        let keys: Vec<_> = opts.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(opts.get("a"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_present_skips_null() {
        let opts = Options::new().with("class", Value::Null).with("id", "x");
        assert!(opts.present("class").is_none());
        assert_eq!(opts.present_entries().count(), 1);
    }

    #[test]
    fn test_from_json_value() {
        let json = serde_json::json!({"height": 32, "aria_label": "Close", "title": null});
        let opts = Options::from_value(&Value::from(json)).unwrap();
        assert_eq!(opts.get("height"), Some(&Value::Int(32)));
        assert_eq!(opts.get("aria-label"), Some(&Value::from("Close")));
        assert_eq!(opts.get("title"), Some(&Value::Null));
    }

    #[test]
    fn test_from_value_rejects_scalars() {
        assert!(Options::from_value(&Value::Int(1)).is_err());
    }
}
