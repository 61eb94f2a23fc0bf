//! Values stored against keys.
//!
//! A [`Value`] is either an integer or a piece of text. Command arguments
//! and snapshot entries are turned into values by the same literal rule:
//! anything that reads as a base-10 signed 64-bit integer is an
//! [`Value::Integer`], everything else is kept verbatim as [`Value::Text`].

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// A value held in a [`Store`](crate::Store).
///
/// Equality is structural, so `Integer(5)` never equals `Text("5")`.
/// Deserializing applies the same coercion as [`Value::from_json`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A signed 64-bit integer.
    Integer(i64),
    /// Arbitrary text.
    Text(String),
}

impl Value {
    /// Parses a literal token into a value.
    ///
    /// # Example
    ///
    /// ```
    /// use transact::Value;
    ///
    /// assert_eq!(Value::parse("-42"), Value::Integer(-42));
    /// assert_eq!(Value::parse("hello"), Value::Text("hello".to_string()));
    /// ```
    pub fn parse(literal: &str) -> Self {
        match literal.parse::<i64>() {
            Ok(n) => Value::Integer(n),
            Err(_) => Value::Text(literal.to_string()),
        }
    }

    /// Converts a decoded JSON scalar back into a value.
    ///
    /// Strings go through [`Value::parse`], so a snapshot written by hand
    /// with `"7"` loads as an integer. Integral numbers (including floats
    /// such as `3.0`) become integers when they fit in `i64`; any other
    /// number is kept as text. Booleans become text. Returns `None` for
    /// null, arrays and objects.
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::String(s) => Some(Value::parse(s)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Some(Value::Integer(i));
                }
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                        Some(Value::Integer(f as i64))
                    }
                    _ => Some(Value::Text(n.to_string())),
                }
            }
            serde_json::Value::Bool(b) => Some(Value::Text(b.to_string())),
            serde_json::Value::Null
            | serde_json::Value::Array(_)
            | serde_json::Value::Object(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = serde_json::Value::deserialize(deserializer)?;
        Value::from_json(&json)
            .ok_or_else(|| de::Error::custom(format!("expected a scalar value, got {}", json)))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "(integer) {}", n),
            Value::Text(s) => write!(f, "(string) {}", s),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}
