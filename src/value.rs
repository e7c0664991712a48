//! Value model: the two primitive kinds a message can carry.
//!
//! # Example
//!
//! ```
//! use tagwire::{Message, Value};
//!
//! let msg: Message = vec!["ID".into(), 10856.into()];
//! assert_eq!(msg[0].as_str(), Some("ID"));
//! assert_eq!(msg[1].as_integer(), Some(10856));
//! ```

use std::fmt;

use bytes::Bytes;

use crate::error::{Result, TagwireError};

/// A single message element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Signed integer; its decimal text must fit in 10 bytes to encode.
    Integer(i64),
    /// Raw text bytes, kept verbatim; at most 255 bytes to encode.
    Text(Bytes),
}

/// Ordered sequence of values encoded or decoded as a unit.
pub type Message = Vec<Value>;

impl Value {
    /// Build a text value from anything convertible to `Bytes`.
    pub fn text(data: impl Into<Bytes>) -> Self {
        Value::Text(data.into())
    }

    /// Integer payload, if this is an integer.
    #[inline]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Text(_) => None,
        }
    }

    /// Text bytes, if this is text.
    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Text(b) => Some(&b[..]),
            Value::Integer(_) => None,
        }
    }

    /// Text as `&str`, if this is text holding valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Convert to JSON. Invalid UTF-8 in text is replaced lossily.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Integer(i) => serde_json::Value::from(*i),
            Value::Text(b) => serde_json::Value::String(String::from_utf8_lossy(b).into_owned()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Text(b) => write!(f, "{:?}", String::from_utf8_lossy(b)),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(Bytes::copy_from_slice(v.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(Bytes::from(v))
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Text(Bytes::from(v))
    }
}

impl From<Bytes> for Value {
    fn from(v: Bytes) -> Self {
        Value::Text(v)
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Text(b) => match std::str::from_utf8(b) {
                Ok(s) => serializer.serialize_str(s),
                Err(_) => serializer.serialize_bytes(b),
            },
        }
    }
}

/// Name of a JSON value's kind, for diagnostics.
fn json_kind(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl TryFrom<&serde_json::Value> for Value {
    type Error = TagwireError;

    /// Accepts JSON integers and strings; every other kind is unsupported.
    fn try_from(v: &serde_json::Value) -> Result<Self> {
        match v {
            serde_json::Value::String(s) => Ok(Value::from(s.as_str())),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Value::Integer(i))
                } else if let Some(u) = n.as_u64() {
                    Err(TagwireError::NumberTooLong {
                        len: u.to_string().len(),
                    })
                } else {
                    Err(TagwireError::UnsupportedType(format!("float {}", n)))
                }
            }
            other => Err(TagwireError::UnsupportedType(json_kind(other).to_string())),
        }
    }
}

/// Convert a JSON array into a message.
///
/// `null` is treated as an empty message. Any non-array input, or any
/// element that is not an integer or string, fails with `UnsupportedType`.
pub fn message_from_json(json: &serde_json::Value) -> Result<Message> {
    match json {
        serde_json::Value::Null => Ok(Vec::new()),
        serde_json::Value::Array(items) => items.iter().map(Value::try_from).collect(),
        other => Err(TagwireError::UnsupportedType(format!(
            "expected array, got {}",
            json_kind(other)
        ))),
    }
}

/// Convert a message into a JSON array.
pub fn message_to_json(msg: &[Value]) -> serde_json::Value {
    serde_json::Value::Array(msg.iter().map(Value::to_json).collect())
}
