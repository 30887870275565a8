//! Loosely typed constructor arguments.

use crate::error::{ValidationError, ValidationResult};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

/// Runtime kind of a constructor argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgKind {
    Text,
    Integer,
    Bytes,
    Uuid,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "Text",
            Self::Integer => "Integer",
            Self::Bytes => "Bytes",
            Self::Uuid => "Uuid",
        };
        f.write_str(name)
    }
}

/// An owned constructor argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Text(String),
    Integer(i64),
    Bytes(Vec<u8>),
    Uuid(Uuid),
}

impl Arg {
    pub fn kind(&self) -> ArgKind {
        match self {
            Self::Text(_) => ArgKind::Text,
            Self::Integer(_) => ArgKind::Integer,
            Self::Bytes(_) => ArgKind::Bytes,
            Self::Uuid(_) => ArgKind::Uuid,
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Bytes(bytes) => bytes.iter().try_for_each(|b| write!(f, "{:02x}", b)),
            Self::Uuid(u) => write!(f, "{}", u),
        }
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for Arg {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<Vec<u8>> for Arg {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<&[u8]> for Arg {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<Uuid> for Arg {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

/// Strings and integers map directly; arrays of bytes become [`Arg::Bytes`].
impl TryFrom<JsonValue> for Arg {
    type Error = ValidationError;

    fn try_from(value: JsonValue) -> ValidationResult<Self> {
        match value {
            JsonValue::String(s) => Ok(Self::Text(s)),
            JsonValue::Number(ref n) => n.as_i64().map(Self::Integer).ok_or_else(|| {
                ValidationError::invalid_value(value.to_string(), "argument", "not a 64-bit integer")
            }),
            JsonValue::Array(ref items) => items
                .iter()
                .map(|item| {
                    item.as_u64()
                        .and_then(|n| u8::try_from(n).ok())
                        .ok_or_else(|| {
                            ValidationError::invalid_value(
                                value.to_string(),
                                "argument",
                                "byte arrays must hold integers 0..=255",
                            )
                        })
                })
                .collect::<ValidationResult<Vec<u8>>>()
                .map(Self::Bytes),
            other => Err(ValidationError::invalid_value(
                other.to_string(),
                "argument",
                "unsupported JSON argument",
            )),
        }
    }
}

/// Comma separated kinds, as shown in constructor mismatch errors.
pub fn signature(kinds: impl IntoIterator<Item = ArgKind>) -> String {
    kinds
        .into_iter()
        .map(|kind| kind.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
