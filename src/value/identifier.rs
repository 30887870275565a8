//! 128-bit identifier backed by `uuid::Uuid`.

use super::Value;
use crate::codec;
use crate::error::{ArgumentResult, InvalidArgument, ValidationError};
use crate::registry::Constructor;
use crate::validator::NullValidator;
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;
use uuid::Uuid;

/// A 128-bit identifier. Renders in canonical `8-4-4-4-12` form.
///
/// Every bit pattern is a valid identifier; only the text and byte forms are
/// checked on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(Value<Uuid>);

impl Identifier {
    /// Parse the canonical or the 22 character compact form.
    pub fn new(value: &str) -> ArgumentResult<Self> {
        let trimmed = value.trim();
        let bytes = if trimmed.len() == codec::COMPACT_LENGTH {
            codec::from_compact_string(trimmed)
        } else {
            codec::from_canonical_string(trimmed)
        }
        .map_err(|e| InvalidArgument::from(e.with_value(value)))?;
        Ok(Self::from_array(bytes))
    }

    /// Build from exactly 16 raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> ArgumentResult<Self> {
        let array = <[u8; 16]>::try_from(bytes).map_err(|_| {
            ValidationError::invalid_length(
                format!("{:02x?}", bytes),
                codec::CONTEXT,
                "16",
                bytes.len(),
            )
        })?;
        Ok(Self::from_array(array))
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(Value::unchecked(uuid))
    }

    /// Inverse of [`Self::to_signed_integer`].
    pub fn from_integer(value: i128) -> Self {
        Self::from_array(codec::from_integer(value))
    }

    /// Fresh random (version 4) identifier.
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    fn from_array(bytes: [u8; 16]) -> Self {
        Self::from_uuid(Uuid::from_bytes(bytes))
    }

    pub fn as_uuid(&self) -> &Uuid {
        self.0.payload()
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.as_uuid().as_bytes()
    }

    pub fn to_compact_string(&self) -> String {
        codec::to_compact_string(self.as_bytes())
    }

    pub fn to_signed_integer(&self) -> i128 {
        codec::to_signed_integer(self.as_bytes())
    }

    fn parts(&self) -> Map<String, JsonValue> {
        let mut map = Map::new();
        map.insert("canonical".into(), self.to_string().into());
        map.insert("compact".into(), self.to_compact_string().into());
        map.insert("version".into(), self.as_uuid().get_version_num().into());
        map
    }
}

impl From<Uuid> for Identifier {
    fn from(uuid: Uuid) -> Self {
        Self::from_uuid(uuid)
    }
}

crate::impl_value_type!(
    Identifier,
    name: "UUID",
    constructors: [
        Constructor::text(Identifier::of),
        Constructor::bytes(|bytes| Identifier::from_bytes(bytes).map(Arc::new)),
        Constructor::uuid(|uuid| Ok(Arc::new(Identifier::from_uuid(uuid)))),
    ],
    to_map: Identifier::parts
);
