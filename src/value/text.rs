//! Always-valid generic text.

use super::Value;
use crate::error::ArgumentResult;
use crate::registry::Constructor;
use crate::validator::NullValidator;
use std::sync::Arc;

/// Free-form text accepted as-is.
///
/// The registry falls back to this type when a requested name matches no
/// registered type closely enough.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Text(Value<str>);

impl Text {
    pub fn new(value: &str) -> ArgumentResult<Self> {
        Value::new("Text", value.to_string(), Arc::new(NullValidator)).map(Self)
    }

    /// Text rendering of an integer argument.
    pub fn from_number(value: i64) -> ArgumentResult<Self> {
        Self::new(&value.to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.payload()
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

crate::impl_value_type!(
    Text,
    name: "Text",
    constructors: [
        Constructor::text(Text::of),
        Constructor::integer(|n| Text::from_number(n).map(Arc::new)),
    ]
);
