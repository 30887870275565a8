//! Business Identifier Code (SWIFT code).

use super::{Value, compact_upper};
use crate::error::{ArgumentResult, ValidationError, ValidationResult};
use crate::registry::Constructor;
use crate::validator::Validator;
use serde_json::{Map, Value as JsonValue};
use std::sync::{Arc, OnceLock};

const CONTEXT: &str = "BIC";

/// Structure check for 8 and 11 character BICs.
///
/// Layout: 4-letter institution code, 2-letter country code, 2 alphanumeric
/// location characters and an optional 3 alphanumeric branch code.
#[derive(Debug, Clone, Copy, Default)]
pub struct BicValidator;

impl Validator<str> for BicValidator {
    fn validate<'a>(&self, value: &'a str) -> ValidationResult<&'a str> {
        let len = value.chars().count();
        if len != 8 && len != 11 {
            return Err(ValidationError::invalid_length(value, CONTEXT, "8 or 11", len));
        }
        for (index, b) in value.bytes().enumerate() {
            let ok = match index {
                0..=5 => b.is_ascii_uppercase(),
                _ => b.is_ascii_uppercase() || b.is_ascii_digit(),
            };
            if !ok {
                let part = if index < 4 {
                    "institution code"
                } else if index < 6 {
                    "country code"
                } else if index < 8 {
                    "location code"
                } else {
                    "branch code"
                };
                return Err(ValidationError::invalid_value(
                    value,
                    CONTEXT,
                    format!("invalid character '{}' in {}", char::from(b), part),
                ));
            }
        }
        Ok(value)
    }
}

fn validator() -> Arc<dyn Validator<str>> {
    static VALIDATOR: OnceLock<Arc<dyn Validator<str>>> = OnceLock::new();
    VALIDATOR.get_or_init(|| Arc::new(BicValidator)).clone()
}

/// A validated BIC in upper case without whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bic(Value<str>);

impl Bic {
    /// Validate a BIC. Whitespace is removed and letters are upper-cased.
    pub fn new(value: &str) -> ArgumentResult<Self> {
        Value::new(CONTEXT, compact_upper(value), validator()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.payload()
    }

    pub fn institution_code(&self) -> &str {
        &self.as_str()[..4]
    }

    pub fn country_code(&self) -> &str {
        &self.as_str()[4..6]
    }

    pub fn location_code(&self) -> &str {
        &self.as_str()[6..8]
    }

    /// Branch code, `None` for 8 character BICs.
    pub fn branch_code(&self) -> Option<&str> {
        self.as_str().get(8..11)
    }

    /// Whether this is a primary office code (no branch or branch `XXX`).
    pub fn is_primary_office(&self) -> bool {
        matches!(self.branch_code(), None | Some("XXX"))
    }

    fn parts(&self) -> Map<String, JsonValue> {
        let mut map = Map::new();
        map.insert("institutionCode".into(), self.institution_code().into());
        map.insert("countryCode".into(), self.country_code().into());
        map.insert("locationCode".into(), self.location_code().into());
        if let Some(branch) = self.branch_code() {
            map.insert("branchCode".into(), branch.into());
        }
        map
    }
}

impl AsRef<str> for Bic {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

crate::impl_value_type!(
    Bic,
    name: "BIC",
    constructors: [Constructor::text(Bic::of)],
    to_map: Bic::parts
);
