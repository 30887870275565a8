//! VAT identification number.

use super::{Value, compact_upper};
use crate::checksum::Checksum;
use crate::error::{ArgumentResult, ValidationError, ValidationResult};
use crate::registry::Constructor;
use crate::validator::digits::check_digits;
use crate::validator::{LengthValidator, Validator};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

const CONTEXT: &str = "VatId";

/// Numeric body rule for one country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CountryRule {
    body_length: usize,
    checksum: Checksum,
}

/// Country prefix plus country specific body validation.
///
/// Countries without a rule accept 2 to 12 upper-case alphanumerics after
/// the prefix and are not checksum verified.
#[derive(Debug, Clone)]
pub struct VatIdValidator {
    rules: HashMap<String, CountryRule>,
    fallback: LengthValidator,
}

impl VatIdValidator {
    /// Validator with the built-in country rules.
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
            fallback: LengthValidator::new(CONTEXT, 2, 12),
        }
        .with_country("DE", 9, Checksum::RecursiveMod11 { length: 9 })
    }

    /// Add or replace the rule for `country`: a numeric body of exactly
    /// `body_length` digits verified with `checksum`.
    pub fn with_country(mut self, country: &str, body_length: usize, checksum: Checksum) -> Self {
        self.rules.insert(
            country.to_ascii_uppercase(),
            CountryRule {
                body_length,
                checksum,
            },
        );
        self
    }

    /// Whether `country` has a dedicated rule.
    pub fn has_rule(&self, country: &str) -> bool {
        self.rules.contains_key(country)
    }

    fn validate_body(&self, value: &str, country: &str, body: &str) -> ValidationResult<()> {
        match self.rules.get(country) {
            Some(rule) => {
                let len = body.chars().count();
                if len != rule.body_length {
                    return Err(ValidationError::invalid_length(
                        value,
                        CONTEXT,
                        (rule.body_length + 2).to_string(),
                        len + 2,
                    ));
                }
                check_digits(body, CONTEXT)?;
                rule.checksum.validate(body)?;
            }
            None => {
                self.fallback.validate(body)?;
                if let Some(c) = body
                    .chars()
                    .find(|c| !(c.is_ascii_uppercase() || c.is_ascii_digit()))
                {
                    return Err(ValidationError::invalid_value(
                        value,
                        CONTEXT,
                        format!("invalid character '{}'", c),
                    ));
                }
                Checksum::Noop.validate(body)?;
            }
        }
        Ok(())
    }
}

impl Default for VatIdValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator<str> for VatIdValidator {
    fn validate<'a>(&self, value: &'a str) -> ValidationResult<&'a str> {
        let country = value.get(..2).unwrap_or(value);
        if country.len() != 2 || !country.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(ValidationError::invalid_value(
                value,
                CONTEXT,
                "must start with a two-letter country code",
            ));
        }
        self.validate_body(value, country, &value[2..])
            .map_err(|e| e.with_value(value).with_context(CONTEXT))?;
        Ok(value)
    }
}

fn validator() -> Arc<dyn Validator<str>> {
    static VALIDATOR: OnceLock<Arc<dyn Validator<str>>> = OnceLock::new();
    VALIDATOR.get_or_init(|| Arc::new(VatIdValidator::new())).clone()
}

/// A validated VAT identification number, e.g. `DE136695976`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VatId(Value<str>);

impl VatId {
    pub fn new(value: &str) -> ArgumentResult<Self> {
        Value::new(CONTEXT, compact_upper(value), validator()).map(Self)
    }

    /// Validate against custom country rules.
    pub fn with_validator(value: &str, validator: Arc<VatIdValidator>) -> ArgumentResult<Self> {
        Value::new(CONTEXT, compact_upper(value), validator).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.payload()
    }

    pub fn country_code(&self) -> &str {
        &self.as_str()[..2]
    }

    pub fn body(&self) -> &str {
        &self.as_str()[2..]
    }

    fn parts(&self) -> Map<String, JsonValue> {
        let mut map = Map::new();
        map.insert("countryCode".into(), self.country_code().into());
        map.insert("body".into(), self.body().into());
        map
    }
}

crate::impl_value_type!(
    VatId,
    name: "VatId",
    constructors: [Constructor::text(VatId::of)],
    to_map: VatId::parts
);
