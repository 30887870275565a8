//! German tax identification number (Steuerliche Identifikationsnummer).

use super::Value;
use crate::checksum::Checksum;
use crate::error::{ArgumentResult, ValidationError, ValidationResult};
use crate::registry::Constructor;
use crate::validator::Validator;
use std::sync::{Arc, OnceLock};

const CONTEXT: &str = "TaxId";
const LENGTH: usize = 11;

/// Eleven digits, no leading zero, recursive product check digit.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaxIdValidator;

impl Validator<str> for TaxIdValidator {
    fn validate<'a>(&self, value: &'a str) -> ValidationResult<&'a str> {
        Checksum::RecursiveMod11 { length: LENGTH }
            .validate(value)
            .map_err(|e| e.with_context(CONTEXT))?;
        if value.starts_with('0') {
            return Err(ValidationError::invalid_value(
                value,
                CONTEXT,
                "must not start with 0",
            ));
        }
        Ok(value)
    }
}

fn validator() -> Arc<dyn Validator<str>> {
    static VALIDATOR: OnceLock<Arc<dyn Validator<str>>> = OnceLock::new();
    VALIDATOR.get_or_init(|| Arc::new(TaxIdValidator)).clone()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaxId(Value<str>);

impl TaxId {
    /// Validate a tax ID; blanks used as group separators are removed.
    pub fn new(value: &str) -> ArgumentResult<Self> {
        let digits: String = value.chars().filter(|c| !c.is_whitespace()).collect();
        Value::new(CONTEXT, digits, validator()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.payload()
    }
}

crate::impl_value_type!(
    TaxId,
    name: "TaxId",
    constructors: [Constructor::text(TaxId::of)]
);
