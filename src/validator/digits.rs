//! Numeral validation for text payloads.

use super::Validator;
use crate::error::{ValidationError, ValidationResult};

/// Accepts non-empty text made of ASCII digits only.
///
/// Separators are never stripped here; normalizing input is the job of the
/// value type that owns the format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitsValidator {
    context: String,
}

impl DigitsValidator {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
        }
    }
}

impl Validator<str> for DigitsValidator {
    fn validate<'a>(&self, value: &'a str) -> ValidationResult<&'a str> {
        check_digits(value, &self.context)?;
        Ok(value)
    }
}

/// Fail with `InvalidValue` naming the first non-digit character.
pub(crate) fn check_digits(value: &str, context: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::invalid_value(value, context, "must not be empty"));
    }
    match value.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        Some((position, c)) => Err(ValidationError::invalid_value(
            value,
            context,
            format!("non-digit character '{}' at position {}", c, position),
        )),
        None => Ok(()),
    }
}
