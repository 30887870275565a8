//! Character-count validation for text payloads.

use super::Validator;
use crate::error::{ValidationError, ValidationResult};

/// Accepts text whose character count lies within `min..=max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthValidator {
    context: String,
    min: usize,
    max: usize,
}

impl LengthValidator {
    /// Create a validator for an inclusive length range.
    pub fn new(context: impl Into<String>, min: usize, max: usize) -> Self {
        Self {
            context: context.into(),
            min,
            max,
        }
    }

    /// Create a validator for one exact length.
    pub fn exactly(context: impl Into<String>, length: usize) -> Self {
        Self::new(context, length, length)
    }

    fn expected(&self) -> String {
        if self.min == self.max {
            self.min.to_string()
        } else {
            format!("{}..={}", self.min, self.max)
        }
    }
}

impl Validator<str> for LengthValidator {
    fn validate<'a>(&self, value: &'a str) -> ValidationResult<&'a str> {
        let length = value.chars().count();
        if length < self.min || length > self.max {
            return Err(ValidationError::invalid_length(
                value,
                &self.context,
                self.expected(),
                length,
            ));
        }
        Ok(value)
    }
}
