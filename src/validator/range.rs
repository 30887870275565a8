//! Inclusive range validation for numeric payloads.

use super::Validator;
use crate::error::{ValidationError, ValidationResult};
use std::fmt::{Debug, Display};

/// Accepts numbers within `min..=max`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeValidator<N> {
    context: String,
    min: N,
    max: N,
}

impl<N> RangeValidator<N> {
    pub fn new(context: impl Into<String>, min: N, max: N) -> Self {
        Self {
            context: context.into(),
            min,
            max,
        }
    }
}

impl<N> Validator<N> for RangeValidator<N>
where
    N: PartialOrd + Display + Debug + Send + Sync,
{
    fn validate<'a>(&self, value: &'a N) -> ValidationResult<&'a N> {
        if *value < self.min || *value > self.max {
            return Err(ValidationError::out_of_range(
                value,
                &self.context,
                &self.min,
                &self.max,
            ));
        }
        Ok(value)
    }
}
