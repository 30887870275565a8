//! Ordered composition of validators.

use super::Validator;
use crate::error::ValidationResult;
use std::fmt;
use std::sync::Arc;

/// Runs each validator in order; the first failure wins.
pub struct AllOf<T: ?Sized> {
    validators: Vec<Arc<dyn Validator<T>>>,
}

impl<T: ?Sized> AllOf<T> {
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    pub fn add_validator(mut self, validator: Arc<dyn Validator<T>>) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl<T: ?Sized> Default for AllOf<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for AllOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.validators.iter()).finish()
    }
}

impl<T: ?Sized> Validator<T> for AllOf<T> {
    fn validate<'a>(&self, value: &'a T) -> ValidationResult<&'a T> {
        for validator in &self.validators {
            validator.validate(value)?;
        }
        Ok(value)
    }
}
