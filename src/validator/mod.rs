//! Validator contract shared by all value types.
//!
//! A validator is a stateless strategy over a payload type. Validators are
//! shared process-wide (behind `Arc`) by every value of a type, so they must
//! be `Send + Sync` and free of side effects.
//!
//! ## Layers
//!
//! - [`Validator::validate`] reports a [`ValidationError`], the internal failure kind
//! - [`Validator::is_valid`] is the only place a failure becomes a boolean
//! - [`Validator::verify`] re-signals failures as [`InvalidArgument`] for API boundaries
//!
//! ```rust
//! use checked_values::validator::{LengthValidator, Validator};
//!
//! let validator = LengthValidator::exactly("BLZ", 8);
//! assert!(validator.is_valid("37040044"));
//! assert!(validator.verify("3704").is_err());
//! ```
mod chain;
pub(crate) mod digits;
mod length;
mod range;

pub use chain::AllOf;
pub use digits::DigitsValidator;
pub use length::LengthValidator;
pub use range::RangeValidator;

use crate::error::{ArgumentResult, InvalidArgument, ValidationResult};
use std::fmt::Debug;

/// Strategy that decides whether a payload is acceptable.
pub trait Validator<T: ?Sized>: Debug + Send + Sync {
    /// Return the input unchanged if it is valid.
    fn validate<'a>(&self, value: &'a T) -> ValidationResult<&'a T>;

    /// Check validity without surfacing the failure.
    fn is_valid(&self, value: &T) -> bool {
        self.validate(value).is_ok()
    }

    /// Like [`validate`](Self::validate), with argument-error semantics.
    fn verify<'a>(&self, value: &'a T) -> ArgumentResult<&'a T> {
        self.validate(value).map_err(InvalidArgument::from)
    }
}

/// Validator that accepts everything.
///
/// Used by the generic text type and as an escape hatch to carry invalid
/// input through a pipeline for later error reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullValidator;

impl<T: ?Sized> Validator<T> for NullValidator {
    fn validate<'a>(&self, value: &'a T) -> ValidationResult<&'a T> {
        Ok(value)
    }
}
