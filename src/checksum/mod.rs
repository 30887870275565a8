//! Check digit algorithms.
//!
//! All algorithms operate on a numeral string with a distinguished check
//! position and are pure functions, safe to call from any thread. Each family
//! is one variant of [`Checksum`], which plugs into the common
//! [`Validator`] contract.
//!
//! Input is never normalized here: spaces, hyphens and other separators are
//! validation failures unless the calling value type strips them first.
//!
//! ```rust
//! use checked_values::checksum::Checksum;
//! use checked_values::validator::Validator;
//!
//! let luhn = Checksum::Mod10;
//! assert_eq!(luhn.compute_check_digit("7992739871").unwrap(), "3");
//! assert!(luhn.is_valid("79927398713"));
//! ```

mod mod10;
mod mod97;
mod recursive_mod11;
mod weighted_mod11;

use crate::error::{ValidationError, ValidationResult};
use crate::validator::Validator;
use crate::validator::digits::check_digits;

pub(crate) const MOD10: &str = "Mod10";
pub(crate) const WEIGHTED_MOD11: &str = "WeightedMod11";
pub(crate) const RECURSIVE_MOD11: &str = "RecursiveMod11";
pub(crate) const MOD97: &str = "Mod97";
pub(crate) const NOOP: &str = "Noop";

/// A check digit algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Checksum {
    /// Luhn: double every second digit from the right, check digit tops the
    /// sum up to a multiple of ten.
    Mod10,
    /// Weights 2, 3, 4, ... over the remaining digits, right to left.
    ///
    /// `check_position` counts from the right, `0` being the last character.
    WeightedMod11 { check_position: usize },
    /// Running product modulo 11 over a numeral of exactly `length` digits
    /// (check digit included).
    RecursiveMod11 { length: usize },
    /// MOD 97-10 with two check digits at positions 2..4.
    Mod97,
    /// Treats the trailing character as correct; always valid.
    Noop,
}

impl Checksum {
    /// Name used as error context.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mod10 => MOD10,
            Self::WeightedMod11 { .. } => WEIGHTED_MOD11,
            Self::RecursiveMod11 { .. } => RECURSIVE_MOD11,
            Self::Mod97 => MOD97,
            Self::Noop => NOOP,
        }
    }

    /// Byte range of the check digit(s) within a value of `len` characters.
    fn check_range(&self, value: &str) -> ValidationResult<std::ops::Range<usize>> {
        let len = value.len();
        let range = match self {
            Self::Mod10 | Self::RecursiveMod11 { .. } | Self::Noop if len >= 1 => len - 1..len,
            Self::WeightedMod11 { check_position } if len > *check_position => {
                let index = len - 1 - check_position;
                index..index + 1
            }
            Self::Mod97 if len >= 4 => 2..4,
            _ => {
                return Err(ValidationError::invalid_length(
                    value,
                    self.name(),
                    format!("at least {}", self.min_len()),
                    len,
                ));
            }
        };
        Ok(range)
    }

    fn min_len(&self) -> usize {
        match self {
            Self::Mod10 => 2,
            Self::WeightedMod11 { check_position } => (check_position + 1).max(2),
            Self::RecursiveMod11 { length } => *length,
            Self::Mod97 => 5,
            Self::Noop => 1,
        }
    }

    /// Extract the check digit(s) from a complete value.
    pub fn check_digit<'a>(&self, value: &'a str) -> ValidationResult<&'a str> {
        ensure_ascii(value, self.name())?;
        Ok(&value[self.check_range(value)?])
    }

    /// Remove the check digit(s) from a complete value.
    pub fn strip_check_digit(&self, value: &str) -> ValidationResult<String> {
        ensure_ascii(value, self.name())?;
        let range = self.check_range(value)?;
        let mut raw = String::with_capacity(value.len());
        raw.push_str(&value[..range.start]);
        raw.push_str(&value[range.end..]);
        Ok(raw)
    }

    /// Compute the expected check digit(s) for a value without them.
    pub fn compute_check_digit(&self, raw: &str) -> ValidationResult<String> {
        ensure_ascii(raw, self.name())?;
        let digit = match self {
            Self::Mod10 => mod10::compute(raw)?,
            Self::WeightedMod11 { .. } => weighted_mod11::compute(raw)?,
            Self::RecursiveMod11 { length } => {
                let expected = length.saturating_sub(1);
                if raw.len() != expected {
                    return Err(ValidationError::invalid_length(
                        raw,
                        RECURSIVE_MOD11,
                        expected.to_string(),
                        raw.len(),
                    ));
                }
                recursive_mod11::compute(raw)?
            }
            Self::Mod97 => return Ok(format!("{:02}", mod97::compute(raw)?)),
            Self::Noop => {
                return match raw.chars().last() {
                    Some(c) => Ok(c.to_string()),
                    None => Err(ValidationError::invalid_length(raw, NOOP, "at least 1", 0)),
                };
            }
        };
        Ok(digit.to_string())
    }

    /// Derive a complete, valid value by inserting the computed check digit(s).
    pub fn with_check_digit(&self, raw: &str) -> ValidationResult<String> {
        if *self == Self::Noop {
            return Ok(raw.to_string());
        }
        let digit = self.compute_check_digit(raw)?;
        let index = match self {
            Self::WeightedMod11 { check_position } => {
                raw.len().checked_sub(*check_position).ok_or_else(|| {
                    ValidationError::invalid_length(
                        raw,
                        WEIGHTED_MOD11,
                        format!("at least {}", check_position),
                        raw.len(),
                    )
                })?
            }
            Self::Mod97 => 2,
            _ => raw.len(),
        };
        let mut value = String::with_capacity(raw.len() + digit.len());
        value.push_str(&raw[..index]);
        value.push_str(&digit);
        value.push_str(&raw[index..]);
        Ok(value)
    }
}

impl Validator<str> for Checksum {
    fn validate<'a>(&self, value: &'a str) -> ValidationResult<&'a str> {
        if *self == Self::Noop {
            return Ok(value);
        }
        // ASCII only from here on, so byte and character counts agree
        ensure_ascii(value, self.name())?;
        if let Self::RecursiveMod11 { length } = self {
            if value.len() != *length {
                return Err(ValidationError::invalid_length(
                    value,
                    RECURSIVE_MOD11,
                    length.to_string(),
                    value.len(),
                ));
            }
        }
        if value.len() < self.min_len() {
            return Err(ValidationError::invalid_length(
                value,
                self.name(),
                format!("at least {}", self.min_len()),
                value.len(),
            ));
        }

        if *self == Self::Mod97 {
            if mod97::verify(value)? {
                return Ok(value);
            }
            let expected = self.compute_check_digit(&self.strip_check_digit(value)?)?;
            return Err(ValidationError::invalid_check_digit(
                value,
                MOD97,
                expected,
                &value[2..4],
            ));
        }

        check_digits(value, self.name())?;
        let actual = self.check_digit(value)?;
        let expected = self.compute_check_digit(&self.strip_check_digit(value)?)?;
        if actual != expected {
            return Err(ValidationError::invalid_check_digit(
                value,
                self.name(),
                expected,
                actual,
            ));
        }
        Ok(value)
    }
}

fn ensure_ascii(value: &str, context: &str) -> ValidationResult<()> {
    if value.is_ascii() {
        Ok(())
    } else {
        Err(ValidationError::invalid_value(
            value,
            context,
            "contains non-ASCII characters",
        ))
    }
}
