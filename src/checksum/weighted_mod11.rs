//! Weighted modulus 11 check digit.

use crate::error::{ValidationError, ValidationResult};
use crate::validator::digits::check_digits;

/// Compute the check digit over the digits that surround the check position.
///
/// Weights 2, 3, 4, ... run from the rightmost remaining digit to the left.
/// A result of 10 has no single-digit representation and is rejected; 11
/// maps to 0.
pub(crate) fn compute(raw: &str) -> ValidationResult<u32> {
    check_digits(raw, super::WEIGHTED_MOD11)?;
    // Reduced as it goes; weights are only significant modulo 11
    let sum = raw
        .bytes()
        .rev()
        .zip((2..=12u32).cycle())
        .fold(0u32, |acc, (b, weight)| {
            (acc + u32::from(b - b'0') * (weight % 11)) % 11
        });
    match 11 - sum {
        10 => Err(ValidationError::invalid_value(
            raw,
            super::WEIGHTED_MOD11,
            "no valid check digit exists (remainder 1)",
        )),
        11 => Ok(0),
        digit => Ok(digit),
    }
}
