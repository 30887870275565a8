//! Luhn-family modulus 10 check digit.

use crate::error::ValidationResult;
use crate::validator::digits::check_digits;

/// Compute the check digit for a numeral that does not yet carry one.
///
/// Starting with the rightmost digit every second digit is doubled (digits
/// of the product summed), and the check digit brings the total up to the
/// next multiple of ten.
pub(crate) fn compute(raw: &str) -> ValidationResult<u32> {
    check_digits(raw, super::MOD10)?;
    let sum: u32 = raw
        .bytes()
        .rev()
        .map(|b| u32::from(b - b'0'))
        .enumerate()
        .map(|(index, digit)| {
            if index % 2 == 0 {
                let doubled = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                digit
            }
        })
        .sum();
    Ok((10 - sum % 10) % 10)
}
