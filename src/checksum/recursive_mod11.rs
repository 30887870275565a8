//! Recursive product modulus 11,10 check digit (ISO 7064 hybrid system).

use crate::error::ValidationResult;
use crate::validator::digits::check_digits;

/// Compute the check digit with the running-product recurrence.
///
/// Length is not checked here; [`Checksum::RecursiveMod11`] enforces its
/// exact-length precondition before calling in.
///
/// [`Checksum::RecursiveMod11`]: super::Checksum::RecursiveMod11
pub(crate) fn compute(raw: &str) -> ValidationResult<u32> {
    check_digits(raw, super::RECURSIVE_MOD11)?;
    let mut product = 10;
    for b in raw.bytes() {
        let mut sum = (u32::from(b - b'0') + product) % 10;
        if sum == 0 {
            sum = 10;
        }
        product = (sum * 2) % 11;
    }
    Ok(match 11 - product {
        10 => 0,
        digit => digit,
    })
}
