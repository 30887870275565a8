//! ISO 7064 MOD 97-10 check digits as carried by international account numbers.

use crate::error::{ValidationError, ValidationResult};

/// Remainder modulo 97 of an alphanumeric string, letters counting as 10..=35.
pub(crate) fn remainder(chars: impl Iterator<Item = u8>, value: &str) -> ValidationResult<u32> {
    let mut rem = 0u32;
    for b in chars {
        rem = match b {
            b'0'..=b'9' => (rem * 10 + u32::from(b - b'0')) % 97,
            b'A'..=b'Z' => (rem * 100 + u32::from(b - b'A') + 10) % 97,
            _ => {
                return Err(ValidationError::invalid_value(
                    value,
                    super::MOD97,
                    format!("invalid character '{}'", char::from(b)),
                ));
            }
        };
    }
    Ok(rem)
}

/// Check digits for `country + bban`, i.e. the value with positions 2..4 removed.
pub(crate) fn compute(raw: &str) -> ValidationResult<u32> {
    if raw.len() < 3 {
        return Err(ValidationError::invalid_length(
            raw,
            super::MOD97,
            "at least 3",
            raw.len(),
        ));
    }
    let (country, bban) = raw.split_at(2);
    let rearranged = bban.bytes().chain(country.bytes()).chain(*b"00");
    Ok(98 - remainder(rearranged, raw)?)
}

/// Whether the full value (check digits at positions 2..4) satisfies MOD 97-10.
pub(crate) fn verify(value: &str) -> ValidationResult<bool> {
    let (head, tail) = value.split_at(4);
    Ok(remainder(tail.bytes().chain(head.bytes()), value)? == 1)
}
