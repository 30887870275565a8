//! Text and integer encodings of 128-bit identifiers.
//!
//! Two reversible text forms are supported:
//!
//! - canonical: `8-4-4-4-12` lower-case hex groups (36 characters)
//! - compact: unpadded base64 with `-` and `_` in place of `+` and `/`
//!   (22 characters, URL safe)
//!
//! Every malformed input is rejected with [`ValidationError::InvalidValue`]
//! in context `"UUID"`. Nothing is silently truncated.
//!
//! ```rust
//! use checked_values::codec;
//!
//! let bytes = codec::from_canonical_string("6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap();
//! let compact = codec::to_compact_string(&bytes);
//! assert_eq!(compact.len(), 22);
//! assert_eq!(codec::from_compact_string(&compact).unwrap(), bytes);
//! ```

use crate::error::{ValidationError, ValidationResult};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use uuid::Uuid;

/// Error context for every codec failure.
pub const CONTEXT: &str = "UUID";

/// Length of the compact form.
pub const COMPACT_LENGTH: usize = 22;

/// Length of the canonical form.
pub const CANONICAL_LENGTH: usize = 36;

const HYPHENS: [usize; 4] = [8, 13, 18, 23];

/// Render as `8-4-4-4-12` lower-case hex.
pub fn to_canonical_string(bytes: &[u8; 16]) -> String {
    Uuid::from_bytes(*bytes).hyphenated().to_string()
}

/// Parse the hyphenated hex layout. Hex digits may be either case.
pub fn from_canonical_string(value: &str) -> ValidationResult<[u8; 16]> {
    if value.len() != CANONICAL_LENGTH {
        return Err(ValidationError::invalid_value(
            value,
            CONTEXT,
            format!(
                "expected {} characters in 8-4-4-4-12 layout, got {}",
                CANONICAL_LENGTH,
                value.chars().count()
            ),
        ));
    }
    for (index, b) in value.bytes().enumerate() {
        let ok = if HYPHENS.contains(&index) {
            b == b'-'
        } else {
            b.is_ascii_hexdigit()
        };
        if !ok {
            return Err(ValidationError::invalid_value(
                value,
                CONTEXT,
                format!("unexpected character at position {}", index),
            ));
        }
    }
    Uuid::try_parse(value)
        .map(|uuid| *uuid.as_bytes())
        .map_err(|e| ValidationError::invalid_value(value, CONTEXT, e.to_string()))
}

/// Encode as 22 URL-safe base64 characters.
pub fn to_compact_string(bytes: &[u8; 16]) -> String {
    STANDARD_NO_PAD
        .encode(bytes)
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect()
}

/// Decode the 22 character compact form.
pub fn from_compact_string(value: &str) -> ValidationResult<[u8; 16]> {
    let mut standard = String::with_capacity(value.len());
    for c in value.chars() {
        standard.push(match c {
            '-' => '+',
            '_' => '/',
            c if c.is_ascii_alphanumeric() => c,
            other => {
                return Err(ValidationError::invalid_value(
                    value,
                    CONTEXT,
                    format!("invalid compact character '{}'", other),
                ));
            }
        });
    }
    if standard.len() != COMPACT_LENGTH {
        return Err(ValidationError::invalid_value(
            value,
            CONTEXT,
            format!(
                "expected {} compact characters, got {}",
                COMPACT_LENGTH,
                standard.len()
            ),
        ));
    }

    let decoded = STANDARD_NO_PAD
        .decode(&standard)
        .map_err(|e| ValidationError::invalid_value(value, CONTEXT, e.to_string()))?;
    <[u8; 16]>::try_from(decoded.as_slice()).map_err(|_| {
        ValidationError::invalid_value(
            value,
            CONTEXT,
            format!("decoded to {} bytes, expected 16", decoded.len()),
        )
    })
}

/// Big-endian two's complement interpretation; values with the top bit set
/// come out negative.
pub fn to_signed_integer(bytes: &[u8; 16]) -> i128 {
    i128::from_be_bytes(*bytes)
}

/// Big-endian unsigned interpretation.
pub fn to_unsigned_integer(bytes: &[u8; 16]) -> u128 {
    u128::from_be_bytes(*bytes)
}

/// Inverse of [`to_signed_integer`].
pub fn from_integer(value: i128) -> [u8; 16] {
    value.to_be_bytes()
}

/// Fit a big-endian integer of any width into 16 bytes.
///
/// Longer inputs keep their low-order 16 bytes; shorter inputs are
/// zero-padded on the left.
pub fn from_integer_bytes(value: &[u8]) -> [u8; 16] {
    let mut bytes = [0u8; 16];
    if value.len() >= 16 {
        bytes.copy_from_slice(&value[value.len() - 16..]);
    } else {
        bytes[16 - value.len()..].copy_from_slice(value);
    }
    bytes
}
