//! International Bank Account Number.

use super::{Value, compact_upper};
use crate::checksum::Checksum;
use crate::error::{ArgumentResult, ValidationError, ValidationResult};
use crate::registry::Constructor;
use crate::validator::Validator;
use serde_json::{Map, Value as JsonValue};
use std::sync::{Arc, OnceLock};

const CONTEXT: &str = "IBAN";

/// Fixed lengths for common countries; others must fall within 15..=34.
const COUNTRY_LENGTHS: &[(&str, usize)] = &[
    ("AT", 20),
    ("BE", 16),
    ("CH", 21),
    ("DE", 22),
    ("DK", 18),
    ("ES", 24),
    ("FR", 27),
    ("GB", 22),
    ("IT", 27),
    ("LU", 20),
    ("NL", 18),
    ("NO", 15),
    ("PL", 28),
    ("SE", 24),
];

fn expected_length(country: &str) -> Option<usize> {
    COUNTRY_LENGTHS
        .iter()
        .find(|(code, _)| *code == country)
        .map(|(_, len)| *len)
}

/// Country prefix, length and MOD 97-10 check.
#[derive(Debug, Clone, Copy, Default)]
pub struct IbanValidator;

impl Validator<str> for IbanValidator {
    fn validate<'a>(&self, value: &'a str) -> ValidationResult<&'a str> {
        let country = value.get(..2).unwrap_or(value);
        if country.len() != 2 || !country.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(ValidationError::invalid_value(
                value,
                CONTEXT,
                "must start with a two-letter country code",
            ));
        }

        let len = value.chars().count();
        match expected_length(country) {
            Some(expected) if len != expected => {
                return Err(ValidationError::invalid_length(
                    value,
                    CONTEXT,
                    expected.to_string(),
                    len,
                ));
            }
            None if !(15..=34).contains(&len) => {
                return Err(ValidationError::invalid_length(value, CONTEXT, "15..=34", len));
            }
            _ => {}
        }

        Checksum::Mod97
            .validate(value)
            .map_err(|e| e.with_context(CONTEXT))
    }
}

fn validator() -> Arc<dyn Validator<str>> {
    static VALIDATOR: OnceLock<Arc<dyn Validator<str>>> = OnceLock::new();
    VALIDATOR.get_or_init(|| Arc::new(IbanValidator)).clone()
}

/// A validated IBAN in electronic format (upper case, no spaces).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Iban(Value<str>);

impl Iban {
    /// Validate an IBAN in electronic or print format.
    pub fn new(value: &str) -> ArgumentResult<Self> {
        Value::new(CONTEXT, compact_upper(value), validator()).map(Self)
    }

    /// Wrap a value with a caller-supplied validator.
    ///
    /// With [`NullValidator`](crate::validator::NullValidator) this carries
    /// unverified input; the result still compares equal to a checked IBAN
    /// with the same text.
    pub fn with_validator(value: &str, validator: Arc<dyn Validator<str>>) -> ArgumentResult<Self> {
        Value::new(CONTEXT, compact_upper(value), validator).map(Self)
    }

    /// Build an IBAN from country code and BBAN, computing the check digits.
    pub fn from_bban(country: &str, bban: &str) -> ArgumentResult<Self> {
        let raw = format!("{}{}", compact_upper(country), compact_upper(bban));
        let value = Checksum::Mod97
            .with_check_digit(&raw)
            .map_err(|e| e.with_context(CONTEXT))?;
        Self::new(&value)
    }

    pub fn as_str(&self) -> &str {
        self.0.payload()
    }

    /// Country prefix. Empty for unchecked values too short to carry one.
    pub fn country_code(&self) -> &str {
        self.as_str().get(..2).unwrap_or_default()
    }

    pub fn check_digits(&self) -> &str {
        self.as_str().get(2..4).unwrap_or_default()
    }

    /// Basic bank account number, the country specific part.
    pub fn bban(&self) -> &str {
        self.as_str().get(4..).unwrap_or_default()
    }

    /// Print format: groups of four separated by spaces.
    pub fn formatted(&self) -> String {
        self.as_str()
            .as_bytes()
            .chunks(4)
            .map(|chunk| String::from_utf8_lossy(chunk))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether the held value passes its validator.
    pub fn is_checked(&self) -> bool {
        self.0.is_valid()
    }

    fn parts(&self) -> Map<String, JsonValue> {
        let mut map = Map::new();
        map.insert("countryCode".into(), self.country_code().into());
        map.insert("checkDigits".into(), self.check_digits().into());
        map.insert("bban".into(), self.bban().into());
        map
    }
}

impl AsRef<str> for Iban {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

crate::impl_value_type!(
    Iban,
    name: "IBAN",
    constructors: [Constructor::text(Iban::of)],
    to_map: Iban::parts
);
