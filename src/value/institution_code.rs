//! Nine-digit institution code with a Luhn check digit.

use super::Value;
use crate::checksum::Checksum;
use crate::error::{ArgumentResult, InvalidArgument};
use crate::registry::Constructor;
use crate::validator::{AllOf, LengthValidator, RangeValidator, Validator};
use serde_json::{Map, Value as JsonValue};
use std::sync::{Arc, OnceLock};

const CONTEXT: &str = "InstitutionCode";
const MAX: i64 = 999_999_999;

fn validator() -> Arc<dyn Validator<str>> {
    static VALIDATOR: OnceLock<Arc<dyn Validator<str>>> = OnceLock::new();
    VALIDATOR
        .get_or_init(|| {
            Arc::new(
                AllOf::<str>::new()
                    .add_validator(Arc::new(LengthValidator::exactly(CONTEXT, 9)))
                    .add_validator(Arc::new(Checksum::Mod10)),
            )
        })
        .clone()
}

/// Institution code such as those identifying health care providers.
///
/// The first two digits classify the institution, the next two give the
/// region, then a four digit serial and the check digit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstitutionCode(Value<str>);

impl InstitutionCode {
    pub fn new(value: &str) -> ArgumentResult<Self> {
        Value::new(CONTEXT, value.trim().to_string(), validator()).map(Self)
    }

    /// Build from the numeric form, zero padded to nine digits.
    pub fn from_number(value: i64) -> ArgumentResult<Self> {
        Self::new(&Self::pad(value)?)
    }

    /// Cached counterpart of [`Self::from_number`].
    pub fn of_number(value: i64) -> ArgumentResult<Arc<Self>> {
        Self::of(&Self::pad(value)?)
    }

    fn pad(value: i64) -> ArgumentResult<String> {
        RangeValidator::new(CONTEXT, 0, MAX).verify(&value)?;
        Ok(format!("{:09}", value))
    }

    pub fn as_str(&self) -> &str {
        self.0.payload()
    }

    /// Numeric value of the code.
    pub fn as_number(&self) -> i64 {
        self.as_str()
            .bytes()
            .fold(0, |acc, b| acc * 10 + i64::from(b - b'0'))
    }

    pub fn classification(&self) -> &str {
        &self.as_str()[..2]
    }

    pub fn region(&self) -> &str {
        &self.as_str()[2..4]
    }

    pub fn serial(&self) -> &str {
        &self.as_str()[4..8]
    }

    fn parts(&self) -> Map<String, JsonValue> {
        let mut map = Map::new();
        map.insert("classification".into(), self.classification().into());
        map.insert("region".into(), self.region().into());
        map.insert("serial".into(), self.serial().into());
        map.insert("checkDigit".into(), self.as_str()[8..].into());
        map
    }
}

impl TryFrom<i64> for InstitutionCode {
    type Error = InvalidArgument;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_number(value)
    }
}

crate::impl_value_type!(
    InstitutionCode,
    name: "InstitutionCode",
    constructors: [
        Constructor::text(InstitutionCode::of),
        Constructor::integer(InstitutionCode::of_number),
    ],
    to_map: InstitutionCode::parts
);
