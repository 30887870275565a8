//! Built-in value types against their sample inputs.

use crate::common::fixtures::{self, Samples};
use crate::{assert_constructs, assert_error_reports, assert_invalid_argument};
use checked_values::registry::{self, Arg};
use checked_values::validator::NullValidator;
use checked_values::value::{Bic, Iban, Identifier, InstitutionCode, TaxId, Text, VatId};
use checked_values::{ValidationError, ValueType};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

fn construct(samples: &Samples, raw: &str) -> checked_values::ArgumentResult<Arc<dyn ValueType>> {
    registry::global().construct(samples.type_name, &[Arg::from(raw)])
}

#[test]
fn test_valid_samples_construct() {
    for samples in fixtures::all_samples() {
        for raw in samples.valid {
            let value = assert_constructs!(construct(&samples, raw));
            assert_eq!(value.type_name(), samples.type_name, "type of {}", raw);
        }
    }
}

#[test]
fn test_invalid_samples_rejected_with_context() {
    for samples in fixtures::all_samples() {
        for raw in samples.invalid {
            let error = construct(&samples, raw).expect_err(raw);
            assert_eq!(error.context(), samples.type_name, "context for {}", raw);
            assert!(
                error.to_string().contains(raw),
                "'{}' does not name the rejected input",
                error
            );
        }
    }
}

#[test]
fn test_payload_equality_ignores_validator() {
    let raw = "DE41300606010006605605";
    let checked = Iban::new(raw).unwrap();
    let unchecked = Iban::with_validator(raw, Arc::new(NullValidator)).unwrap();
    assert_eq!(checked, unchecked);

    let set: HashSet<Iban> = [checked, unchecked].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn test_null_validator_carries_invalid_input() {
    let invalid = Iban::with_validator("DE00 0000 0000 0000 0000 00", Arc::new(NullValidator)).unwrap();
    assert_eq!(invalid.as_str(), "DE00000000000000000000");
    assert!(!Iban::is_valid(invalid.as_str()));
}

#[test]
fn test_tax_id_published_example() {
    let id = assert_constructs!(TaxId::new("86095742719"));
    assert_eq!(id.to_string(), "86095742719");
    assert_invalid_argument!(TaxId::new("8609574271"), ValidationError::InvalidLength { .. });
}

#[test]
fn test_vat_id_rejects_bad_check_digit() {
    assert_invalid_argument!(
        VatId::new("DE136695978"),
        ValidationError::InvalidCheckDigit { .. }
    );
    assert_error_reports!(VatId::new("DE136695978"), "DE136695978", "VatId");
}

#[test]
fn test_institution_code_text_and_number_agree() {
    let from_text = InstitutionCode::new("109102038").unwrap();
    let from_number = InstitutionCode::from_number(109_102_038).unwrap();
    assert_eq!(from_text, from_number);
    assert_invalid_argument!(
        InstitutionCode::from_number(-5),
        ValidationError::OutOfRange { .. }
    );
}

#[test]
fn test_identifier_forms() {
    let canonical = Identifier::new("6ba7b810-9dad-11d1-80b4-00c04fd430c8").unwrap();
    let compact = Identifier::new("a6e4EJ2tEdGAtADAT9QwyA").unwrap();
    assert_eq!(canonical, compact);
    assert_eq!(compact.to_string(), "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    assert_eq!(
        canonical.to_signed_integer(),
        143_098_242_404_177_361_603_877_621_312_831_893_704
    );
    assert_error_reports!(Identifier::new("not-a-uuid"), "not-a-uuid", "UUID");
}

#[test]
fn test_to_map_composite_and_default() {
    let bic = Bic::new("DEUTDEFF500").unwrap();
    assert_eq!(
        serde_json::Value::Object(bic.to_map().unwrap()),
        json!({
            "institutionCode": "DEUT",
            "countryCode": "DE",
            "locationCode": "FF",
            "branchCode": "500"
        })
    );

    let text = Text::new("plain").unwrap();
    assert_invalid_argument!(
        text.to_map().map_err(checked_values::InvalidArgument::from),
        ValidationError::NotImplemented { .. }
    );
}

#[test]
fn test_serde_validates_on_deserialize() {
    #[derive(Debug, serde::Deserialize, serde::Serialize)]
    struct Account {
        iban: Iban,
        bic: Bic,
    }

    let account: Account = serde_json::from_value(json!({
        "iban": "DE89 3704 0044 0532 0130 00",
        "bic": "cobadeffxxx"
    }))
    .unwrap();
    assert_eq!(account.iban.as_str(), "DE89370400440532013000");
    assert_eq!(
        serde_json::to_value(&account).unwrap(),
        json!({ "iban": "DE89370400440532013000", "bic": "COBADEFFXXX" })
    );

    let invalid = serde_json::from_value::<Account>(json!({
        "iban": "DE00370400440532013000",
        "bic": "COBADEFFXXX"
    }));
    assert!(invalid.is_err());
}

#[test]
fn test_from_str_and_try_from() {
    let bic: Bic = "MARKDEFF".parse().unwrap();
    assert_eq!(Bic::try_from("MARKDEFF").unwrap(), bic);
    assert_eq!(Bic::try_from(String::from("markdeff")).unwrap(), bic);
    assert!("nope".parse::<Bic>().is_err());
}
