//! Check digit round trips over generated numerals.

use checked_values::value::{Iban, InstitutionCode, TaxId};
use checked_values::{Checksum, ValidationError, Validator};
use proptest::prelude::*;

/// Replace the check digit with a different digit.
fn corrupt(value: &str) -> String {
    let (body, check) = value.split_at(value.len() - 1);
    let digit = check.as_bytes()[0] - b'0';
    format!("{}{}", body, (digit + 1) % 10)
}

proptest! {
    #[test]
    fn prop_mod10_derived_value_validates(raw in "[0-9]{1,30}") {
        let value = Checksum::Mod10.with_check_digit(&raw).unwrap();
        prop_assert!(Checksum::Mod10.is_valid(&value));
        prop_assert_eq!(Checksum::Mod10.strip_check_digit(&value).unwrap(), raw);
        prop_assert!(!Checksum::Mod10.is_valid(&corrupt(&value)));
    }

    #[test]
    fn prop_weighted_mod11_derived_or_rejected(raw in "[0-9]{1,20}", position in 0usize..3) {
        let checksum = Checksum::WeightedMod11 { check_position: position };
        prop_assume!(raw.len() >= position);
        match checksum.with_check_digit(&raw) {
            Ok(value) => {
                prop_assert!(checksum.is_valid(&value));
                prop_assert_eq!(checksum.strip_check_digit(&value).unwrap(), raw);
            }
            Err(error) => {
                // A remainder of 1 has no single-digit check value
                let is_invalid_value = matches!(error, ValidationError::InvalidValue { .. });
                prop_assert!(is_invalid_value);
            }
        }
    }

    #[test]
    fn prop_recursive_mod11_derived_value_validates(raw in "[0-9]{10}") {
        let checksum = Checksum::RecursiveMod11 { length: 11 };
        let value = checksum.with_check_digit(&raw).unwrap();
        prop_assert!(checksum.is_valid(&value));
        prop_assert!(!checksum.is_valid(&corrupt(&value)));
    }

    #[test]
    fn prop_recursive_mod11_rejects_other_lengths(raw in "[0-9]{1,9}|[0-9]{11,15}") {
        let checksum = Checksum::RecursiveMod11 { length: 11 };
        let is_invalid_length = matches!(
            checksum.compute_check_digit(&raw),
            Err(ValidationError::InvalidLength { .. })
        );
        prop_assert!(is_invalid_length);
    }

    #[test]
    fn prop_tax_id_accepts_derived_numbers(raw in "[1-9][0-9]{9}") {
        let value = Checksum::RecursiveMod11 { length: 11 }.with_check_digit(&raw).unwrap();
        prop_assert!(TaxId::new(&value).is_ok());
    }

    #[test]
    fn prop_institution_code_number_matches_text(raw in "[0-9]{8}") {
        let value = Checksum::Mod10.with_check_digit(&raw).unwrap();
        let number: i64 = value.parse().unwrap();
        let from_text = InstitutionCode::new(&value).unwrap();
        let from_number = InstitutionCode::from_number(number).unwrap();
        prop_assert_eq!(from_text, from_number);
    }

    #[test]
    fn prop_iban_from_bban_validates(bban in "[0-9A-Z]{11,30}") {
        let iban = Iban::from_bban("MT", &bban);
        // Countries without a fixed length accept 15..=34 characters overall
        prop_assert!(iban.is_ok());
        let iban = iban.unwrap();
        prop_assert_eq!(iban.bban(), bban.as_str());
        prop_assert!(Iban::is_valid(&iban.formatted()));
    }
}
