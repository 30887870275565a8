//! Construction through the registry.

use crate::assert_invalid_argument;
use crate::common::fixtures;
use checked_values::registry::{self, Arg, Constructor};
use checked_values::value::{Bic, Identifier, InstitutionCode, Text};
use checked_values::{RegistryConfig, ValidationError, ValueTypeRegistry};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[test]
fn test_fuzzy_name_resolves_like_exact() {
    let registry = registry::global();
    let exact = registry.construct("BIC", &[Arg::from("MARKDEFF")]).unwrap();
    let fuzzy = registry.construct("BIC1", &[Arg::from("MARKDEFF")]).unwrap();
    assert_eq!(exact.type_name(), fuzzy.type_name());
    assert_eq!(exact.to_string(), fuzzy.to_string());
}

#[test]
fn test_plural_and_case_typos() {
    let registry = registry::global();
    assert_eq!(registry.resolve("IBANs"), Some("IBAN"));
    assert_eq!(registry.resolve("taxid"), Some("TaxId"));
    assert_eq!(registry.resolve("VatIds"), Some("VatId"));
}

#[test]
fn test_unmatched_name_falls_back_to_text() {
    let value = registry::global()
        .construct("MonetaryAmount", &[Arg::from("12.50 EUR")])
        .unwrap();
    assert_eq!(value.type_name(), "Text");
    assert!(value.as_any().downcast_ref::<Text>().is_some());

    let mixed = registry::global()
        .construct("MonetaryAmount", &[Arg::from(1250_i64), Arg::from(vec![0xab_u8])])
        .unwrap();
    assert_eq!(mixed.type_name(), "Text");
    assert_eq!(mixed.to_string(), "1250 ab");
}

#[test]
fn test_threshold_controls_fuzzy_matching() {
    let strict = ValueTypeRegistry::with_config(RegistryConfig {
        fuzzy_threshold: 0.9,
        fallback_to_text: false,
    })
    .unwrap();
    assert_eq!(strict.resolve("BIC1"), None);
    assert_invalid_argument!(
        strict.construct("BIC1", &[Arg::from("MARKDEFF")]),
        ValidationError::UnknownType { .. }
    );
}

#[test]
fn test_construct_by_type_selects_overload() {
    let registry = registry::global();
    let nil = registry
        .construct_type::<Identifier>(&[Arg::from(Uuid::nil())])
        .unwrap();
    let bytes = registry
        .construct_type::<Identifier>(&[Arg::from(vec![0_u8; 16])])
        .unwrap();
    let text = registry
        .construct_type::<Identifier>(&[Arg::from("00000000-0000-0000-0000-000000000000")])
        .unwrap();
    assert_eq!(nil, bytes);
    assert_eq!(bytes, text);
}

#[test]
fn test_construct_by_type_rejects_unmatched_arguments() {
    let registry = registry::global();
    assert_invalid_argument!(
        registry.construct_type::<Bic>(&[Arg::from(42_i64)]),
        ValidationError::NoMatchingConstructor { .. }
    );
    assert_invalid_argument!(
        registry.construct_type::<Bic>(&[Arg::from("A"), Arg::from("B")]),
        ValidationError::NoMatchingConstructor { .. }
    );
    assert_invalid_argument!(
        registry.construct_type::<Identifier>(&[Arg::from(vec![0_u8; 15])]),
        ValidationError::InvalidLength { .. }
    );
}

#[test]
fn test_json_arguments() {
    let registry = registry::global();
    let args: Vec<Arg> = [json!(260140207)]
        .into_iter()
        .map(|value| Arg::try_from(value).unwrap())
        .collect();
    let code = registry.construct_type::<InstitutionCode>(&args).unwrap();
    assert_eq!(code.as_str(), "260140207");
}

#[test]
fn test_validate_only_discards() {
    let registry = registry::global();
    assert!(registry.validate_only("IBAN", &[Arg::from("GB82WEST12345698765432")]).is_ok());
    assert!(registry.validate_only("IBAN", &[Arg::from("GB00WEST12345698765432")]).is_err());
    assert!(
        registry
            .validate_type_only::<InstitutionCode>(&[Arg::from(260_140_207_i64)])
            .is_ok()
    );
}

#[test]
fn test_registry_self_consistency() {
    let registry = registry::global();
    for samples in fixtures::all_samples() {
        for raw in samples.valid.iter().chain(samples.invalid) {
            let outcomes = registry.validate_all(&[Arg::from(*raw)]);
            assert_eq!(outcomes.len(), registry.len());

            let own = outcomes
                .iter()
                .find(|outcome| outcome.type_name == samples.type_name)
                .unwrap();
            assert_eq!(
                own.is_accepted(),
                samples.valid.contains(raw),
                "{} on {}",
                samples.type_name,
                raw
            );

            let text = outcomes.iter().find(|o| o.type_name == "Text").unwrap();
            assert!(text.is_accepted());
        }
    }
}

#[test]
fn test_custom_registration() {
    let mut registry = ValueTypeRegistry::with_defaults();
    registry.register_by_name(
        "Reference",
        Constructor::text(|raw: &str| Text::new(&format!("REF-{}", raw)).map(Arc::new)),
    );
    let value = registry
        .construct("Reference", &[Arg::from("42")])
        .unwrap();
    assert_eq!(value.to_string(), "REF-42");
    assert!(registry.contains("Reference"));
    assert!(!registry::global().contains("Reference"));
}
