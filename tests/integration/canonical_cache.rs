//! Canonical instances handed out by `of`.
//!
//! Value-type caches are process wide, so every test here works on inputs no
//! other test in this binary requests.

use checked_values::CanonicalCache;
use checked_values::value::{Bic, Iban, InstitutionCode, TaxId};
use std::sync::Arc;

#[test]
fn test_of_is_idempotent() {
    let a = TaxId::of("86095742719").unwrap();
    let b = TaxId::of("86095742719").unwrap();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_of_keys_on_raw_input() {
    // Different raw spellings normalize to equal values but are cached apart
    let compact = Bic::of("HELADEF1822").unwrap();
    let spaced = Bic::of("HELA DEF1 822").unwrap();
    assert_eq!(compact, spaced);
    assert!(!Arc::ptr_eq(&compact, &spaced));
}

#[test]
fn test_failed_construction_not_cached() {
    let before = Iban::canonical_cache().get("DE00123456780000000000");
    assert!(before.is_none());
    assert!(Iban::of("DE00123456780000000000").is_err());
    assert!(Iban::canonical_cache().get("DE00123456780000000000").is_none());
}

#[test]
fn test_discarded_value_is_rebuilt_equal() {
    let raw = Iban::from_bban("NL", "ABNA0417164300").unwrap().to_string();

    let first = Iban::of(&raw).unwrap();
    let snapshot = (*first).clone();
    let weak = Arc::downgrade(&first);
    drop(first);
    assert!(weak.upgrade().is_none());
    assert!(Iban::canonical_cache().get(raw.as_str()).is_none());

    let second = Iban::of(&raw).unwrap();
    assert_eq!(*second, snapshot);
}

#[test]
fn test_purge_after_release() {
    let cache: CanonicalCache<String, InstitutionCode> = CanonicalCache::new();
    let raws = ["260140207", "109102038"];
    let held: Vec<_> = raws
        .iter()
        .map(|raw| cache.get_or_create(*raw, InstitutionCode::new).unwrap())
        .collect();
    assert_eq!(cache.live_len(), 2);

    drop(held);
    assert_eq!(cache.live_len(), 0);
    assert_eq!(cache.purge(), 2);
    assert!(cache.is_empty());
}

#[test]
fn test_disabled_cache_still_validates() {
    let cache: CanonicalCache<String, InstitutionCode> = CanonicalCache::disabled();
    let a = cache.get_or_create("260140207", InstitutionCode::new).unwrap();
    let b = cache.get_or_create("260140207", InstitutionCode::new).unwrap();
    assert_eq!(a, b);
    assert!(!Arc::ptr_eq(&a, &b));
    assert!(cache.get_or_create("260140200", InstitutionCode::new).is_err());
}
