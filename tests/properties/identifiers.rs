//! Identifier encodings over arbitrary 128-bit values.

use checked_values::codec;
use checked_values::value::Identifier;
use proptest::prelude::*;
use uuid::Uuid;

proptest! {
    #[test]
    fn prop_compact_form_round_trips(bytes in any::<[u8; 16]>()) {
        let id = Identifier::from_bytes(&bytes).unwrap();
        let compact = id.to_compact_string();
        prop_assert_eq!(compact.len(), 22);
        prop_assert!(compact.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
        prop_assert_eq!(Identifier::new(&compact).unwrap(), id);
    }

    #[test]
    fn prop_canonical_form_round_trips(bytes in any::<[u8; 16]>()) {
        let id = Identifier::from_uuid(Uuid::from_bytes(bytes));
        let canonical = id.to_string();
        prop_assert_eq!(&canonical, &canonical.to_lowercase());
        prop_assert_eq!(Identifier::new(&canonical).unwrap(), id);
    }

    #[test]
    fn prop_signed_integer_round_trips(value in any::<i128>()) {
        let id = Identifier::from_integer(value);
        prop_assert_eq!(id.to_signed_integer(), value);
        prop_assert_eq!(
            codec::to_unsigned_integer(id.as_bytes()),
            u128::from_be_bytes(value.to_be_bytes())
        );
    }

    #[test]
    fn prop_integer_bytes_keep_low_order(bytes in prop::collection::vec(any::<u8>(), 0..40)) {
        let fitted = codec::from_integer_bytes(&bytes);
        let keep = bytes.len().min(16);
        prop_assert_eq!(&fitted[16 - keep..], &bytes[bytes.len() - keep..]);
        prop_assert!(fitted[..16 - keep].iter().all(|b| *b == 0));
    }

    #[test]
    fn prop_short_compact_strings_rejected(raw in "[A-Za-z0-9_-]{0,21}") {
        prop_assert!(codec::from_compact_string(&raw).is_err());
    }
}
