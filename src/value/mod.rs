//! Immutable, self-validating value types.
//!
//! Every value type wraps a [`Value`], a payload paired with the validator
//! that accepted it. Validation happens once, at construction; there is no
//! mutation path afterwards. Equality and hashing look at the payload only,
//! so the same payload accepted by two different validators compares equal.
//!
//! ## Usage Pattern
//!
//! ```rust
//! use checked_values::value::{Bic, Iban};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Explicit validation at construction
//!     let iban = Iban::new("DE89 3704 0044 0532 0130 00")?;
//!     assert_eq!(iban.to_string(), "DE89370400440532013000");
//!
//!     // Cached factory: equal input yields the same instance
//!     let a = Bic::of("MARKDEFF")?;
//!     let b = Bic::of("MARKDEFF")?;
//!     assert!(Arc::ptr_eq(&a, &b));
//!     Ok(())
//! }
//! ```
mod bic;
mod iban;
mod identifier;
mod institution_code;
mod tax_id;
mod text;
mod vat_id;

pub use bic::Bic;
pub use iban::Iban;
pub use identifier::Identifier;
pub use institution_code::InstitutionCode;
pub use tax_id::TaxId;
pub use text::Text;
pub use vat_id::{VatId, VatIdValidator};

use crate::error::{ArgumentResult, ValidationError, ValidationResult};
use crate::validator::{NullValidator, Validator};
use serde_json::{Map, Value as JsonValue};
use std::any::Any;
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A validated payload together with the validator that accepted it.
///
/// The payload type is named by its borrowed form (`str`, `[u8]`, `Uuid`),
/// the value owns `P::Owned`.
pub struct Value<P: ?Sized + ToOwned> {
    payload: P::Owned,
    validator: Arc<dyn Validator<P>>,
}

impl<P: ?Sized + ToOwned> Value<P> {
    /// Validate `payload` and wrap it.
    ///
    /// Failures are reported as [`InvalidArgument`](crate::error::InvalidArgument)
    /// labelled with `context`.
    pub fn new(
        context: &str,
        payload: P::Owned,
        validator: Arc<dyn Validator<P>>,
    ) -> ArgumentResult<Self> {
        validator
            .verify(payload.borrow())
            .map_err(|e| e.with_context(context))?;
        Ok(Self { payload, validator })
    }

    /// Wrap `payload` without validation.
    ///
    /// Intended for sentinel values that carry invalid input along for later
    /// error reporting.
    pub fn unchecked(payload: P::Owned) -> Self {
        Self {
            payload,
            validator: Arc::new(NullValidator),
        }
    }

    pub fn payload(&self) -> &P {
        self.payload.borrow()
    }

    pub fn into_payload(self) -> P::Owned {
        self.payload
    }

    pub fn validator(&self) -> &dyn Validator<P> {
        self.validator.as_ref()
    }

    /// Re-run the validator. Always true unless built with a null validator.
    pub fn is_valid(&self) -> bool {
        self.validator.is_valid(self.payload())
    }
}

impl<P> Clone for Value<P>
where
    P: ?Sized + ToOwned,
    P::Owned: Clone,
{
    fn clone(&self) -> Self {
        Self {
            payload: self.payload.clone(),
            validator: Arc::clone(&self.validator),
        }
    }
}

impl<P: ?Sized + ToOwned + PartialEq> PartialEq for Value<P> {
    fn eq(&self, other: &Self) -> bool {
        self.payload() == other.payload()
    }
}

impl<P: ?Sized + ToOwned + Eq> Eq for Value<P> {}

impl<P: ?Sized + ToOwned + Hash> Hash for Value<P> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.payload().hash(state);
    }
}

impl<P: ?Sized + ToOwned + fmt::Debug> fmt::Debug for Value<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("payload", &self.payload())
            .field("validator", &self.validator)
            .finish()
    }
}

impl<P: ?Sized + ToOwned + fmt::Display> fmt::Display for Value<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.payload(), f)
    }
}

/// Object-safe surface shared by all concrete value types.
///
/// The registry hands out `Arc<dyn ValueType>`; use [`ValueType::as_any`] or
/// [`ValueType::into_any`] to get back to the concrete type.
pub trait ValueType: fmt::Debug + fmt::Display + Send + Sync + Any {
    /// Registered name of the type
    fn type_name(&self) -> &'static str;

    /// Named components of composite values.
    fn to_map(&self) -> ValidationResult<Map<String, JsonValue>> {
        Err(ValidationError::not_implemented("to_map", self.type_name()))
    }

    /// Canonical form as JSON
    fn to_json(&self) -> JsonValue {
        JsonValue::String(self.to_string())
    }

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

/// Strip all whitespace and upper-case, the normal form of most identifiers.
pub(crate) fn compact_upper(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Helper macro wiring a value type into the engine.
///
/// The type must be a newtype over [`Value`] whose payload displays as the
/// canonical form, and must provide `fn new(&str) -> ArgumentResult<Self>`.
/// The macro adds the cached `of` factory, `is_valid`, `Display`, `FromStr`,
/// `TryFrom`, serde support and the [`ValueType`] and
/// [`Registrable`](crate::registry::Registrable) impls.
#[macro_export]
macro_rules! impl_value_type {
    (
        $type:ident,
        name: $name:expr,
        constructors: [$($ctor:expr),+ $(,)?]
        $(, to_map: $to_map:path)?
        $(,)?
    ) => {
        impl $type {
            /// Canonical instance for `raw`, shared while any reference is alive.
            pub fn of(raw: &str) -> $crate::error::ArgumentResult<::std::sync::Arc<Self>> {
                Self::canonical_cache().get_or_create(raw, Self::new)
            }

            /// The canonical cache behind [`Self::of`].
            pub fn canonical_cache() -> &'static $crate::cache::CanonicalCache<String, Self> {
                static CACHE: ::std::sync::OnceLock<$crate::cache::CanonicalCache<String, $type>> =
                    ::std::sync::OnceLock::new();
                CACHE.get_or_init(|| {
                    $crate::cache::CanonicalCache::with_config($crate::cache::global_config().clone())
                })
            }

            /// Whether `raw` would be accepted by [`Self::new`].
            pub fn is_valid(raw: &str) -> bool {
                Self::new(raw).is_ok()
            }
        }

        impl ::std::fmt::Display for $type {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl ::std::str::FromStr for $type {
            type Err = $crate::error::InvalidArgument;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<&str> for $type {
            type Error = $crate::error::InvalidArgument;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<String> for $type {
            type Error = $crate::error::InvalidArgument;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(&value)
            }
        }

        impl ::serde::Serialize for $type {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.collect_str(self)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $type {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let value = <String as ::serde::Deserialize>::deserialize(deserializer)?;
                Self::new(&value).map_err(::serde::de::Error::custom)
            }
        }

        impl $crate::value::ValueType for $type {
            fn type_name(&self) -> &'static str {
                $name
            }

            $(
                fn to_map(
                    &self,
                ) -> $crate::error::ValidationResult<::serde_json::Map<String, ::serde_json::Value>> {
                    Ok($to_map(self))
                }
            )?

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn into_any(
                self: ::std::sync::Arc<Self>,
            ) -> ::std::sync::Arc<dyn ::std::any::Any + Send + Sync> {
                self
            }
        }

        impl $crate::registry::Registrable for $type {
            const NAME: &'static str = $name;

            fn constructors() -> Vec<$crate::registry::Constructor> {
                vec![$($ctor),+]
            }
        }
    };
}
