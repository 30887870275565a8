//! Immutable, self-validating value types for domain identifiers.
//!
//! Wraps primitive data (bank account numbers, tax identifiers, institution
//! codes, UUIDs) in types that can only hold input which passed a
//! type-specific validation rule.
//!
//! # Core Components
//!
//! - [`Validator`] - Contract every validation strategy implements
//! - [`Checksum`] - Check digit algorithms shared by identifier formats
//! - [`CanonicalCache`] - Weakly-held store deduplicating equal values
//! - [`Value`] and [`ValueType`] - Base for the concrete types in [`value`]
//! - [`ValueTypeRegistry`] - Construction by name with fuzzy matching
//! - [`codec`] - Canonical and compact text forms of 128-bit identifiers
//!
//! # Quick Start
//!
//! ```rust
//! use checked_values::registry::{self, Arg};
//! use checked_values::value::Iban;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let iban = Iban::of("DE89 3704 0044 0532 0130 00")?;
//! assert_eq!(iban.country_code(), "DE");
//!
//! let bic = registry::global().construct("BIC", &[Arg::from("MARKDEFF")])?;
//! assert_eq!(bic.type_name(), "BIC");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod cache;
pub mod checksum;
pub mod codec;
pub mod config;
pub mod error;
pub mod registry;
pub mod validator;
pub mod value;

// Re-export commonly used types for convenience
pub use cache::CanonicalCache;
pub use checksum::Checksum;
pub use config::{CacheConfig, EngineConfig, RegistryConfig};
pub use error::{
    ArgumentResult, ConfigError, ConfigResult, InvalidArgument, ValidationError, ValidationResult,
};
pub use registry::{Arg, ArgKind, Constructor, Registrable, ValueTypeRegistry};
pub use validator::{NullValidator, Validator};
pub use value::{Value, ValueType};
