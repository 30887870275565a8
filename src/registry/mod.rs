//! Name and type indexed construction of value types.
//!
//! The registry maps type names to constructor overloads. Each overload
//! declares the argument kinds it accepts, and construction picks the first
//! overload whose signature matches the runtime kinds of the supplied
//! arguments.
//!
//! Name lookups are forgiving: an unknown name is matched against the
//! registered names by edit distance, and when nothing is close enough the
//! arguments are wrapped as generic [`Text`] instead of failing.
//!
//! ```rust
//! use checked_values::registry::{self, Arg};
//!
//! let registry = registry::global();
//! let exact = registry.construct("BIC", &[Arg::from("MARKDEFF")]).unwrap();
//! let fuzzy = registry.construct("BIC1", &[Arg::from("MARKDEFF")]).unwrap();
//! assert_eq!(exact.type_name(), fuzzy.type_name());
//! ```

mod args;
pub mod fuzzy;

pub use args::{Arg, ArgKind, signature};

use crate::config::RegistryConfig;
use crate::error::{ArgumentResult, ConfigResult, InvalidArgument, ValidationError};
use crate::value::{Bic, Iban, Identifier, InstitutionCode, TaxId, Text, ValueType, VatId};
use log::{debug, info, warn};
use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use uuid::Uuid;

type BuildFn = dyn Fn(&[Arg]) -> ArgumentResult<Arc<dyn ValueType>> + Send + Sync;

/// One constructor overload with its declared argument signature.
#[derive(Clone)]
pub struct Constructor {
    signature: Vec<ArgKind>,
    build: Arc<BuildFn>,
}

impl Constructor {
    /// Overload for an arbitrary signature. `build` is only called with
    /// arguments matching `signature`.
    pub fn new<F>(signature: Vec<ArgKind>, build: F) -> Self
    where
        F: Fn(&[Arg]) -> ArgumentResult<Arc<dyn ValueType>> + Send + Sync + 'static,
    {
        Self {
            signature,
            build: Arc::new(build),
        }
    }

    /// Overload taking a single text argument.
    pub fn text<T, F>(build: F) -> Self
    where
        T: ValueType,
        F: Fn(&str) -> ArgumentResult<Arc<T>> + Send + Sync + 'static,
    {
        Self::new(vec![ArgKind::Text], move |args| match args {
            [Arg::Text(value)] => build(value.as_str()).map(|v| v as Arc<dyn ValueType>),
            _ => Err(mismatch::<T>(args)),
        })
    }

    /// Overload taking a single integer argument.
    pub fn integer<T, F>(build: F) -> Self
    where
        T: ValueType,
        F: Fn(i64) -> ArgumentResult<Arc<T>> + Send + Sync + 'static,
    {
        Self::new(vec![ArgKind::Integer], move |args| match args {
            [Arg::Integer(value)] => build(*value).map(|v| v as Arc<dyn ValueType>),
            _ => Err(mismatch::<T>(args)),
        })
    }

    /// Overload taking a single byte sequence.
    pub fn bytes<T, F>(build: F) -> Self
    where
        T: ValueType,
        F: Fn(&[u8]) -> ArgumentResult<Arc<T>> + Send + Sync + 'static,
    {
        Self::new(vec![ArgKind::Bytes], move |args| match args {
            [Arg::Bytes(value)] => build(value.as_slice()).map(|v| v as Arc<dyn ValueType>),
            _ => Err(mismatch::<T>(args)),
        })
    }

    /// Overload taking a single UUID.
    pub fn uuid<T, F>(build: F) -> Self
    where
        T: ValueType,
        F: Fn(Uuid) -> ArgumentResult<Arc<T>> + Send + Sync + 'static,
    {
        Self::new(vec![ArgKind::Uuid], move |args| match args {
            [Arg::Uuid(value)] => build(*value).map(|v| v as Arc<dyn ValueType>),
            _ => Err(mismatch::<T>(args)),
        })
    }

    pub fn signature(&self) -> &[ArgKind] {
        &self.signature
    }

    /// Whether the runtime kinds of `args` match this overload.
    pub fn accepts(&self, args: &[Arg]) -> bool {
        args.len() == self.signature.len()
            && args
                .iter()
                .zip(&self.signature)
                .all(|(arg, kind)| arg.kind() == *kind)
    }

    pub fn call(&self, args: &[Arg]) -> ArgumentResult<Arc<dyn ValueType>> {
        (self.build)(args)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

fn mismatch<T>(args: &[Arg]) -> InvalidArgument {
    ValidationError::NoMatchingConstructor {
        type_name: std::any::type_name::<T>().to_string(),
        signature: signature(args.iter().map(Arg::kind)),
    }
    .into()
}

/// A value type that can register itself.
///
/// Implemented by [`impl_value_type!`](crate::impl_value_type).
pub trait Registrable: ValueType + Sized {
    /// Registered name
    const NAME: &'static str;

    /// Constructor overloads, in resolution order.
    fn constructors() -> Vec<Constructor>;
}

/// Result of probing one registered type during batch validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub type_name: String,
    pub result: ArgumentResult<()>,
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug)]
struct TypeEntry {
    name: String,
    constructors: Vec<Constructor>,
}

impl TypeEntry {
    fn add(&mut self, constructor: Constructor) {
        match self
            .constructors
            .iter_mut()
            .find(|existing| existing.signature == constructor.signature)
        {
            Some(existing) => *existing = constructor,
            None => self.constructors.push(constructor),
        }
    }

    fn construct(&self, args: &[Arg]) -> ArgumentResult<Arc<dyn ValueType>> {
        let constructor = self
            .constructors
            .iter()
            .find(|constructor| constructor.accepts(args))
            .ok_or_else(|| ValidationError::NoMatchingConstructor {
                type_name: self.name.clone(),
                signature: signature(args.iter().map(Arg::kind)),
            })?;
        debug!(
            "Constructing {} via ({})",
            self.name,
            signature(constructor.signature.iter().copied())
        );
        constructor.call(args)
    }
}

/// Registry of value-type constructors.
///
/// Populated up front and read-only afterwards; registration takes `&mut self`.
#[derive(Debug, Default)]
pub struct ValueTypeRegistry {
    entries: Vec<TypeEntry>,
    by_name: HashMap<String, usize>,
    by_type: HashMap<TypeId, usize>,
    config: RegistryConfig,
}

impl ValueTypeRegistry {
    /// Create an empty registry with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding all built-in value types.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_defaults();
        registry
    }

    /// Like [`Self::with_defaults`] with custom settings.
    pub fn with_config(config: RegistryConfig) -> ConfigResult<Self> {
        config.validate()?;
        let mut registry = Self {
            config,
            ..Self::default()
        };
        registry.register_defaults();
        Ok(registry)
    }

    fn register_defaults(&mut self) {
        self.register::<Text>()
            .register::<Bic>()
            .register::<Iban>()
            .register::<TaxId>()
            .register::<VatId>()
            .register::<InstitutionCode>()
            .register::<Identifier>();
        info!("Registered {} built-in value types", self.len());
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Register all overloads of `T` under its name and type.
    pub fn register<T: Registrable>(&mut self) -> &mut Self {
        let index = self.entry_index(T::NAME);
        self.by_type.insert(TypeId::of::<T>(), index);
        for constructor in T::constructors() {
            self.entries[index].add(constructor);
        }
        self
    }

    /// Add a constructor under `name`, replacing an overload with the same
    /// signature.
    pub fn register_by_name(&mut self, name: &str, constructor: Constructor) -> &mut Self {
        let index = self.entry_index(name);
        self.entries[index].add(constructor);
        self
    }

    fn entry_index(&mut self, name: &str) -> usize {
        if let Some(index) = self.by_name.get(name) {
            return *index;
        }
        self.entries.push(TypeEntry {
            name: name.to_string(),
            constructors: Vec::new(),
        });
        let index = self.entries.len() - 1;
        self.by_name.insert(name.to_string(), index);
        index
    }

    /// Registered name for `name`: exact match first, then the closest
    /// fuzzy match above the configured threshold.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        if let Some(index) = self.by_name.get(name) {
            return Some(&self.entries[*index].name);
        }
        let (matched, score) = fuzzy::best_match(
            name,
            self.entries.iter().map(|entry| entry.name.as_str()),
            self.config.fuzzy_threshold,
        )?;
        debug!(
            "Resolved value type '{}' to '{}' (similarity {:.2})",
            name, matched, score
        );
        Some(matched)
    }

    /// Construct a value by type name.
    ///
    /// Unknown names fall back to fuzzy resolution and then to [`Text`],
    /// unless text fallback is disabled.
    pub fn construct(&self, name: &str, args: &[Arg]) -> ArgumentResult<Arc<dyn ValueType>> {
        if let Some(resolved) = self.resolve(name) {
            return self.entries[self.by_name[resolved]].construct(args);
        }
        if !self.config.fallback_to_text {
            return Err(ValidationError::UnknownType {
                name: name.to_string(),
            }
            .into());
        }
        warn!("Unknown value type '{}', constructing Text", name);
        let text = TypeEntry {
            name: Text::NAME.to_string(),
            constructors: Text::constructors(),
        };
        if text.constructors.iter().any(|c| c.accepts(args)) {
            return text.construct(args);
        }
        // Other argument shapes are wrapped in their rendered form
        let rendered = args
            .iter()
            .map(Arg::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        Ok(Text::of(&rendered)? as Arc<dyn ValueType>)
    }

    /// Construct a value of the registered type `T` by overload resolution.
    pub fn construct_type<T: Registrable>(&self, args: &[Arg]) -> ArgumentResult<Arc<T>> {
        let index = self
            .by_type
            .get(&TypeId::of::<T>())
            .ok_or_else(|| ValidationError::UnknownType {
                name: T::NAME.to_string(),
            })?;
        self.entries[*index]
            .construct(args)?
            .into_any()
            .downcast::<T>()
            .map_err(|_| {
                ValidationError::invalid_value(
                    T::NAME,
                    "value type",
                    "constructor produced a different type",
                )
                .into()
            })
    }

    /// Construct by name and discard the value.
    pub fn validate_only(&self, name: &str, args: &[Arg]) -> ArgumentResult<()> {
        self.construct(name, args).map(|_| ())
    }

    /// Construct by type and discard the value.
    pub fn validate_type_only<T: Registrable>(&self, args: &[Arg]) -> ArgumentResult<()> {
        self.construct_type::<T>(args).map(|_| ())
    }

    /// Probe every registered type with the same arguments.
    pub fn validate_all(&self, probe: &[Arg]) -> Vec<ValidationOutcome> {
        self.entries
            .iter()
            .map(|entry| ValidationOutcome {
                type_name: entry.name.clone(),
                result: entry.construct(probe).map(|_| ()),
            })
            .collect()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Declared signatures of the overloads registered under `name`.
    pub fn signatures(&self, name: &str) -> Vec<Vec<ArgKind>> {
        self.by_name
            .get(name)
            .map(|index| {
                self.entries[*index]
                    .constructors
                    .iter()
                    .map(|c| c.signature.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Process-wide registry with the built-in types, populated on first use.
pub fn global() -> &'static ValueTypeRegistry {
    static GLOBAL: OnceLock<ValueTypeRegistry> = OnceLock::new();
    GLOBAL.get_or_init(ValueTypeRegistry::with_defaults)
}
