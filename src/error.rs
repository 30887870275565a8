//! Error types for value construction, validation and configuration.
//!
//! Validation happens in two layers. Validators report a [`ValidationError`],
//! which is the internal, expected failure kind that [`Validator::is_valid`]
//! downgrades to a boolean. Public constructors and the registry translate
//! that into an [`InvalidArgument`], so callers at an API boundary only ever
//! see one error family.
//!
//! [`Validator::is_valid`]: crate::validator::Validator::is_valid

/// Validation errors raised by validators, checksum algorithms and the codec.
///
/// Every value-related variant carries the rejected input and the semantic
/// context (field or type name) it was validated for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Input cannot be interpreted as the expected shape at all
    #[error("Invalid {context} '{value}': {reason}")]
    InvalidValue {
        value: String,
        context: String,
        reason: String,
    },

    /// Fixed-length precondition failed
    #[error("Invalid {context} '{value}': expected length {expected}, got {actual}")]
    InvalidLength {
        value: String,
        context: String,
        expected: String,
        actual: usize,
    },

    /// Input is well-formed but its check digit does not match
    #[error("Invalid {context} '{value}': check digit is '{actual}', expected '{expected}'")]
    InvalidCheckDigit {
        value: String,
        context: String,
        expected: String,
        actual: String,
    },

    /// Numeric value outside the permitted range
    #[error("Invalid {context} '{value}': must be between {min} and {max}")]
    OutOfRange {
        value: String,
        context: String,
        min: String,
        max: String,
    },

    /// No registered value type matches the requested name
    #[error("Unknown value type '{name}'")]
    UnknownType { name: String },

    /// No constructor overload accepts the supplied argument kinds
    #[error("No constructor of '{type_name}' accepts ({signature})")]
    NoMatchingConstructor {
        type_name: String,
        signature: String,
    },

    /// Operation not supported by this value type
    #[error("'{operation}' is not implemented for {type_name}")]
    NotImplemented {
        operation: String,
        type_name: String,
    },
}

/// Public-facing translation of a [`ValidationError`].
///
/// Raised by [`Validator::verify`](crate::validator::Validator::verify), by
/// every value-type constructor and by the registry. The wrapped cause keeps
/// the rejected value and field name for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid argument: {source}")]
pub struct InvalidArgument {
    #[source]
    source: ValidationError,
}

/// Errors raised while installing process-wide configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration was already installed or a cache was already created
    #[error("Configuration already initialized")]
    AlreadyInitialized,

    /// Fuzzy threshold outside (0.0, 1.0]
    #[error("Invalid fuzzy threshold {0}: must be in (0.0, 1.0]")]
    InvalidThreshold(f64),

    /// Configuration document could not be parsed
    #[error("Invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),
}

impl ValidationError {
    /// Create an invalid value error
    pub fn invalid_value(
        value: impl Into<String>,
        context: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            value: value.into(),
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid length error
    pub fn invalid_length(
        value: impl Into<String>,
        context: impl Into<String>,
        expected: impl Into<String>,
        actual: usize,
    ) -> Self {
        Self::InvalidLength {
            value: value.into(),
            context: context.into(),
            expected: expected.into(),
            actual,
        }
    }

    /// Create a check digit mismatch error
    pub fn invalid_check_digit(
        value: impl Into<String>,
        context: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidCheckDigit {
            value: value.into(),
            context: context.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an out of range error
    pub fn out_of_range(
        value: impl ToString,
        context: impl Into<String>,
        min: impl ToString,
        max: impl ToString,
    ) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
            context: context.into(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    /// Create a not implemented error
    pub fn not_implemented(operation: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::NotImplemented {
            operation: operation.into(),
            type_name: type_name.into(),
        }
    }

    /// The rejected input, if this error is about a concrete value.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::InvalidValue { value, .. }
            | Self::InvalidLength { value, .. }
            | Self::InvalidCheckDigit { value, .. }
            | Self::OutOfRange { value, .. } => Some(value),
            Self::UnknownType { name } => Some(name),
            Self::NoMatchingConstructor { .. } | Self::NotImplemented { .. } => None,
        }
    }

    /// The field or type name the value was validated for.
    pub fn context(&self) -> &str {
        match self {
            Self::InvalidValue { context, .. }
            | Self::InvalidLength { context, .. }
            | Self::InvalidCheckDigit { context, .. }
            | Self::OutOfRange { context, .. } => context,
            Self::UnknownType { .. } => "value type",
            Self::NoMatchingConstructor { type_name, .. } => type_name,
            Self::NotImplemented { type_name, .. } => type_name,
        }
    }

    /// Relabel the error with the semantic field name of the caller.
    ///
    /// Generic validators (checksums, length checks) only know their own
    /// name; value types use this to report e.g. `IBAN` instead of `Mod97`.
    pub fn with_context(mut self, new_context: impl Into<String>) -> Self {
        match &mut self {
            Self::InvalidValue { context, .. }
            | Self::InvalidLength { context, .. }
            | Self::InvalidCheckDigit { context, .. }
            | Self::OutOfRange { context, .. } => *context = new_context.into(),
            Self::UnknownType { .. }
            | Self::NoMatchingConstructor { .. }
            | Self::NotImplemented { .. } => {}
        }
        self
    }

    /// Replace the reported value, e.g. with the full input when a validator
    /// only saw part of it.
    pub fn with_value(mut self, new_value: impl Into<String>) -> Self {
        match &mut self {
            Self::InvalidValue { value, .. }
            | Self::InvalidLength { value, .. }
            | Self::InvalidCheckDigit { value, .. }
            | Self::OutOfRange { value, .. } => *value = new_value.into(),
            Self::UnknownType { .. }
            | Self::NoMatchingConstructor { .. }
            | Self::NotImplemented { .. } => {}
        }
        self
    }
}

impl InvalidArgument {
    /// The rejected input, if any.
    pub fn value(&self) -> Option<&str> {
        self.source.value()
    }

    /// The field or type name the argument was meant for.
    pub fn context(&self) -> &str {
        self.source.context()
    }

    /// The underlying validation failure.
    pub fn cause(&self) -> &ValidationError {
        &self.source
    }

    /// Relabel the wrapped failure with the caller's field name.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self {
            source: self.source.with_context(context),
        }
    }

    /// Consume the error and return the underlying validation failure.
    pub fn into_cause(self) -> ValidationError {
        self.source
    }
}

impl From<ValidationError> for InvalidArgument {
    fn from(source: ValidationError) -> Self {
        Self { source }
    }
}

// Result type aliases for convenience
pub type ValidationResult<T> = Result<T, ValidationError>;
pub type ArgumentResult<T> = Result<T, InvalidArgument>;
pub type ConfigResult<T> = Result<T, ConfigError>;
