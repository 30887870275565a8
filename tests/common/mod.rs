//! Common test utilities for value type testing.
//!
//! Provides assertion macros over [`InvalidArgument`] and sample inputs for
//! every built-in type.
//!
//! [`InvalidArgument`]: checked_values::InvalidArgument


/// Assert that a result failed with a specific [`ValidationError`] cause.
///
/// [`ValidationError`]: checked_values::ValidationError
#[macro_export]
macro_rules! assert_invalid_argument {
    ($result:expr, $cause:pat) => {
        match $result {
            Err(err) => assert!(
                matches!(err.cause(), $cause),
                "Expected cause {}, got {:?}",
                stringify!($cause),
                err.cause()
            ),
            Ok(value) => panic!(
                "Expected invalid argument {}, but construction passed with {:?}",
                stringify!($cause),
                value
            ),
        }
    };
}

/// Assert that an error names the rejected value and its context.
#[macro_export]
macro_rules! assert_error_reports {
    ($result:expr, $value:expr, $context:expr) => {
        match $result {
            Err(err) => {
                assert_eq!(err.value(), Some($value), "rejected value in '{}'", err);
                assert_eq!(err.context(), $context, "context in '{}'", err);
                let message = err.to_string();
                assert!(message.contains($value), "'{}' lacks '{}'", message, $value);
                assert!(message.contains($context), "'{}' lacks '{}'", message, $context);
            }
            Ok(value) => panic!("Expected an error, but got {:?}", value),
        }
    };
}

/// Assert that construction succeeded.
#[macro_export]
macro_rules! assert_constructs {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(err) => panic!("Expected construction to succeed, but got error: {}", err),
        }
    };
}
