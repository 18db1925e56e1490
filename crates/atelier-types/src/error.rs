//! Unified error interface for atelier.
//!
//! Every error enum in the workspace implements [`ErrorCode`] so that the
//! CLI (and anything built on the runtime) can report a stable,
//! machine-readable code next to the human message.
//!
//! # Example
//!
//! ```
//! use atelier_types::ErrorCode;
//!
//! #[derive(Debug)]
//! enum LookupError {
//!     NotFound(String),
//!     Ambiguous,
//! }
//!
//! impl ErrorCode for LookupError {
//!     fn code(&self) -> &'static str {
//!         match self {
//!             Self::NotFound(_) => "LOOKUP_NOT_FOUND",
//!             Self::Ambiguous => "LOOKUP_AMBIGUOUS",
//!         }
//!     }
//!
//!     fn is_recoverable(&self) -> bool {
//!         matches!(self, Self::Ambiguous)
//!     }
//! }
//!
//! let err = LookupError::Ambiguous;
//! assert_eq!(err.code(), "LOOKUP_AMBIGUOUS");
//! assert!(err.is_recoverable());
//! ```

/// Machine-readable error code plus recoverability.
///
/// # Code Format
///
/// - **UPPER_SNAKE_CASE**, e.g. `"ACCESS_CAPABILITY_DENIED"`
/// - **Prefixed** by the owning layer (`ACCESS_`, `STATE_`, `CONFIG_`, `SEED_`)
/// - **Stable** once published
///
/// An error is recoverable when the user can fix it without a code or
/// config change (retyping a name, picking another project). Permission
/// denials are not recoverable: they need a different role.
pub trait ErrorCode {
    /// Returns the machine-readable error code.
    fn code(&self) -> &'static str;

    /// Returns whether the caller can reasonably retry with different input.
    fn is_recoverable(&self) -> bool;
}

/// Asserts that an error code follows the workspace conventions.
///
/// # Panics
///
/// Panics if the code is empty, lacks `expected_prefix`, or is not
/// UPPER_SNAKE_CASE.
///
/// # Example
///
/// ```
/// use atelier_types::{ErrorCode, assert_error_code};
///
/// struct Denied;
///
/// impl ErrorCode for Denied {
///     fn code(&self) -> &'static str { "ACCESS_DENIED" }
///     fn is_recoverable(&self) -> bool { false }
/// }
///
/// assert_error_code(&Denied, "ACCESS_");
/// ```
pub fn assert_error_code<E: ErrorCode>(err: &E, expected_prefix: &str) {
    let code = err.code();

    assert!(!code.is_empty(), "Error code must not be empty");
    assert!(
        code.starts_with(expected_prefix),
        "Error code '{}' must start with prefix '{}'",
        code,
        expected_prefix
    );
    assert!(
        is_upper_snake_case(code),
        "Error code '{}' must be UPPER_SNAKE_CASE",
        code
    );
}

/// Validates a batch of error codes, typically every variant of an enum.
pub fn assert_error_codes<E: ErrorCode>(errors: &[E], expected_prefix: &str) {
    for err in errors {
        assert_error_code(err, expected_prefix);
    }
}

fn is_upper_snake_case(s: &str) -> bool {
    if s.is_empty() || s.starts_with('_') || s.ends_with('_') || s.contains("__") {
        return false;
    }
    s.chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}
