//! Usage-error types.
//!
//! These cover the errors the library itself produces: resolving a future
//! with itself, or handing a combinator a non-iterable input. They are
//! always delivered as the rejection reason of some future, never raised
//! out of a core call.

use thiserror::Error;

/// The category of a library usage error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value had the wrong shape, e.g. self-resolution or a non-iterable
    /// combinator input.
    TypeError,
    /// An internal invariant was violated.
    InternalError,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::TypeError => write!(f, "TypeError"),
            ErrorKind::InternalError => write!(f, "InternalError"),
        }
    }
}

/// A usage error with its category and a human-readable message.
///
/// # Examples
///
/// ```
/// use core_types::{CoreError, ErrorKind};
///
/// let error = CoreError::type_error("int is not iterable");
/// assert_eq!(error.kind, ErrorKind::TypeError);
/// assert_eq!(error.to_string(), "TypeError: int is not iterable");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct CoreError {
    /// The category of the error.
    pub kind: ErrorKind,
    /// Human-readable error message.
    pub message: String,
}

impl CoreError {
    /// Creates a `TypeError`-kind error.
    pub fn type_error(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::TypeError,
            message: message.into(),
        }
    }

    /// Creates an `InternalError`-kind error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InternalError,
            message: message.into(),
        }
    }
}
