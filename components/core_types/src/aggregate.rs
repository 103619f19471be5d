//! The aggregate failure payload produced by `any`.

use crate::Value;

/// An error-shaped value wrapping an ordered sequence of underlying failure
/// reasons plus an optional message.
///
/// `any` rejects with one of these when every input rejects; the reasons
/// appear in input index order.
///
/// # Examples
///
/// ```
/// use core_types::{AggregateError, Value};
///
/// let error = AggregateError::new(vec![Value::Int(1), Value::Int(2)], None);
/// assert_eq!(error.errors(), vec![Value::Int(1), Value::Int(2)]);
/// assert!(!error.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateError {
    errors: Vec<Value>,
    message: Option<String>,
}

impl AggregateError {
    /// Creates an aggregate from the reasons in index order.
    pub fn new(errors: Vec<Value>, message: Option<String>) -> Self {
        Self { errors, message }
    }

    /// Returns a defensive copy of the underlying reasons, in order.
    pub fn errors(&self) -> Vec<Value> {
        self.errors.clone()
    }

    /// Returns the optional message.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the number of underlying reasons.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if there are no underlying reasons.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl std::fmt::Display for AggregateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(message) => write!(f, "AggregateError: {}", message),
            None => write!(f, "AggregateError: {} errors", self.errors.len()),
        }
    }
}

impl std::error::Error for AggregateError {}
