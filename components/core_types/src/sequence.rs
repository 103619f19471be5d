//! Construction-time ingestion of heterogeneous inputs.
//!
//! Combinators accept a single [`Value`] and iterate it into an ordered
//! sequence up front. Only lists and strings are iterable; anything else is
//! a `TypeError`, which callers surface by rejecting the output future.

use crate::{CoreError, Value};

/// Converts an iterable value into an ordered sequence of items.
///
/// Lists yield their elements in order. Strings yield one single-character
/// string per character. Every other variant fails with a `TypeError`.
///
/// # Examples
///
/// ```
/// use core_types::{to_ordered_sequence, Value};
///
/// let items = to_ordered_sequence(&Value::List(vec![Value::Int(1)])).unwrap();
/// assert_eq!(items, vec![Value::Int(1)]);
///
/// assert!(to_ordered_sequence(&Value::Int(1)).is_err());
/// ```
pub fn to_ordered_sequence(input: &Value) -> Result<Vec<Value>, CoreError> {
    match input {
        Value::List(items) => Ok(items.clone()),
        Value::Str(text) => Ok(text
            .chars()
            .map(|c| Value::Str(c.to_string()))
            .collect()),
        other => Err(CoreError::type_error(format!(
            "{} is not iterable",
            other.type_of()
        ))),
    }
}
