//! Dynamic value representation shared by every component.
//!
//! The library moves arbitrary payloads through futures, so values are a
//! closed tagged enum rather than a generic parameter: heterogeneous input
//! sequences and thenable duck-typing both require a runtime-tagged
//! representation.

use crate::{AggregateError, CoreError, Settlement, Thenable};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Any payload a future can carry.
///
/// Primitive payloads are stored inline. Host objects travel behind an
/// opaque `Arc<dyn Any>` (native futures use this variant), and foreign
/// thenables behind the [`Thenable`] capability trait.
///
/// # Examples
///
/// ```
/// use core_types::Value;
///
/// let value = Value::Int(42);
/// assert_eq!(value.type_of(), "int");
/// assert_eq!(value.to_string(), "42");
/// ```
#[derive(Clone)]
pub enum Value {
    /// Absence of a value; the default payload.
    Undefined,
    /// Explicit null payload.
    Null,
    /// Boolean payload.
    Boolean(bool),
    /// Integer payload.
    Int(i64),
    /// Floating point payload.
    Float(f64),
    /// String payload.
    Str(String),
    /// Ordered list payload, produced by `all` and `all_settled`.
    List(Vec<Value>),
    /// A library usage error, e.g. a self-resolution `TypeError`.
    Error(CoreError),
    /// A bundle of failure reasons, produced by `any`.
    Aggregate(Box<AggregateError>),
    /// A per-input settlement record, produced by `all_settled`.
    Settlement(Box<Settlement>),
    /// Opaque host object (native futures travel in this variant).
    Object(Arc<dyn Any + Send + Sync>),
    /// A foreign value exposing the continuation-registration capability.
    Thenable(Arc<dyn Thenable>),
}

impl Value {
    /// Returns the name of this value's variant, used in diagnostics and
    /// `TypeError` messages.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::Value;
    ///
    /// assert_eq!(Value::Undefined.type_of(), "undefined");
    /// assert_eq!(Value::List(vec![]).type_of(), "list");
    /// ```
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Error(_) => "error",
            Value::Aggregate(_) => "aggregate error",
            Value::Settlement(_) => "settlement",
            Value::Object(_) => "object",
            Value::Thenable(_) => "thenable",
        }
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Str(text.to_string())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Value::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Value::Float(n) => f.debug_tuple("Float").field(n).finish(),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Error(e) => f.debug_tuple("Error").field(e).finish(),
            Value::Aggregate(e) => f.debug_tuple("Aggregate").field(e).finish(),
            Value::Settlement(s) => f.debug_tuple("Settlement").field(s).finish(),
            Value::Object(_) => write!(f, "Object(...)"),
            Value::Thenable(_) => write!(f, "Thenable(...)"),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Aggregate(a), Value::Aggregate(b)) => a == b,
            (Value::Settlement(a), Value::Settlement(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Thenable(a), Value::Thenable(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Str(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Error(e) => write!(f, "{}", e),
            Value::Aggregate(e) => write!(f, "{}", e),
            Value::Settlement(s) => write!(f, "{}", s),
            Value::Object(_) => write!(f, "[object]"),
            Value::Thenable(_) => write!(f, "[thenable]"),
        }
    }
}
