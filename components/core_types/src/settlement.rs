//! Per-input settlement records, the `all_settled` result payload.

use crate::Value;

/// How one input settled: fulfilled with a value or rejected with a reason.
///
/// # Examples
///
/// ```
/// use core_types::{Settlement, Value};
///
/// let record = Settlement::Fulfilled { value: Value::Int(1) };
/// assert_eq!(record.status(), "fulfilled");
/// assert_eq!(record.value(), Some(&Value::Int(1)));
/// assert_eq!(record.reason(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Settlement {
    /// The input fulfilled with a value.
    Fulfilled {
        /// The fulfillment value.
        value: Value,
    },
    /// The input rejected with a reason.
    Rejected {
        /// The rejection reason.
        reason: Value,
    },
}

impl Settlement {
    /// Returns `"fulfilled"` or `"rejected"`.
    pub fn status(&self) -> &'static str {
        match self {
            Settlement::Fulfilled { .. } => "fulfilled",
            Settlement::Rejected { .. } => "rejected",
        }
    }

    /// Returns the fulfillment value, if fulfilled.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Settlement::Fulfilled { value } => Some(value),
            Settlement::Rejected { .. } => None,
        }
    }

    /// Returns the rejection reason, if rejected.
    pub fn reason(&self) -> Option<&Value> {
        match self {
            Settlement::Fulfilled { .. } => None,
            Settlement::Rejected { reason } => Some(reason),
        }
    }

    /// Returns true if this records a fulfillment.
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Settlement::Fulfilled { .. })
    }

    /// Returns true if this records a rejection.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Settlement::Rejected { .. })
    }
}

impl std::fmt::Display for Settlement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Settlement::Fulfilled { value } => write!(f, "{{fulfilled: {}}}", value),
            Settlement::Rejected { reason } => write!(f, "{{rejected: {}}}", reason),
        }
    }
}
