//! Continuation callbacks and the shared one-shot flag.

use core_types::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A user continuation: consumes the settled payload, produces the next
/// payload or a rejection reason.
///
/// Failure is an `Err(Value)` return, never a raised error; the core feeds
/// `Ok` into the dependent future's settlement and `Err` into its rejection.
pub struct Callback {
    callback: Box<dyn FnOnce(Value) -> Result<Value, Value> + Send>,
}

impl Callback {
    /// Creates a new Callback from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Value) -> Result<Value, Value> + Send + 'static,
    {
        Self {
            callback: Box::new(f),
        }
    }

    /// Invokes the callback with the settled payload, consuming it.
    pub fn call(self, value: Value) -> Result<Value, Value> {
        (self.callback)(value)
    }
}

impl std::fmt::Debug for Callback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Callback {{ ... }}")
    }
}

/// The "already fired" flag shared by a callback pair.
///
/// Exactly one of two callbacks may take effect, exactly once: both sides
/// (and the subscription-failure path) race for a single flag instead of
/// capturing independent state.
#[derive(Clone, Debug, Default)]
pub(crate) struct OneShot {
    fired: Arc<AtomicBool>,
}

impl OneShot {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns true for the first caller only.
    pub(crate) fn claim(&self) -> bool {
        !self.fired.swap(true, Ordering::SeqCst)
    }
}
