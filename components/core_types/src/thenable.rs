//! The foreign-thenable capability.
//!
//! A thenable is any value exposing the minimal continuation-registration
//! capability, independent of its concrete type. It is modeled as a trait
//! object rather than a type hierarchy: the resolution procedure only asks
//! "can I hand this value a callback pair".

use crate::Value;

/// A one-shot settlement callback handed to a thenable.
///
/// `FnOnce` makes calling the same callback twice unrepresentable; a
/// misbehaving thenable can still invoke *both* callbacks of the pair,
/// which the core guards against with a shared one-shot flag.
pub type SettleFn = Box<dyn FnOnce(Value) + Send>;

/// A foreign value that can register continuations.
///
/// `subscribe` is invoked at most once per resolution. It may call either
/// callback synchronously or hold onto them and call one later. Returning
/// `Err` models a thenable whose continuation capability itself fails; the
/// error becomes the rejection reason of the observing future unless one of
/// the callbacks already fired.
pub trait Thenable: Send + Sync {
    /// Registers the fulfillment and rejection continuations.
    fn subscribe(&self, on_fulfilled: SettleFn, on_rejected: SettleFn) -> Result<(), Value>;
}

/// A [`Thenable`] backed by a closure, for hosts and tests.
///
/// # Examples
///
/// ```
/// use core_types::{FnThenable, Value};
/// use std::sync::Arc;
///
/// let thenable = FnThenable::new(|on_fulfilled, _on_rejected| {
///     on_fulfilled(Value::Int(5));
///     Ok(())
/// });
/// let value = Value::Thenable(Arc::new(thenable));
/// assert_eq!(value.type_of(), "thenable");
/// ```
pub struct FnThenable<F>
where
    F: Fn(SettleFn, SettleFn) -> Result<(), Value> + Send + Sync,
{
    subscribe: F,
}

impl<F> FnThenable<F>
where
    F: Fn(SettleFn, SettleFn) -> Result<(), Value> + Send + Sync,
{
    /// Wraps a subscription closure.
    pub fn new(subscribe: F) -> Self {
        Self { subscribe }
    }
}

impl<F> Thenable for FnThenable<F>
where
    F: Fn(SettleFn, SettleFn) -> Result<(), Value> + Send + Sync,
{
    fn subscribe(&self, on_fulfilled: SettleFn, on_rejected: SettleFn) -> Result<(), Value> {
        (self.subscribe)(on_fulfilled, on_rejected)
    }
}
