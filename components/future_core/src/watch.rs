//! Uniform observation of a heterogeneous input sequence.
//!
//! Every item is one of three shapes: a native future, a foreign thenable,
//! or a plain value treated as already fulfilled with itself. Per index,
//! exactly one observer fires, at most once, and always inside a dispatcher
//! task.

use crate::callback::{Callback, OneShot};
use crate::future::{Future, Reaction};
use async_dispatch::{Dispatcher, Task};
use core_types::{SettleFn, Thenable, Value};
use std::sync::Arc;

/// The closed classification of an input item.
enum Input {
    Native(Future),
    Foreign(Arc<dyn Thenable>),
    Plain(Value),
}

fn classify(value: Value) -> Input {
    if let Some(future) = Future::from_value(&value) {
        return Input::Native(future);
    }
    match value {
        Value::Thenable(thenable) => Input::Foreign(thenable),
        other => Input::Plain(other),
    }
}

/// Attaches fulfillment/rejection observers to every item of `items`.
///
/// For each index `i`, exactly one of `on_fulfilled_at(i, value)` /
/// `on_rejected_at(i, reason)` fires, at most once per index, never inside
/// the current synchronous execution. A thenable whose subscription fails
/// reports the failure through `on_rejected_at`, unless one of its
/// callbacks already fired.
pub fn watch<F, R>(
    dispatcher: &Dispatcher,
    items: Vec<Value>,
    on_fulfilled_at: F,
    on_rejected_at: R,
) where
    F: Fn(usize, Value) + Send + Sync + 'static,
    R: Fn(usize, Value) + Send + Sync + 'static,
{
    let on_fulfilled_at = Arc::new(on_fulfilled_at);
    let on_rejected_at = Arc::new(on_rejected_at);

    for (index, item) in items.into_iter().enumerate() {
        match classify(item) {
            Input::Native(future) => {
                // A native future settles at most once; no extra guard needed.
                let fulfilled = on_fulfilled_at.clone();
                let rejected = on_rejected_at.clone();
                future.register(Reaction {
                    on_fulfilled: Some(Callback::new(move |value| {
                        fulfilled(index, value);
                        Ok(Value::Undefined)
                    })),
                    on_rejected: Some(Callback::new(move |reason| {
                        rejected(index, reason);
                        Ok(Value::Undefined)
                    })),
                    target: None,
                });
            }
            Input::Foreign(thenable) => {
                let pair = OneShot::new();
                let fulfil_guard = pair.clone();
                let reject_guard = pair.clone();
                let fulfil_dispatcher = dispatcher.clone();
                let reject_dispatcher = dispatcher.clone();
                let fulfilled = on_fulfilled_at.clone();
                let rejected = on_rejected_at.clone();

                let on_fulfilled: SettleFn = Box::new(move |value| {
                    fulfil_dispatcher.schedule(Task::new(move || {
                        if fulfil_guard.claim() {
                            fulfilled(index, value);
                        }
                    }));
                });
                let on_rejected: SettleFn = Box::new(move |reason| {
                    reject_dispatcher.schedule(Task::new(move || {
                        if reject_guard.claim() {
                            rejected(index, reason);
                        }
                    }));
                });

                if let Err(error) = thenable.subscribe(on_fulfilled, on_rejected) {
                    let rejected = on_rejected_at.clone();
                    dispatcher.schedule(Task::new(move || {
                        if pair.claim() {
                            rejected(index, error);
                        }
                    }));
                }
            }
            Input::Plain(value) => {
                let fulfilled = on_fulfilled_at.clone();
                dispatcher.schedule(Task::new(move || fulfilled(index, value)));
            }
        }
    }
}
