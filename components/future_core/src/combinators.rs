//! Aggregate outcomes over many futures/thenables/values.
//!
//! All four combinators share one shape: create the output future, ingest
//! the input into an ordered sequence, then observe it through [`watch`]
//! with per-combinator aggregation state closed over the observer pair.
//! Only the aggregation policy differs. Every decisive settlement — empty
//! input and non-iterable input included — reaches the output through a
//! dispatcher hop.

use crate::callback::OneShot;
use crate::future::Future;
use crate::watch::watch;
use async_dispatch::{Dispatcher, Task};
use core_types::{to_ordered_sequence, AggregateError, Settlement, Value};
use parking_lot::Mutex;
use std::sync::Arc;

/// Ingests the combinator input, rejecting `output` with the `TypeError`
/// when it is not iterable.
fn ingest(dispatcher: &Dispatcher, output: &Future, input: Value) -> Option<Vec<Value>> {
    match to_ordered_sequence(&input) {
        Ok(items) => Some(items),
        Err(error) => {
            fail_later(dispatcher, output, Value::Error(error));
            None
        }
    }
}

fn settle_later(dispatcher: &Dispatcher, output: &Future, value: Value) {
    let output = output.clone();
    dispatcher.schedule(Task::new(move || output.settle(value)));
}

fn fail_later(dispatcher: &Dispatcher, output: &Future, reason: Value) {
    let output = output.clone();
    dispatcher.schedule(Task::new(move || output.fail(reason)));
}

/// Fulfills with every input's value in original order, or rejects with
/// the first observed rejection.
pub(crate) fn all(dispatcher: &Dispatcher, input: Value) -> Future {
    let output = Future::pending(dispatcher);
    let Some(items) = ingest(dispatcher, &output, input) else {
        return output;
    };
    if items.is_empty() {
        settle_later(dispatcher, &output, Value::List(Vec::new()));
        return output;
    }

    struct State {
        values: Vec<Value>,
        remaining: usize,
        rejected: bool,
    }
    let state = Arc::new(Mutex::new(State {
        values: vec![Value::Undefined; items.len()],
        remaining: items.len(),
        rejected: false,
    }));

    let fulfil_state = state.clone();
    let fulfil_output = output.clone();
    let reject_state = state;
    let reject_output = output.clone();
    watch(
        dispatcher,
        items,
        move |index, value| {
            let complete = {
                let mut state = fulfil_state.lock();
                if state.rejected {
                    None
                } else {
                    state.values[index] = value;
                    state.remaining -= 1;
                    if state.remaining == 0 {
                        Some(std::mem::take(&mut state.values))
                    } else {
                        None
                    }
                }
            };
            if let Some(values) = complete {
                fulfil_output.settle(Value::List(values));
            }
        },
        move |_, reason| {
            let first = {
                let mut state = reject_state.lock();
                !std::mem::replace(&mut state.rejected, true)
            };
            if first {
                reject_output.fail(reason);
            }
        },
    );
    output
}

/// Fulfills with a per-input [`Settlement`] record list in original order;
/// never rejects.
pub(crate) fn all_settled(dispatcher: &Dispatcher, input: Value) -> Future {
    let output = Future::pending(dispatcher);
    let Some(items) = ingest(dispatcher, &output, input) else {
        return output;
    };
    if items.is_empty() {
        settle_later(dispatcher, &output, Value::List(Vec::new()));
        return output;
    }

    struct State {
        records: Vec<Value>,
        remaining: usize,
    }
    let state = Arc::new(Mutex::new(State {
        records: vec![Value::Undefined; items.len()],
        remaining: items.len(),
    }));

    fn store(state: &Mutex<State>, index: usize, record: Settlement) -> Option<Vec<Value>> {
        let mut state = state.lock();
        state.records[index] = Value::Settlement(Box::new(record));
        state.remaining -= 1;
        if state.remaining == 0 {
            Some(std::mem::take(&mut state.records))
        } else {
            None
        }
    }

    let fulfil_state = state.clone();
    let fulfil_output = output.clone();
    let reject_state = state;
    let reject_output = output.clone();
    watch(
        dispatcher,
        items,
        move |index, value| {
            if let Some(records) = store(&fulfil_state, index, Settlement::Fulfilled { value }) {
                fulfil_output.settle(Value::List(records));
            }
        },
        move |index, reason| {
            if let Some(records) = store(&reject_state, index, Settlement::Rejected { reason }) {
                reject_output.settle(Value::List(records));
            }
        },
    );
    output
}

/// Fulfills with the first observed fulfillment, or rejects with an
/// `AggregateError` of every reason in index order once all inputs have
/// rejected. Empty input rejects with an empty aggregate.
pub(crate) fn any(dispatcher: &Dispatcher, input: Value) -> Future {
    let output = Future::pending(dispatcher);
    let Some(items) = ingest(dispatcher, &output, input) else {
        return output;
    };
    if items.is_empty() {
        fail_later(
            dispatcher,
            &output,
            Value::Aggregate(Box::new(AggregateError::new(Vec::new(), None))),
        );
        return output;
    }

    struct State {
        reasons: Vec<Value>,
        remaining: usize,
        fulfilled: bool,
    }
    let state = Arc::new(Mutex::new(State {
        reasons: vec![Value::Undefined; items.len()],
        remaining: items.len(),
        fulfilled: false,
    }));

    let fulfil_state = state.clone();
    let fulfil_output = output.clone();
    let reject_state = state;
    let reject_output = output.clone();
    watch(
        dispatcher,
        items,
        move |_, value| {
            let first = {
                let mut state = fulfil_state.lock();
                !std::mem::replace(&mut state.fulfilled, true)
            };
            if first {
                fulfil_output.settle(value);
            }
        },
        move |index, reason| {
            let complete = {
                let mut state = reject_state.lock();
                if state.fulfilled {
                    None
                } else {
                    state.reasons[index] = reason;
                    state.remaining -= 1;
                    if state.remaining == 0 {
                        Some(std::mem::take(&mut state.reasons))
                    } else {
                        None
                    }
                }
            };
            if let Some(reasons) = complete {
                reject_output.fail(Value::Aggregate(Box::new(AggregateError::new(
                    reasons, None,
                ))));
            }
        },
    );
    output
}

/// Adopts the first settlement of any kind, index order breaking ties
/// among inputs that are settled at construction. Never settles on empty
/// input.
pub(crate) fn race(dispatcher: &Dispatcher, input: Value) -> Future {
    let output = Future::pending(dispatcher);
    let Some(items) = ingest(dispatcher, &output, input) else {
        return output;
    };

    let decided = OneShot::new();
    let fulfil_guard = decided.clone();
    let reject_guard = decided;
    let fulfil_output = output.clone();
    let reject_output = output.clone();
    watch(
        dispatcher,
        items,
        move |_, value| {
            if fulfil_guard.claim() {
                fulfil_output.settle(value);
            }
        },
        move |_, reason| {
            if reject_guard.claim() {
                reject_output.fail(reason);
            }
        },
    );
    output
}
