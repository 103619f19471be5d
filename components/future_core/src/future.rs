//! The deferred-value primitive and its resolution state machine.
//!
//! A [`Future`] is created pending, settles exactly once, and delivers every
//! registered reaction through one dispatcher hop measured from the
//! settlement. The resolution procedure flattens nested sources: resolving
//! with another future or a foreign thenable delegates the outcome instead
//! of storing the source as a plain value.

use crate::callback::{Callback, OneShot};
use crate::{combinators, diagnostics};
use async_dispatch::{Dispatcher, Task};
use core_types::{CoreError, SettleFn, Settlement, Value};
use parking_lot::Mutex;
use std::sync::Arc;

/// The state of a future.
///
/// A future transitions out of `Pending` exactly once and never reverts.
#[derive(Debug, Clone, PartialEq)]
pub enum FutureState {
    /// The initial state; neither fulfilled nor rejected.
    Pending,
    /// Settled with a value.
    Fulfilled,
    /// Settled with a rejection reason.
    Rejected,
}

/// A registered continuation pair plus the future that depends on it.
///
/// Created once per `then` call (with a target) or per internal observer
/// registration (without one); consumed exactly once when the owning future
/// settles.
#[derive(Debug)]
pub(crate) struct Reaction {
    pub(crate) on_fulfilled: Option<Callback>,
    pub(crate) on_rejected: Option<Callback>,
    pub(crate) target: Option<Future>,
}

#[derive(Debug)]
struct Inner {
    state: FutureState,
    result: Option<Value>,
    reactions: Vec<Reaction>,
    delegated: bool,
    observed: bool,
}

/// The deferred-value primitive.
///
/// `Future` is a cheap cloneable handle; clones observe and settle the same
/// underlying state. State is mutated only in the synchronous portion of
/// settlement and registration; reactions always run later, through the
/// dispatcher the future was created with.
///
/// # Examples
///
/// ```
/// use async_dispatch::Dispatcher;
/// use core_types::Value;
/// use future_core::{Callback, Future, FutureState};
///
/// let dispatcher = Dispatcher::new();
/// let doubled = Future::resolve(&dispatcher, Value::Int(21))
///     .then(Some(Callback::new(|v| match v {
///         Value::Int(n) => Ok(Value::Int(n * 2)),
///         other => Ok(other),
///     })), None);
///
/// assert_eq!(doubled.state(), FutureState::Pending);
/// dispatcher.run_until_idle();
/// assert_eq!(doubled.result(), Some(Value::Int(42)));
/// ```
#[derive(Clone)]
pub struct Future {
    inner: Arc<Mutex<Inner>>,
    dispatcher: Dispatcher,
}

/// The one-shot `settle`/`fail` entry-point pair bound to one future.
///
/// Handed to the initializer at construction; cloneable so producers can
/// stash it and settle later. After the first effective call, both entry
/// points are no-ops, and once settlement has been delegated to another
/// future or thenable neither has any effect.
#[derive(Clone, Debug)]
pub struct Completer {
    future: Future,
}

impl Completer {
    /// Resolves the bound future with `value`, running the full resolution
    /// procedure (delegation, thenable adoption, plain fulfillment).
    pub fn settle(&self, value: Value) {
        self.future.settle(value);
    }

    /// Rejects the bound future with `reason`.
    pub fn fail(&self, reason: Value) {
        self.future.fail(reason);
    }
}

impl Future {
    /// Creates a pending future that never settles on its own.
    ///
    /// This is the placeholder constructor used for the futures produced by
    /// `then` and the combinators before their producing logic runs.
    pub fn pending(dispatcher: &Dispatcher) -> Future {
        Future {
            inner: Arc::new(Mutex::new(Inner {
                state: FutureState::Pending,
                result: None,
                reactions: Vec::new(),
                delegated: false,
                observed: false,
            })),
            dispatcher: dispatcher.clone(),
        }
    }

    /// Creates a pending future and synchronously invokes `initializer`
    /// with its [`Completer`].
    ///
    /// An `Err` from the initializer rejects the future with that value,
    /// unless a settlement already happened inside the initializer.
    pub fn new<F>(dispatcher: &Dispatcher, initializer: F) -> Future
    where
        F: FnOnce(Completer) -> Result<(), Value>,
    {
        let future = Future::pending(dispatcher);
        let completer = Completer {
            future: future.clone(),
        };
        if let Err(reason) = initializer(completer) {
            future.fail(reason);
        }
        future
    }

    /// Creates a pending future together with its [`Completer`], the
    /// producer/consumer pair form of [`Future::new`].
    pub fn deferred(dispatcher: &Dispatcher) -> (Future, Completer) {
        let future = Future::pending(dispatcher);
        let completer = Completer {
            future: future.clone(),
        };
        (future, completer)
    }

    /// Creates a future resolved with `value`.
    ///
    /// If `value` is itself a future or thenable the result adopts its
    /// eventual outcome; this always allocates a new future.
    pub fn resolve(dispatcher: &Dispatcher, value: Value) -> Future {
        let future = Future::pending(dispatcher);
        future.settle(value);
        future
    }

    /// Creates a future rejected with `reason`.
    pub fn reject(dispatcher: &Dispatcher, reason: Value) -> Future {
        let future = Future::pending(dispatcher);
        future.fail(reason);
        future
    }

    /// Settles with a list of every input's fulfillment value, or with the
    /// first rejection. See the combinator table in the crate docs.
    pub fn all(dispatcher: &Dispatcher, input: Value) -> Future {
        combinators::all(dispatcher, input)
    }

    /// Settles with a list of per-input [`Settlement`] records; never
    /// rejects.
    pub fn all_settled(dispatcher: &Dispatcher, input: Value) -> Future {
        combinators::all_settled(dispatcher, input)
    }

    /// Settles with the first fulfillment, or rejects with an
    /// `AggregateError` of every reason once all inputs have rejected.
    pub fn any(dispatcher: &Dispatcher, input: Value) -> Future {
        combinators::any(dispatcher, input)
    }

    /// Adopts the first settlement of any kind. Never settles on empty
    /// input.
    pub fn race(dispatcher: &Dispatcher, input: Value) -> Future {
        combinators::race(dispatcher, input)
    }

    /// Returns the current state.
    pub fn state(&self) -> FutureState {
        self.inner.lock().state.clone()
    }

    /// Returns the fulfillment value or rejection reason once settled.
    pub fn result(&self) -> Option<Value> {
        self.inner.lock().result.clone()
    }

    /// Returns the dispatcher this future delivers reactions through.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Wraps this future handle into an opaque [`Value`] payload.
    pub fn into_value(self) -> Value {
        Value::Object(Arc::new(self))
    }

    /// Recovers a future handle from a [`Value`], if it holds one.
    pub fn from_value(value: &Value) -> Option<Future> {
        match value {
            Value::Object(object) => object.downcast_ref::<Future>().cloned(),
            _ => None,
        }
    }

    /// Registers continuations and returns the future that depends on
    /// their outcome.
    ///
    /// The returned future is produced synchronously, before any callback
    /// runs. A missing handler propagates the matching settlement onto the
    /// returned future unchanged (value/reason passthrough). If this future
    /// is already settled, delivery is still deferred past the current
    /// synchronous turn.
    pub fn then(&self, on_fulfilled: Option<Callback>, on_rejected: Option<Callback>) -> Future {
        let target = Future::pending(&self.dispatcher);
        self.register(Reaction {
            on_fulfilled,
            on_rejected,
            target: Some(target.clone()),
        });
        target
    }

    /// Registers a rejection handler only: `then(None, Some(on_rejected))`.
    pub fn catch(&self, on_rejected: Callback) -> Future {
        self.then(None, Some(on_rejected))
    }

    /// Runs `on_finally` on both paths without altering the settled value
    /// or reason, unless the callback itself returns `Err` — then the
    /// returned future rejects with that error.
    pub fn finally<F>(&self, on_finally: F) -> Future
    where
        F: Fn() -> Result<(), Value> + Send + Sync + 'static,
    {
        let on_finally = Arc::new(on_finally);
        let on_value = on_finally.clone();
        let on_reason = on_finally;
        self.then(
            Some(Callback::new(move |value| {
                on_value()?;
                Ok(value)
            })),
            Some(Callback::new(move |reason| {
                on_reason()?;
                Err(reason)
            })),
        )
    }

    /// One-shot settle entry point: no-op once settlement has been
    /// delegated (a prior delegation owns the outcome) or decided.
    pub(crate) fn settle(&self, value: Value) {
        if self.inner.lock().delegated {
            return;
        }
        self.settle_unchecked(value);
    }

    /// The resolution procedure, without the delegation guard. Delegate
    /// continuations land here so the adopted outcome can decide a future
    /// whose direct entry points are already disabled.
    pub(crate) fn settle_unchecked(&self, value: Value) {
        if let Some(other) = Future::from_value(&value) {
            if Arc::ptr_eq(&self.inner, &other.inner) {
                self.fail_unchecked(Value::Error(CoreError::type_error(
                    "a future cannot be resolved with itself",
                )));
                return;
            }
            self.inner.lock().delegated = true;
            let on_settle = self.clone();
            let on_fail = self.clone();
            other.register(Reaction {
                on_fulfilled: Some(Callback::new(move |value| {
                    on_settle.settle_unchecked(value);
                    Ok(Value::Undefined)
                })),
                on_rejected: Some(Callback::new(move |reason| {
                    on_fail.fail_unchecked(reason);
                    Ok(Value::Undefined)
                })),
                target: None,
            });
            return;
        }

        match value {
            Value::Thenable(thenable) => {
                self.inner.lock().delegated = true;
                let pair = OneShot::new();
                let fulfil_guard = pair.clone();
                let reject_guard = pair.clone();
                let on_settle = self.clone();
                let on_fail = self.clone();
                let on_fulfilled: SettleFn = Box::new(move |value| {
                    if fulfil_guard.claim() {
                        on_settle.settle_unchecked(value);
                    }
                });
                let on_rejected: SettleFn = Box::new(move |reason| {
                    if reject_guard.claim() {
                        on_fail.fail_unchecked(reason);
                    }
                });
                // The subscription runs with no lock held: it may call back
                // into this future synchronously.
                if let Err(error) = thenable.subscribe(on_fulfilled, on_rejected) {
                    if pair.claim() {
                        self.fail_unchecked(error);
                    }
                }
            }
            value => self.fulfill(value),
        }
    }

    /// Plain-value transition to Fulfilled; drains reactions.
    fn fulfill(&self, value: Value) {
        let reactions = {
            let mut inner = self.inner.lock();
            if inner.state != FutureState::Pending {
                return;
            }
            inner.state = FutureState::Fulfilled;
            inner.result = Some(value.clone());
            std::mem::take(&mut inner.reactions)
        };
        for reaction in reactions {
            self.dispatch(
                reaction,
                Settlement::Fulfilled {
                    value: value.clone(),
                },
            );
        }
    }

    /// One-shot fail entry point: no-op once delegated or settled.
    pub(crate) fn fail(&self, reason: Value) {
        if self.inner.lock().delegated {
            return;
        }
        self.fail_unchecked(reason);
    }

    /// Transition to Rejected; drains reactions and arms the
    /// unobserved-rejection diagnostic.
    pub(crate) fn fail_unchecked(&self, reason: Value) {
        let (reactions, unobserved) = {
            let mut inner = self.inner.lock();
            if inner.state != FutureState::Pending {
                return;
            }
            inner.state = FutureState::Rejected;
            inner.result = Some(reason.clone());
            (std::mem::take(&mut inner.reactions), !inner.observed)
        };
        for reaction in reactions {
            self.dispatch(
                reaction,
                Settlement::Rejected {
                    reason: reason.clone(),
                },
            );
        }
        if unobserved {
            // Re-check after the current drain: a reaction registered in
            // the same turn still counts as observation.
            let future = self.clone();
            self.dispatcher.schedule(Task::new(move || {
                if !future.inner.lock().observed {
                    diagnostics::report_unobserved(&reason);
                }
            }));
        }
    }

    /// Appends a reaction while pending, or schedules its delivery with
    /// the stored settlement. Marks the future observed either way.
    pub(crate) fn register(&self, reaction: Reaction) {
        let settlement = {
            let mut inner = self.inner.lock();
            inner.observed = true;
            let result = inner.result.clone().unwrap_or(Value::Undefined);
            match inner.state {
                FutureState::Pending => {
                    inner.reactions.push(reaction);
                    return;
                }
                FutureState::Fulfilled => Settlement::Fulfilled { value: result },
                FutureState::Rejected => Settlement::Rejected { reason: result },
            }
        };
        self.dispatch(reaction, settlement);
    }

    /// Schedules one reaction delivery: exactly one dispatcher hop from
    /// the settlement that caused it.
    fn dispatch(&self, reaction: Reaction, settlement: Settlement) {
        self.dispatcher
            .schedule(Task::new(move || run_reaction(reaction, settlement)));
    }
}

impl std::fmt::Debug for Future {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Future")
            .field("state", &inner.state)
            .field("result", &inner.result)
            .field("reactions", &inner.reactions.len())
            .field("delegated", &inner.delegated)
            .field("observed", &inner.observed)
            .finish()
    }
}

/// Runs inside a dispatcher task: invokes the matching handler and feeds
/// its outcome into the target, or passes the settlement through when the
/// handler is absent.
fn run_reaction(reaction: Reaction, settlement: Settlement) {
    let Reaction {
        on_fulfilled,
        on_rejected,
        target,
    } = reaction;
    match settlement {
        Settlement::Fulfilled { value } => match on_fulfilled {
            Some(callback) => finish(target, callback.call(value)),
            None => {
                if let Some(target) = target {
                    target.settle(value);
                }
            }
        },
        Settlement::Rejected { reason } => match on_rejected {
            Some(callback) => finish(target, callback.call(reason)),
            None => {
                if let Some(target) = target {
                    target.fail(reason);
                }
            }
        },
    }
}

fn finish(target: Option<Future>, outcome: Result<Value, Value>) {
    let Some(target) = target else {
        return;
    };
    match outcome {
        Ok(value) => target.settle(value),
        Err(reason) => target.fail(reason),
    }
}
