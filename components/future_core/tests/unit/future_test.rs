//! Unit tests for the Future state machine and chaining

use async_dispatch::Dispatcher;
use core_types::{ErrorKind, FnThenable, SettleFn, Value};
use future_core::{Callback, Future, FutureState};
use std::sync::{Arc, Mutex};

#[test]
fn new_future_is_pending() {
    let dispatcher = Dispatcher::new();
    let future = Future::new(&dispatcher, |_| Ok(()));
    assert_eq!(future.state(), FutureState::Pending);
}

#[test]
fn settle_inside_initializer_fulfills() {
    let dispatcher = Dispatcher::new();
    let future = Future::new(&dispatcher, |completer| {
        completer.settle(Value::Int(42));
        Ok(())
    });
    assert_eq!(future.state(), FutureState::Fulfilled);
    assert_eq!(future.result(), Some(Value::Int(42)));
}

#[test]
fn fail_inside_initializer_rejects() {
    let dispatcher = Dispatcher::new();
    let future = Future::new(&dispatcher, |completer| {
        completer.fail(Value::Str("e".to_string()));
        Ok(())
    });
    assert_eq!(future.state(), FutureState::Rejected);
    assert_eq!(future.result(), Some(Value::Str("e".to_string())));
}

#[test]
fn completer_entry_points_are_one_shot() {
    let dispatcher = Dispatcher::new();
    let (future, completer) = Future::deferred(&dispatcher);
    completer.fail(Value::Int(1));
    completer.settle(Value::Int(2));
    completer.fail(Value::Int(3));
    assert_eq!(future.state(), FutureState::Rejected);
    assert_eq!(future.result(), Some(Value::Int(1)));
}

#[test]
fn then_callback_runs_asynchronously_exactly_once() {
    let dispatcher = Dispatcher::new();
    let calls = Arc::new(Mutex::new(0));

    let c = calls.clone();
    Future::resolve(&dispatcher, Value::Int(5)).then(
        Some(Callback::new(move |value| {
            assert_eq!(value, Value::Int(5));
            *c.lock().unwrap() += 1;
            Ok(Value::Undefined)
        })),
        None,
    );

    assert_eq!(*calls.lock().unwrap(), 0);
    dispatcher.run_until_idle();
    assert_eq!(*calls.lock().unwrap(), 1);
    dispatcher.run_until_idle();
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[test]
fn then_on_already_settled_future_still_defers() {
    let dispatcher = Dispatcher::new();
    let future = Future::resolve(&dispatcher, Value::Int(1));
    dispatcher.run_until_idle();

    let ran = Arc::new(Mutex::new(false));
    let flag = ran.clone();
    future.then(
        Some(Callback::new(move |_| {
            *flag.lock().unwrap() = true;
            Ok(Value::Undefined)
        })),
        None,
    );

    assert!(!*ran.lock().unwrap());
    dispatcher.run_until_idle();
    assert!(*ran.lock().unwrap());
}

#[test]
fn then_returns_new_pending_future_synchronously() {
    let dispatcher = Dispatcher::new();
    let chained = Future::resolve(&dispatcher, Value::Int(1)).then(None, None);
    assert_eq!(chained.state(), FutureState::Pending);
}

#[test]
fn missing_fulfillment_handler_passes_value_through() {
    let dispatcher = Dispatcher::new();
    let chained = Future::resolve(&dispatcher, Value::Int(7)).then(None, None);
    dispatcher.run_until_idle();
    assert_eq!(chained.state(), FutureState::Fulfilled);
    assert_eq!(chained.result(), Some(Value::Int(7)));
}

#[test]
fn missing_rejection_handler_passes_reason_through() {
    let dispatcher = Dispatcher::new();
    let chained = Future::reject(&dispatcher, Value::Str("e".to_string())).then(
        Some(Callback::new(|value| Ok(value))),
        None,
    );
    dispatcher.run_until_idle();
    assert_eq!(chained.state(), FutureState::Rejected);
    assert_eq!(chained.result(), Some(Value::Str("e".to_string())));
}

#[test]
fn handler_error_rejects_chained_future() {
    let dispatcher = Dispatcher::new();
    let chained = Future::resolve(&dispatcher, Value::Int(1)).then(
        Some(Callback::new(|_| Err(Value::Str("broke".to_string())))),
        None,
    );
    dispatcher.run_until_idle();
    assert_eq!(chained.state(), FutureState::Rejected);
    assert_eq!(chained.result(), Some(Value::Str("broke".to_string())));
}

#[test]
fn handler_result_feeds_resolution_procedure() {
    let dispatcher = Dispatcher::new();
    let inner = Future::resolve(&dispatcher, Value::Int(9));
    let chained = Future::resolve(&dispatcher, Value::Int(0)).then(
        Some(Callback::new(move |_| Ok(inner.into_value()))),
        None,
    );
    dispatcher.run_until_idle();
    assert_eq!(chained.result(), Some(Value::Int(9)));
}

#[test]
fn catch_handles_rejection() {
    let dispatcher = Dispatcher::new();
    let recovered = Future::reject(&dispatcher, Value::Str("e".to_string()))
        .catch(Callback::new(|reason| {
            assert_eq!(reason, Value::Str("e".to_string()));
            Ok(Value::Int(0))
        }));
    dispatcher.run_until_idle();
    assert_eq!(recovered.state(), FutureState::Fulfilled);
    assert_eq!(recovered.result(), Some(Value::Int(0)));
}

#[test]
fn reactions_fire_in_registration_order() {
    let dispatcher = Dispatcher::new();
    let order = Arc::new(Mutex::new(vec![]));
    let (future, completer) = Future::deferred(&dispatcher);

    for i in 0..3 {
        let o = order.clone();
        future.then(
            Some(Callback::new(move |_| {
                o.lock().unwrap().push(i);
                Ok(Value::Undefined)
            })),
            None,
        );
    }

    completer.settle(Value::Undefined);
    dispatcher.run_until_idle();
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
}

#[test]
fn resolving_with_itself_rejects_with_type_error() {
    let dispatcher = Dispatcher::new();
    let (future, completer) = Future::deferred(&dispatcher);
    completer.settle(future.clone().into_value());

    assert_eq!(future.state(), FutureState::Rejected);
    match future.result() {
        Some(Value::Error(error)) => assert_eq!(error.kind, ErrorKind::TypeError),
        other => panic!("expected a TypeError rejection, got {:?}", other),
    }
}

#[test]
fn resolving_with_future_adopts_its_outcome() {
    let dispatcher = Dispatcher::new();
    let (delegate, delegate_completer) = Future::deferred(&dispatcher);
    let future = Future::resolve(&dispatcher, delegate.into_value());

    assert_eq!(future.state(), FutureState::Pending);
    delegate_completer.settle(Value::Int(12));
    dispatcher.run_until_idle();
    assert_eq!(future.result(), Some(Value::Int(12)));
}

#[test]
fn direct_settlement_after_delegation_is_discarded() {
    let dispatcher = Dispatcher::new();
    let (delegate, delegate_completer) = Future::deferred(&dispatcher);
    let (future, completer) = Future::deferred(&dispatcher);

    completer.settle(delegate.into_value());
    completer.settle(Value::Str("too late".to_string()));
    completer.fail(Value::Str("also too late".to_string()));
    assert_eq!(future.state(), FutureState::Pending);

    delegate_completer.settle(Value::Int(1));
    dispatcher.run_until_idle();
    assert_eq!(future.result(), Some(Value::Int(1)));
}

#[test]
fn nested_delegation_flattens() {
    let dispatcher = Dispatcher::new();
    let innermost = Future::resolve(&dispatcher, Value::Int(3));
    let middle = Future::resolve(&dispatcher, innermost.into_value());
    let outer = Future::resolve(&dispatcher, middle.into_value());

    dispatcher.run_until_idle();
    assert_eq!(outer.state(), FutureState::Fulfilled);
    assert_eq!(outer.result(), Some(Value::Int(3)));
}

#[test]
fn thenable_settles_future_later() {
    let dispatcher = Dispatcher::new();
    let slot: Arc<Mutex<Option<SettleFn>>> = Arc::new(Mutex::new(None));

    let stash = slot.clone();
    let thenable = Value::Thenable(Arc::new(FnThenable::new(move |on_fulfilled, _| {
        *stash.lock().unwrap() = Some(on_fulfilled);
        Ok(())
    })));

    let future = Future::resolve(&dispatcher, thenable);
    assert_eq!(future.state(), FutureState::Pending);

    let on_fulfilled = slot.lock().unwrap().take().unwrap();
    on_fulfilled(Value::Int(7));
    dispatcher.run_until_idle();
    assert_eq!(future.result(), Some(Value::Int(7)));
}

#[test]
fn thenable_calling_both_callbacks_keeps_first() {
    let dispatcher = Dispatcher::new();
    let thenable = Value::Thenable(Arc::new(FnThenable::new(|on_fulfilled, on_rejected| {
        on_fulfilled(Value::Int(1));
        on_rejected(Value::Str("ignored".to_string()));
        Ok(())
    })));

    let future = Future::resolve(&dispatcher, thenable);
    dispatcher.run_until_idle();
    assert_eq!(future.state(), FutureState::Fulfilled);
    assert_eq!(future.result(), Some(Value::Int(1)));
}

#[test]
fn failing_thenable_subscription_rejects() {
    let dispatcher = Dispatcher::new();
    let thenable = Value::Thenable(Arc::new(FnThenable::new(|_, _| {
        Err(Value::Str("bad then".to_string()))
    })));

    let future = Future::resolve(&dispatcher, thenable);
    assert_eq!(future.state(), FutureState::Rejected);
    assert_eq!(future.result(), Some(Value::Str("bad then".to_string())));
}

#[test]
fn failing_subscription_after_callback_fired_is_ignored() {
    let dispatcher = Dispatcher::new();
    let thenable = Value::Thenable(Arc::new(FnThenable::new(|on_fulfilled, _| {
        on_fulfilled(Value::Int(4));
        Err(Value::Str("late failure".to_string()))
    })));

    let future = Future::resolve(&dispatcher, thenable);
    dispatcher.run_until_idle();
    assert_eq!(future.state(), FutureState::Fulfilled);
    assert_eq!(future.result(), Some(Value::Int(4)));
}

#[test]
fn finally_preserves_fulfillment_value() {
    let dispatcher = Dispatcher::new();
    let ran = Arc::new(Mutex::new(false));
    let flag = ran.clone();
    let chained = Future::resolve(&dispatcher, Value::Int(5)).finally(move || {
        *flag.lock().unwrap() = true;
        Ok(())
    });
    dispatcher.run_until_idle();
    assert!(*ran.lock().unwrap());
    assert_eq!(chained.result(), Some(Value::Int(5)));
}

#[test]
fn finally_preserves_rejection_reason() {
    let dispatcher = Dispatcher::new();
    let chained =
        Future::reject(&dispatcher, Value::Str("e".to_string())).finally(|| Ok(()));
    dispatcher.run_until_idle();
    assert_eq!(chained.state(), FutureState::Rejected);
    assert_eq!(chained.result(), Some(Value::Str("e".to_string())));
}

#[test]
fn finally_error_overrides_settlement() {
    let dispatcher = Dispatcher::new();
    let chained = Future::resolve(&dispatcher, Value::Int(5))
        .finally(|| Err(Value::Str("cleanup failed".to_string())));
    dispatcher.run_until_idle();
    assert_eq!(chained.state(), FutureState::Rejected);
    assert_eq!(chained.result(), Some(Value::Str("cleanup failed".to_string())));
}

#[test]
fn reentrant_then_inside_callback_defers_again() {
    let dispatcher = Dispatcher::new();
    let order = Arc::new(Mutex::new(vec![]));
    let future = Future::resolve(&dispatcher, Value::Int(1));

    let o = order.clone();
    let inner_future = future.clone();
    future.then(
        Some(Callback::new(move |_| {
            o.lock().unwrap().push("outer");
            let o2 = o.clone();
            inner_future.then(
                Some(Callback::new(move |_| {
                    o2.lock().unwrap().push("inner");
                    Ok(Value::Undefined)
                })),
                None,
            );
            o.lock().unwrap().push("outer done");
            Ok(Value::Undefined)
        })),
        None,
    );

    dispatcher.run_until_idle();
    assert_eq!(
        *order.lock().unwrap(),
        vec!["outer", "outer done", "inner"]
    );
}
