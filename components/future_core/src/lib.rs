//! The deferred-value core: state machine, watch primitive, combinators.
//!
//! A [`Future`] represents a value not yet available. Consumers register
//! continuations with [`Future::then`]; producers settle through the
//! one-shot [`Completer`] pair; combinators compose many inputs into one
//! aggregate outcome. Reactions never run inside the code that triggered
//! settlement: every delivery goes through exactly one
//! [`async_dispatch::Dispatcher`] hop, in registration order.
//!
//! # Overview
//!
//! - [`Future`] / [`Completer`] - The primitive and its settle/fail pair
//! - [`Callback`] - Boxed user continuation
//! - [`watch`] - Per-index observation of a heterogeneous sequence
//! - [`Future::all`] / [`Future::all_settled`] / [`Future::any`] /
//!   [`Future::race`] - Combinators
//! - [`RejectionSink`] - Unobserved-rejection diagnostics
//!
//! # Examples
//!
//! ```
//! use async_dispatch::Dispatcher;
//! use core_types::Value;
//! use future_core::Future;
//!
//! let dispatcher = Dispatcher::new();
//! let all = Future::all(
//!     &dispatcher,
//!     Value::List(vec![
//!         Value::Int(1),
//!         Future::resolve(&dispatcher, Value::Int(2)).into_value(),
//!         Value::Int(3),
//!     ]),
//! );
//!
//! dispatcher.run_until_idle();
//! assert_eq!(
//!     all.result(),
//!     Some(Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]))
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod callback;
mod combinators;
mod diagnostics;
mod future;
mod watch;

pub use callback::Callback;
pub use diagnostics::{clear_rejection_sink, set_rejection_sink, RejectionSink};
pub use future::{Completer, Future, FutureState};
pub use watch::watch;
