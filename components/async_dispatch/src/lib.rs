//! Async dispatcher for the deferred-value library.
//!
//! This crate provides the single "run later" facility the future core
//! depends on: a FIFO queue of deferred callbacks with the contract
//! "strictly after the current synchronous execution, in submission order".
//!
//! # Overview
//!
//! - [`Task`] - A deferred zero-argument callback
//! - [`TaskQueue`] - The FIFO queue backing a dispatcher
//! - [`Dispatcher`] - Cloneable handle: schedule and drain
//!
//! # Examples
//!
//! ```
//! use async_dispatch::{Dispatcher, Task};
//!
//! let dispatcher = Dispatcher::new();
//! dispatcher.schedule(Task::new(|| {}));
//! assert_eq!(dispatcher.run_until_idle(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod dispatcher;
mod task;

pub use dispatcher::Dispatcher;
pub use task::{Task, TaskQueue};
