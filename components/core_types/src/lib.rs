//! Core payload types and error handling for the deferred-value library.
//!
//! This crate provides the foundational types shared by every component:
//! value representation, usage errors, aggregate failures, settlement
//! records, the foreign-thenable capability, and input-sequence ingestion.
//!
//! # Overview
//!
//! - [`Value`] - Tagged representation of future payloads
//! - [`CoreError`] / [`ErrorKind`] - Library usage errors
//! - [`AggregateError`] - Multi-reason failure payload for `any`
//! - [`Settlement`] - Per-input record for `all_settled`
//! - [`Thenable`] / [`FnThenable`] - Foreign continuation capability
//! - [`to_ordered_sequence`] - Combinator input ingestion
//!
//! # Examples
//!
//! ```
//! use core_types::{CoreError, Value};
//!
//! let payload = Value::List(vec![Value::Int(1), Value::Str("two".to_string())]);
//! assert_eq!(payload.type_of(), "list");
//!
//! let error = CoreError::type_error("float is not iterable");
//! assert_eq!(error.to_string(), "TypeError: float is not iterable");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod aggregate;
mod error;
mod sequence;
mod settlement;
mod thenable;
mod value;

pub use aggregate::AggregateError;
pub use error::{CoreError, ErrorKind};
pub use sequence::to_ordered_sequence;
pub use settlement::Settlement;
pub use thenable::{FnThenable, SettleFn, Thenable};
pub use value::Value;
