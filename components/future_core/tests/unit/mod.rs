//! Unit test suite for the future_core component.

mod future_test;
