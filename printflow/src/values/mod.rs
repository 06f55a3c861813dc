//! Typed run values shared between processors.
//!
//! This module provides:
//! - [`AnyValue`], a cheaply clonable, dynamically typed value
//! - [`Values`], the per-run key/value store processors read from and write to

mod any_value;
mod store;

pub use any_value::AnyValue;
pub use store::{Values, REQUEST_ENDPOINT_KEY};
