//! Testing utilities for processors and composed endpoints.
//!
//! This module provides:
//! - Layering processors and endpoints that record call order
//! - A no-op processor without the HTTP capability
//! - Assertions for call logs, labels and configuration reports

mod assertions;
mod mocks;

pub use assertions::{assert_call_order, assert_labels, assert_report_has_code};
pub use mocks::{CallLog, NoOpProcessor, LayerEndpoint, LayerProcessor, RecordingEndpoint};
