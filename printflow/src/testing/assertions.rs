//! Test assertions for composed endpoints and reports.

use super::CallLog;
use crate::endpoint::HttpEndpoint;
use crate::errors::ConfigurationReport;

/// Asserts that the log holds exactly `expected`, in order.
pub fn assert_call_order(log: &CallLog, expected: &[&str]) {
    let actual = log.entries();
    assert_eq!(
        actual, expected,
        "Expected call order {expected:?}, got {actual:?}"
    );
}

/// Asserts the decoration labels of an endpoint, innermost first.
pub fn assert_labels(endpoint: &dyn HttpEndpoint, expected: &[&str]) {
    let actual = endpoint.labels();
    assert_eq!(
        actual, expected,
        "Expected labels {expected:?} on '{}', got {actual:?}",
        endpoint.name()
    );
}

/// Asserts that a report carries at least one error with `code`.
pub fn assert_report_has_code(report: &ConfigurationReport, code: &str) {
    assert!(
        report.has_code(code),
        "Expected an error with code '{code}', got: {report}"
    );
}
