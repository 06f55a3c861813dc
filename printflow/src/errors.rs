//! Error types for the printflow request-processing layer.
//!
//! Access and binding errors are surfaced to the caller of the failing
//! operation. Configuration errors are collected into a
//! [`ConfigurationReport`] instead of failing on the first problem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The main error type for printflow operations.
#[derive(Debug, Error)]
pub enum PrintflowError {
    /// A value could not be read from the run values.
    #[error("{0}")]
    Values(#[from] ValuesError),

    /// A processor input could not be bound.
    #[error("{0}")]
    Binding(#[from] ParameterBindingError),

    /// A processor failed while executing or wrapping.
    #[error("{0}")]
    Processor(#[from] ProcessorError),

    /// The configuration is invalid.
    #[error("{0}")]
    Configuration(#[from] ConfigurationReport),

    /// A request endpoint failed.
    #[error("{0}")]
    Endpoint(#[from] EndpointError),

    /// Logging could not be initialised.
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Metadata attached to a configuration error for better diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Error code (e.g., "CONFIG-COMPOSITE-EMPTY").
    pub code: String,
    /// Short summary of the error.
    pub summary: String,
    /// Hint for fixing the error.
    pub fix_hint: Option<String>,
    /// Additional context key-value pairs.
    #[serde(default)]
    pub context: HashMap<String, String>,
}

impl ErrorInfo {
    /// Creates new error info.
    #[must_use]
    pub fn new(code: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            summary: summary.into(),
            fix_hint: None,
            context: HashMap::new(),
        }
    }

    /// Sets the fix hint.
    #[must_use]
    pub fn with_fix_hint(mut self, hint: impl Into<String>) -> Self {
        self.fix_hint = Some(hint.into());
        self
    }

    /// Adds a single context entry.
    #[must_use]
    pub fn with_context_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("code".to_string(), serde_json::json!(self.code));
        map.insert("summary".to_string(), serde_json::json!(self.summary));

        if let Some(ref hint) = self.fix_hint {
            map.insert("fix_hint".to_string(), serde_json::json!(hint));
        }
        if !self.context.is_empty() {
            map.insert("context".to_string(), serde_json::json!(self.context));
        }

        map
    }
}

/// Error codes used by the configuration layer.
pub mod codes {
    /// A composite processor has no parts.
    pub const COMPOSITE_EMPTY: &str = "CONFIG-COMPOSITE-EMPTY";
    /// A composite part is not an HTTP processor.
    pub const COMPOSITE_NOT_HTTP: &str = "CONFIG-COMPOSITE-NOT_HTTP";
    /// A configuration references a processor that is not registered.
    pub const UNKNOWN_PROCESSOR: &str = "CONFIG-UNKNOWN-PROCESSOR";
    /// Two processors were registered under the same name.
    pub const DUPLICATE_PROCESSOR: &str = "CONFIG-DUPLICATE-PROCESSOR";
    /// The configuration document could not be parsed.
    pub const PARSE: &str = "CONFIG-PARSE";
}

/// A single configuration problem found during validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ConfigurationError {
    /// The error message.
    pub message: String,
    /// The processor the error belongs to, if any.
    pub processor: Option<String>,
    /// Optional structured error info.
    pub error_info: Option<ErrorInfo>,
}

impl ConfigurationError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            processor: None,
            error_info: None,
        }
    }

    /// Sets the processor the error belongs to.
    #[must_use]
    pub fn with_processor(mut self, processor: impl Into<String>) -> Self {
        self.processor = Some(processor.into());
        self
    }

    /// Sets the structured error info.
    #[must_use]
    pub fn with_error_info(mut self, info: ErrorInfo) -> Self {
        self.error_info = Some(info);
        self
    }

    /// Returns the error code, if any.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.error_info.as_ref().map(|info| info.code.as_str())
    }

    /// A composite processor was configured without parts.
    #[must_use]
    pub fn empty_composite(composite: &str) -> Self {
        Self::new("There are no composite elements for this processor")
            .with_processor(composite)
            .with_error_info(
                ErrorInfo::new(codes::COMPOSITE_EMPTY, "Composite has no parts")
                    .with_fix_hint("List at least one HTTP processor in the composite's parts."),
            )
    }

    /// A composite part does not implement the HTTP processor capability.
    #[must_use]
    pub fn not_http_processor(composite: &str, index: usize, part: &str) -> Self {
        Self::new(format!(
            "Part {index} ('{part}') of '{composite}' is not an HTTP processor"
        ))
        .with_processor(composite)
        .with_error_info(
            ErrorInfo::new(codes::COMPOSITE_NOT_HTTP, "Composite part cannot wrap endpoints")
                .with_fix_hint("Only processors registered as HTTP processors can be composite parts.")
                .with_context_entry("part", part)
                .with_context_entry("index", index.to_string()),
        )
    }

    /// A configuration references an unregistered processor.
    #[must_use]
    pub fn unknown_processor(name: &str) -> Self {
        Self::new(format!("No processor registered under the name '{name}'")).with_error_info(
            ErrorInfo::new(codes::UNKNOWN_PROCESSOR, "Unknown processor")
                .with_fix_hint("Check the processor name for typos or register it first.")
                .with_context_entry("name", name),
        )
    }

    /// A processor name was registered twice.
    #[must_use]
    pub fn duplicate_processor(name: &str) -> Self {
        Self::new(format!("A processor named '{name}' is already registered"))
            .with_processor(name)
            .with_error_info(ErrorInfo::new(
                codes::DUPLICATE_PROCESSOR,
                "Duplicate processor name",
            ))
    }

    /// The configuration document is malformed.
    #[must_use]
    pub fn parse(detail: impl std::fmt::Display) -> Self {
        Self::new(format!("Malformed configuration document: {detail}")).with_error_info(
            ErrorInfo::new(codes::PARSE, "Configuration could not be parsed"),
        )
    }
}

/// Aggregated result of validating a configuration.
#[derive(Debug, Clone, Error)]
#[error("Invalid configuration ({} error(s)): {}", .errors.len(), join_messages(.errors))]
pub struct ConfigurationReport {
    /// All errors found, in discovery order.
    pub errors: Vec<ConfigurationError>,
    /// When validation ran.
    pub checked_at: DateTime<Utc>,
}

fn join_messages(errors: &[ConfigurationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ConfigurationReport {
    /// Creates a report from collected errors.
    #[must_use]
    pub fn new(errors: Vec<ConfigurationError>) -> Self {
        Self {
            errors,
            checked_at: Utc::now(),
        }
    }

    /// True when no errors were collected.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if the report holds no errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if any error carries the given code.
    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.code() == Some(code))
    }

    /// Converts the report into `Ok(())` when valid, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Error raised when reading from [`Values`](crate::values::Values).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValuesError {
    /// Nothing is stored under the key.
    #[error("No value stored under key '{key}'")]
    KeyNotFound {
        /// The missing key.
        key: String,
    },

    /// The stored value has a different type than requested.
    #[error("Value under key '{key}' is a {actual}, expected {expected}")]
    TypeMismatch {
        /// The key that was read.
        key: String,
        /// The requested type.
        expected: &'static str,
        /// The stored type.
        actual: &'static str,
    },
}

impl ValuesError {
    /// Creates a key-not-found error.
    #[must_use]
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    /// Creates a type-mismatch error.
    #[must_use]
    pub fn type_mismatch(key: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch {
            key: key.into(),
            expected,
            actual,
        }
    }
}

/// Why an input field could not be bound.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindingFailure {
    /// A required field has no entry in the run values.
    #[error("required value is missing")]
    MissingRequired,

    /// The stored value cannot be converted to the declared type.
    #[error("found {actual}, declared {expected}")]
    TypeMismatch {
        /// The declared field type.
        expected: &'static str,
        /// The stored type.
        actual: &'static str,
    },

    /// The field is not part of the processor's input shape.
    #[error("field is not declared in the input shape")]
    Undeclared,

    /// The processor reads the whole run values, but its input did not capture them.
    #[error("input does not capture the run values")]
    ValuesNotCaptured,
}

/// Error raised by the parameter binder.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Cannot bind '{field}' for processor '{processor}': {failure}")]
pub struct ParameterBindingError {
    /// The processor being bound.
    pub processor: String,
    /// The field that failed.
    pub field: String,
    /// The reason.
    pub failure: BindingFailure,
}

impl ParameterBindingError {
    /// Creates a new binding error.
    #[must_use]
    pub fn new(processor: impl Into<String>, field: impl Into<String>, failure: BindingFailure) -> Self {
        Self {
            processor: processor.into(),
            field: field.into(),
            failure,
        }
    }
}

/// Errors raised while executing a processor or wrapping an endpoint.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// Reading the run values failed.
    #[error(transparent)]
    Values(#[from] ValuesError),

    /// Binding a processor input failed.
    #[error(transparent)]
    Binding(#[from] ParameterBindingError),

    /// A composite has no parts to compose.
    #[error("Composite '{composite}' has no parts")]
    EmptyComposite {
        /// The composite name.
        composite: String,
    },

    /// A composite part cannot wrap endpoints.
    #[error("Part {index} ('{part}') of '{composite}' is not an HTTP processor")]
    NotHttpProcessor {
        /// The composite name.
        composite: String,
        /// Index of the offending part.
        index: usize,
        /// Name of the offending part.
        part: String,
    },

    /// A unit-specific failure, passed through unchanged.
    #[error(transparent)]
    Execution(#[from] anyhow::Error),
}

impl ProcessorError {
    /// Creates a unit-specific execution error from a message.
    #[must_use]
    pub fn execution<M>(message: M) -> Self
    where
        M: std::fmt::Display + std::fmt::Debug + Send + Sync + 'static,
    {
        Self::Execution(anyhow::Error::msg(message))
    }
}

/// Errors raised by a request endpoint.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// The request could not be delivered.
    #[error("Transport failure in '{endpoint}': {message}")]
    Transport {
        /// The endpoint name.
        endpoint: String,
        /// Failure description.
        message: String,
    },

    /// Any other failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EndpointError {
    /// Creates a transport error.
    #[must_use]
    pub fn transport(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}
