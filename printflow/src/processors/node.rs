//! Configured processor handles.

use super::{HttpProcessor, Processor, ProcessorOutput};
use crate::errors::{ConfigurationError, ProcessorError};
use crate::shape::{ProcessorInput, Shape};
use crate::values::Values;
use std::sync::Arc;

/// A configured processor, tagged with the capability it was registered with.
///
/// Whether a unit can decorate endpoints is decided when it is registered,
/// not discovered at run time: configuration code builds either a `Plain`
/// or an `Http` node, and composites reject `Plain` parts during validation.
#[derive(Debug, Clone)]
pub enum ProcessorNode {
    /// A processor that cannot decorate endpoints.
    Plain(Arc<dyn Processor>),
    /// A processor that decorates the request endpoint.
    Http(Arc<dyn HttpProcessor>),
}

impl ProcessorNode {
    /// Wraps a plain processor.
    pub fn plain(processor: impl Processor + 'static) -> Self {
        Self::Plain(Arc::new(processor))
    }

    /// Wraps an HTTP processor.
    pub fn http(processor: impl HttpProcessor + 'static) -> Self {
        Self::Http(Arc::new(processor))
    }

    /// Returns the processor name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Plain(p) => p.name(),
            Self::Http(p) => p.name(),
        }
    }

    /// Returns the input shape.
    #[must_use]
    pub fn input_shape(&self) -> &Shape {
        match self {
            Self::Plain(p) => p.input_shape(),
            Self::Http(p) => p.input_shape(),
        }
    }

    /// Returns the output shape.
    #[must_use]
    pub fn output_shape(&self) -> &Shape {
        match self {
            Self::Plain(p) => p.output_shape(),
            Self::Http(p) => p.output_shape(),
        }
    }

    /// Appends the processor's configuration errors.
    pub fn validate(&self, errors: &mut Vec<ConfigurationError>) {
        match self {
            Self::Plain(p) => p.validate(errors),
            Self::Http(p) => p.validate(errors),
        }
    }

    /// Executes the processor.
    ///
    /// # Errors
    ///
    /// Propagates the processor's error unchanged.
    pub fn execute(
        &self,
        input: &ProcessorInput,
        values: &mut Values,
    ) -> Result<ProcessorOutput, ProcessorError> {
        match self {
            Self::Plain(p) => p.execute(input, values),
            Self::Http(p) => p.execute(input, values),
        }
    }

    /// Returns the HTTP processor, if this node is one.
    #[must_use]
    pub fn as_http(&self) -> Option<&Arc<dyn HttpProcessor>> {
        match self {
            Self::Http(p) => Some(p),
            Self::Plain(_) => None,
        }
    }

    /// Returns true if this node can decorate endpoints.
    #[must_use]
    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

impl From<Arc<dyn HttpProcessor>> for ProcessorNode {
    fn from(processor: Arc<dyn HttpProcessor>) -> Self {
        Self::Http(processor)
    }
}

impl From<Arc<dyn Processor>> for ProcessorNode {
    fn from(processor: Arc<dyn Processor>) -> Self {
        Self::Plain(processor)
    }
}
