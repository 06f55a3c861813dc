//! Processor traits.

use super::ProcessorOutput;
use crate::endpoint::SharedEndpoint;
use crate::errors::{ConfigurationError, ProcessorError};
use crate::shape::{ProcessorInput, Shape};
use crate::values::{Values, REQUEST_ENDPOINT_KEY};
use std::fmt::Debug;

/// Trait for self-describing, self-validating processing units.
///
/// A processor declares the shape of the values it reads and writes. The
/// runner binds the input shape against the run values before calling
/// [`Processor::execute`], so `execute` is never reached with a required
/// field missing.
pub trait Processor: Send + Sync + Debug {
    /// Returns the name of the processor.
    fn name(&self) -> &str;

    /// Returns the shape of the input this processor binds.
    fn input_shape(&self) -> &Shape;

    /// Returns the shape of the output this processor produces.
    fn output_shape(&self) -> &Shape;

    /// Appends configuration problems to `errors`.
    ///
    /// Validation only inspects configuration. It must not fail, and it must
    /// not execute the processor.
    fn validate(&self, _errors: &mut Vec<ConfigurationError>) {}

    /// Executes the processor.
    ///
    /// May read and write the run values. A returned error aborts the run.
    fn execute(
        &self,
        input: &ProcessorInput,
        values: &mut Values,
    ) -> Result<ProcessorOutput, ProcessorError>;
}

/// A processor that decorates the request endpoint.
///
/// [`HttpProcessor::wrap`] must return an endpoint that can stand in for the
/// one it received. Wrapping does not issue requests and does not touch the
/// run values.
pub trait HttpProcessor: Processor {
    /// Wraps `endpoint` and returns the decorated endpoint.
    fn wrap(
        &self,
        input: &ProcessorInput,
        endpoint: SharedEndpoint,
    ) -> Result<SharedEndpoint, ProcessorError>;
}

/// Output shape shared by HTTP processors: the decorated endpoint.
#[must_use]
pub fn endpoint_output_shape() -> Shape {
    Shape::new().required::<SharedEndpoint>(REQUEST_ENDPOINT_KEY)
}

/// Runs a single HTTP processor against the current endpoint.
///
/// Reads the endpoint stored under [`REQUEST_ENDPOINT_KEY`], wraps it and
/// returns it as output. Intended as the body of `execute` for decorators.
///
/// # Errors
///
/// Fails if no endpoint is stored or if wrapping fails.
pub fn decorate_current_endpoint<P>(
    processor: &P,
    input: &ProcessorInput,
    values: &Values,
) -> Result<ProcessorOutput, ProcessorError>
where
    P: HttpProcessor + ?Sized,
{
    let endpoint = values.endpoint()?;
    let decorated = processor.wrap(input, endpoint)?;
    Ok(ProcessorOutput::new().with(REQUEST_ENDPOINT_KEY, decorated))
}
