//! Layering processors and endpoints for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

use crate::endpoint::{HttpEndpoint, HttpRequest, HttpResponse, SharedEndpoint};
use crate::errors::{ConfigurationError, EndpointError, ProcessorError};
use crate::processors::{
    decorate_current_endpoint, endpoint_output_shape, HttpProcessor, Processor, ProcessorOutput,
};
use crate::shape::{ProcessorInput, Shape};
use crate::values::Values;

/// A shared, ordered log of calls.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn record(&self, entry: impl Into<String>) {
        self.entries.lock().push(entry.into());
    }

    /// Returns a copy of all entries.
    #[must_use]
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Clears the log.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

/// A raw endpoint that records `"{name}:send"` and answers `200 OK`.
#[derive(Debug)]
pub struct RecordingEndpoint {
    name: String,
    log: CallLog,
    labels: Vec<String>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingEndpoint {
    /// Creates a new recording endpoint.
    #[must_use]
    pub fn new(name: impl Into<String>, log: CallLog) -> Self {
        Self {
            name: name.into(),
            log,
            labels: Vec::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sets the initial labels.
    #[must_use]
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl HttpEndpoint for RecordingEndpoint {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, EndpointError> {
        self.log.record(format!("{}:send", self.name));
        self.requests.lock().push(request);
        Ok(HttpResponse::ok())
    }

    fn labels(&self) -> Vec<String> {
        self.labels.clone()
    }
}

/// The endpoint produced by [`LayerProcessor::wrap`].
///
/// Records `"{name}:before"` before delegating and `"{name}:after"` once the
/// inner endpoint answered, and adds the header `x-layer-{name}` to the
/// request.
#[derive(Debug)]
pub struct LayerEndpoint {
    name: String,
    inner: SharedEndpoint,
    log: CallLog,
}

#[async_trait]
impl HttpEndpoint for LayerEndpoint {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, EndpointError> {
        self.log.record(format!("{}:before", self.name));
        let request = request.with_header(format!("x-layer-{}", self.name), "1");
        let response = self.inner.send(request).await?;
        self.log.record(format!("{}:after", self.name));
        Ok(response)
    }

    fn labels(&self) -> Vec<String> {
        let mut labels = self.inner.labels();
        labels.push(self.name.clone());
        labels
    }
}

/// An HTTP processor that records `"wrap:{name}"` and wraps the endpoint in
/// a [`LayerEndpoint`] labelled with its name.
#[derive(Debug)]
pub struct LayerProcessor {
    name: String,
    log: CallLog,
    input_shape: Shape,
    output_shape: Shape,
    validation_error: Option<String>,
    wrap_error: Option<String>,
}

impl LayerProcessor {
    /// Creates a new layering processor.
    #[must_use]
    pub fn new(name: impl Into<String>, log: CallLog) -> Self {
        Self {
            name: name.into(),
            log,
            input_shape: Shape::new(),
            output_shape: endpoint_output_shape(),
            validation_error: None,
            wrap_error: None,
        }
    }

    /// Sets the input shape the processor binds.
    #[must_use]
    pub fn with_input_shape(mut self, shape: Shape) -> Self {
        self.input_shape = shape;
        self
    }

    /// Makes `validate` report an error with this message.
    #[must_use]
    pub fn with_validation_error(mut self, message: impl Into<String>) -> Self {
        self.validation_error = Some(message.into());
        self
    }

    /// Makes `wrap` fail with this message.
    #[must_use]
    pub fn with_wrap_error(mut self, message: impl Into<String>) -> Self {
        self.wrap_error = Some(message.into());
        self
    }
}

impl Processor for LayerProcessor {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_shape(&self) -> &Shape {
        &self.input_shape
    }

    fn output_shape(&self) -> &Shape {
        &self.output_shape
    }

    fn validate(&self, errors: &mut Vec<ConfigurationError>) {
        if let Some(message) = &self.validation_error {
            errors.push(ConfigurationError::new(message.clone()).with_processor(&self.name));
        }
    }

    fn execute(
        &self,
        input: &ProcessorInput,
        values: &mut Values,
    ) -> Result<ProcessorOutput, ProcessorError> {
        decorate_current_endpoint(self, input, values)
    }
}

impl HttpProcessor for LayerProcessor {
    fn wrap(
        &self,
        _input: &ProcessorInput,
        endpoint: SharedEndpoint,
    ) -> Result<SharedEndpoint, ProcessorError> {
        self.log.record(format!("wrap:{}", self.name));
        if let Some(message) = &self.wrap_error {
            return Err(ProcessorError::execution(message.clone()));
        }

        Ok(Arc::new(LayerEndpoint {
            name: self.name.clone(),
            inner: endpoint,
            log: self.log.clone(),
        }))
    }
}

/// A processor without the HTTP capability that does nothing.
#[derive(Debug)]
pub struct NoOpProcessor {
    name: String,
    shape: Shape,
}

impl NoOpProcessor {
    /// Creates a new no-op processor.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: Shape::new(),
        }
    }
}

impl Processor for NoOpProcessor {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_shape(&self) -> &Shape {
        &self.shape
    }

    fn output_shape(&self) -> &Shape {
        &self.shape
    }

    fn execute(
        &self,
        _input: &ProcessorInput,
        _values: &mut Values,
    ) -> Result<ProcessorOutput, ProcessorError> {
        Ok(ProcessorOutput::new())
    }
}
