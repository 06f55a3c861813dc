//! Composite HTTP processor.

use super::{endpoint_output_shape, HttpProcessor, Processor, ProcessorNode, ProcessorOutput};
use crate::endpoint::SharedEndpoint;
use crate::errors::{ConfigurationError, ProcessorError};
use crate::shape::{ParameterBinder, ProcessorInput, Shape};
use crate::values::{Values, REQUEST_ENDPOINT_KEY};
use std::sync::Arc;
use tracing::{debug, warn};

/// An HTTP processor that layers several HTTP processors into one endpoint.
///
/// `parts[0]` becomes the outermost layer and the last part the layer
/// closest to the raw endpoint: on every request the first part's pre-call
/// behavior runs first and its post-call behavior runs last.
///
/// Decorators have to be built inside-out, so the parts are applied in
/// reverse order: the last part wraps the raw endpoint, the part before it
/// wraps that result, and so on up to `parts[0]`.
#[derive(Debug)]
pub struct CompositeHttpProcessor {
    name: String,
    parts: Vec<ProcessorNode>,
    input_shape: Shape,
    output_shape: Shape,
}

impl CompositeHttpProcessor {
    /// Name used when none is configured.
    pub const DEFAULT_NAME: &'static str = "composite-http-processor";

    /// Creates a composite over `parts`.
    #[must_use]
    pub fn new(parts: Vec<ProcessorNode>) -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            parts,
            input_shape: Shape::all_values(),
            output_shape: endpoint_output_shape(),
        }
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replaces the parts. Configuration-time only.
    pub fn set_parts(&mut self, parts: Vec<ProcessorNode>) {
        self.parts = parts;
    }

    /// Appends a part. Configuration-time only.
    pub fn push_part(&mut self, part: ProcessorNode) {
        self.parts.push(part);
    }

    /// Returns the parts, outermost first.
    #[must_use]
    pub fn parts(&self) -> &[ProcessorNode] {
        &self.parts
    }

    /// Returns the number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns true if there are no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Layers every part around `endpoint`, binding each part against `values`.
    ///
    /// All parts are checked before the first `wrap` call, so a composite that
    /// failed validation never yields a partially layered endpoint.
    ///
    /// # Errors
    ///
    /// Returns `EmptyComposite` or `NotHttpProcessor` for an invalid part list,
    /// and propagates binding and wrapping errors unchanged.
    pub fn compose(
        &self,
        values: &Values,
        endpoint: SharedEndpoint,
    ) -> Result<SharedEndpoint, ProcessorError> {
        let processors = self.http_parts()?;

        let mut layered = endpoint;
        for (index, processor) in processors.iter().enumerate().rev() {
            let input = ParameterBinder::bind(processor.name(), processor.input_shape(), values)?;
            layered = processor.wrap(&input, layered)?;
            debug!(
                composite = %self.name,
                part = processor.name(),
                index,
                run_id = %values.run_id(),
                "Wrapped request endpoint"
            );
        }

        debug!(
            composite = %self.name,
            layers = processors.len(),
            labels = ?layered.labels(),
            "Composed request endpoint"
        );
        Ok(layered)
    }

    fn http_parts(&self) -> Result<Vec<&Arc<dyn HttpProcessor>>, ProcessorError> {
        if self.parts.is_empty() {
            return Err(ProcessorError::EmptyComposite {
                composite: self.name.clone(),
            });
        }

        self.parts
            .iter()
            .enumerate()
            .map(|(index, part)| {
                part.as_http().ok_or_else(|| {
                    warn!(
                        composite = %self.name,
                        part = part.name(),
                        index,
                        "Refusing to compose a part that is not an HTTP processor"
                    );
                    ProcessorError::NotHttpProcessor {
                        composite: self.name.clone(),
                        index,
                        part: part.name().to_string(),
                    }
                })
            })
            .collect()
    }
}

impl Default for CompositeHttpProcessor {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Processor for CompositeHttpProcessor {
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
        if self.parts.is_empty() {
            errors.push(ConfigurationError::empty_composite(&self.name));
            return;
        }

        for (index, part) in self.parts.iter().enumerate() {
            match part {
                ProcessorNode::Http(processor) => processor.validate(errors),
                ProcessorNode::Plain(processor) => errors.push(
                    ConfigurationError::not_http_processor(&self.name, index, processor.name()),
                ),
            }
        }
    }

    fn execute(
        &self,
        _input: &ProcessorInput,
        values: &mut Values,
    ) -> Result<ProcessorOutput, ProcessorError> {
        let raw = values.endpoint()?;
        let layered = self.compose(values, raw)?;
        Ok(ProcessorOutput::new().with(REQUEST_ENDPOINT_KEY, layered))
    }
}

impl HttpProcessor for CompositeHttpProcessor {
    fn wrap(
        &self,
        input: &ProcessorInput,
        endpoint: SharedEndpoint,
    ) -> Result<SharedEndpoint, ProcessorError> {
        self.compose(input.values()?, endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::StaticEndpoint;
    use crate::errors::{codes, ValuesError};
    use crate::testing::{CallLog, NoOpProcessor, LayerProcessor};
    use pretty_assertions::assert_eq;

    fn raw_endpoint() -> SharedEndpoint {
        Arc::new(StaticEndpoint::new("raw").with_labels(["e0"]))
    }

    fn layer(name: &str, log: &CallLog) -> ProcessorNode {
        ProcessorNode::http(LayerProcessor::new(name, log.clone()))
    }

    #[test]
    fn test_labels_follow_reverse_construction() {
        let log = CallLog::new();
        let composite = CompositeHttpProcessor::new(vec![layer("a", &log), layer("b", &log)]);
        let mut values = Values::new();
        values.put_endpoint(raw_endpoint());

        let output = composite
            .execute(&ProcessorInput::empty(composite.name()), &mut values)
            .unwrap();

        let layered = output.endpoint().unwrap();
        assert_eq!(layered.labels(), vec!["e0", "b", "a"]);
        assert_eq!(log.entries(), vec!["wrap:b", "wrap:a"]);
    }

    #[test]
    fn test_raw_endpoint_left_untouched() {
        let log = CallLog::new();
        let composite = CompositeHttpProcessor::new(vec![layer("a", &log)]);
        let raw = raw_endpoint();
        let mut values = Values::new();
        values.put_endpoint(raw.clone());

        composite
            .execute(&ProcessorInput::empty(composite.name()), &mut values)
            .unwrap();

        let stored = values.endpoint().unwrap();
        assert!(Arc::ptr_eq(&stored, &raw));
        assert_eq!(stored.labels(), vec!["e0"]);
        assert_eq!(composite.len(), 1);
    }

    #[test]
    fn test_validate_empty_parts() {
        let composite = CompositeHttpProcessor::default();
        let mut errors = Vec::new();

        composite.validate(&mut errors);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), Some(codes::COMPOSITE_EMPTY));
        assert!(errors[0].message.contains("no composite elements"));
    }

    #[test]
    fn test_validate_names_non_http_part() {
        let log = CallLog::new();
        let composite = CompositeHttpProcessor::new(vec![
            layer("auth", &log),
            ProcessorNode::plain(NoOpProcessor::new("legend")),
            layer("proxy", &log),
        ])
        .with_name("http-chain");
        let mut errors = Vec::new();

        composite.validate(&mut errors);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code(), Some(codes::COMPOSITE_NOT_HTTP));
        assert!(errors[0].message.contains("legend"));
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_validate_delegates_to_parts() {
        let log = CallLog::new();
        let composite = CompositeHttpProcessor::new(vec![
            layer("auth", &log),
            ProcessorNode::http(
                LayerProcessor::new("proxy", log.clone()).with_validation_error("proxy host is empty"),
            ),
        ]);
        let mut errors = Vec::new();

        composite.validate(&mut errors);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "proxy host is empty");
    }

    #[test]
    fn test_missing_endpoint_fails_before_wrap() {
        let log = CallLog::new();
        let composite = CompositeHttpProcessor::new(vec![layer("a", &log)]);
        let mut values = Values::new();

        let err = composite
            .execute(&ProcessorInput::empty(composite.name()), &mut values)
            .unwrap_err();

        assert!(matches!(
            err,
            ProcessorError::Values(ValuesError::KeyNotFound { ref key }) if key == REQUEST_ENDPOINT_KEY
        ));
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_wrong_endpoint_type() {
        let log = CallLog::new();
        let composite = CompositeHttpProcessor::new(vec![layer("a", &log)]);
        let mut values = Values::new().with(REQUEST_ENDPOINT_KEY, "http://localhost".to_string());

        let err = composite
            .execute(&ProcessorInput::empty(composite.name()), &mut values)
            .unwrap_err();

        assert!(matches!(
            err,
            ProcessorError::Values(ValuesError::TypeMismatch { .. })
        ));
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_execute_fails_closed_on_plain_part() {
        let log = CallLog::new();
        let composite = CompositeHttpProcessor::new(vec![
            ProcessorNode::plain(NoOpProcessor::new("legend")),
            layer("a", &log),
        ]);
        let mut values = Values::new();
        values.put_endpoint(raw_endpoint());

        let err = composite
            .execute(&ProcessorInput::empty(composite.name()), &mut values)
            .unwrap_err();

        assert!(matches!(err, ProcessorError::NotHttpProcessor { index: 0, .. }));
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_execute_fails_closed_when_empty() {
        let composite = CompositeHttpProcessor::default();
        let mut values = Values::new();
        values.put_endpoint(raw_endpoint());

        let err = composite
            .execute(&ProcessorInput::empty(composite.name()), &mut values)
            .unwrap_err();

        assert!(matches!(err, ProcessorError::EmptyComposite { .. }));
    }

    #[test]
    fn test_wrap_requires_captured_values() {
        let log = CallLog::new();
        let composite = CompositeHttpProcessor::new(vec![layer("a", &log)]);

        let err = composite
            .wrap(&ProcessorInput::empty(composite.name()), raw_endpoint())
            .unwrap_err();

        assert!(matches!(err, ProcessorError::Binding(_)));
    }

    #[test]
    fn test_wrap_with_bound_input() {
        let log = CallLog::new();
        let composite = CompositeHttpProcessor::new(vec![layer("a", &log), layer("b", &log)]);
        let values = Values::new();
        let input = ParameterBinder::bind(composite.name(), composite.input_shape(), &values).unwrap();

        let layered = composite.wrap(&input, raw_endpoint()).unwrap();

        assert_eq!(layered.labels(), vec!["e0", "b", "a"]);
    }

    #[test]
    fn test_output_shape_declares_endpoint() {
        let composite = CompositeHttpProcessor::default();
        assert_eq!(composite.output_shape().required_fields(), vec![REQUEST_ENDPOINT_KEY]);
        assert!(composite.input_shape().captures_values());
        assert_eq!(composite.name(), CompositeHttpProcessor::DEFAULT_NAME);
    }
}
