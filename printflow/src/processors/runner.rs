//! Sequential processor execution.

use super::{Processor, ProcessorNode};
use crate::config::ServiceSettings;
use crate::errors::{BindingFailure, ParameterBindingError, ProcessorError};
use crate::observability::RunTimer;
use crate::shape::ParameterBinder;
use crate::values::Values;
use tracing::{debug, warn};

/// Runs processors against the run values.
///
/// A run binds the processor's input shape, executes it and writes every
/// output value back into the run values under its output name. Outputs
/// the output shape does not declare are rejected, or written with a
/// warning when `reject_undeclared_outputs` is off.
#[derive(Debug, Clone, Copy)]
pub struct ProcessorRunner {
    reject_undeclared_outputs: bool,
}

impl Default for ProcessorRunner {
    fn default() -> Self {
        Self {
            reject_undeclared_outputs: true,
        }
    }
}

impl ProcessorRunner {
    /// Creates a runner that rejects undeclared outputs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a runner configured from the service settings.
    #[must_use]
    pub fn from_settings(settings: &ServiceSettings) -> Self {
        Self {
            reject_undeclared_outputs: settings.throw_error_on_extra_parameters,
        }
    }

    /// Sets whether undeclared outputs fail the run.
    #[must_use]
    pub fn with_reject_undeclared_outputs(mut self, reject: bool) -> Self {
        self.reject_undeclared_outputs = reject;
        self
    }

    /// Returns true if undeclared outputs fail the run.
    #[must_use]
    pub fn rejects_undeclared_outputs(&self) -> bool {
        self.reject_undeclared_outputs
    }

    /// Runs one processor and returns the names it wrote, sorted.
    ///
    /// # Errors
    ///
    /// Propagates binding and execution errors unchanged. Nothing is written
    /// to `values` by the runner when the processor fails.
    pub fn run<P>(&self, processor: &P, values: &mut Values) -> Result<Vec<String>, ProcessorError>
    where
        P: Processor + ?Sized,
    {
        let name = processor.name();
        let run_id = values.run_id();
        let timer = RunTimer::start(name, run_id);

        let input = ParameterBinder::bind(name, processor.input_shape(), values)?;
        let output = match processor.execute(&input, values) {
            Ok(output) => output,
            Err(e) => {
                timer.fail(&e);
                return Err(e);
            }
        };

        let declared = processor.output_shape();
        let undeclared: Vec<&str> = output
            .names()
            .into_iter()
            .filter(|field| declared.field(field).is_none())
            .collect();
        if let Some(field) = undeclared.first() {
            if self.reject_undeclared_outputs {
                let error: ProcessorError =
                    ParameterBindingError::new(name, *field, BindingFailure::Undeclared).into();
                timer.fail(&error);
                return Err(error);
            }
            warn!(processor = name, %run_id, fields = ?undeclared, "Writing undeclared outputs");
        }

        let mut written = Vec::with_capacity(output.len());
        for (field, value) in output {
            debug!(processor = name, %run_id, field = %field, "Writing output");
            values.put_value(field.clone(), value);
            written.push(field);
        }
        written.sort();

        timer.finish(written.len());
        Ok(written)
    }

    /// Runs a configured node.
    ///
    /// # Errors
    ///
    /// Same as [`ProcessorRunner::run`].
    pub fn run_node(
        &self,
        node: &ProcessorNode,
        values: &mut Values,
    ) -> Result<Vec<String>, ProcessorError> {
        match node {
            ProcessorNode::Plain(processor) => self.run(processor.as_ref(), values),
            ProcessorNode::Http(processor) => self.run(processor.as_ref(), values),
        }
    }

    /// Runs the nodes in order, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first processor error.
    pub fn run_all(&self, nodes: &[ProcessorNode], values: &mut Values) -> Result<(), ProcessorError> {
        for node in nodes {
            self.run_node(node, values)?;
        }
        Ok(())
    }
}
