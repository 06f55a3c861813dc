//! The validated processor configuration of a service.

use super::{CompositeConfig, ProcessorRegistry, ServiceSettings};
use crate::errors::{ConfigurationError, ConfigurationReport, ErrorInfo};
use crate::processors::{ProcessorNode, ProcessorRunner};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One entry of a configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProcessorConfig {
    /// A registered processor, by name: `{ "processor": "auth" }`.
    Named {
        /// Registered name.
        processor: String,
    },
    /// A composite: `{ "composite": { "name": ..., "parts": [...] } }`.
    Composite {
        /// The composite description.
        composite: CompositeConfig,
    },
}

/// Serialized form of a [`Configuration`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationDocument {
    /// Service settings.
    #[serde(default)]
    pub settings: ServiceSettings,
    /// Processors, in run order.
    #[serde(default)]
    pub processors: Vec<ProcessorConfig>,
}

/// The processors a service runs, together with its settings.
#[derive(Debug, Clone, Default)]
pub struct Configuration {
    settings: ServiceSettings,
    processors: Vec<ProcessorNode>,
}

impl Configuration {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new(settings: ServiceSettings) -> Self {
        Self {
            settings,
            processors: Vec::new(),
        }
    }

    /// Appends a processor.
    #[must_use]
    pub fn with_processor(mut self, node: impl Into<ProcessorNode>) -> Self {
        self.processors.push(node.into());
        self
    }

    /// Builds a configuration from a parsed document.
    ///
    /// A composite can be used as a part by any later entry of the same
    /// document. Assembled composites are registered in `registry` under their
    /// own name only once the whole document resolved; a rejected document
    /// leaves the registry untouched.
    ///
    /// # Errors
    ///
    /// Returns a report with every unknown or duplicate name.
    pub fn from_document(
        document: ConfigurationDocument,
        registry: &ProcessorRegistry,
    ) -> Result<Self, ConfigurationReport> {
        let mut configuration = Self::new(document.settings);
        let mut assembled: Vec<ProcessorNode> = Vec::new();
        let mut errors = Vec::new();

        for entry in &document.processors {
            let resolve = |name: &str| {
                assembled
                    .iter()
                    .find(|node| node.name() == name)
                    .cloned()
                    .map_or_else(|| registry.resolve(name), Ok)
            };

            match entry {
                ProcessorConfig::Named { processor } => match resolve(processor.as_str()) {
                    Ok(node) => configuration.processors.push(node),
                    Err(e) => errors.push(e),
                },
                ProcessorConfig::Composite { composite } => {
                    match composite.assemble_with(resolve) {
                        Ok(built) => {
                            let node = ProcessorNode::http(built);
                            let taken = registry.contains(node.name())
                                || assembled.iter().any(|n| n.name() == node.name());
                            if taken {
                                errors.push(ConfigurationError::duplicate_processor(node.name()));
                            }
                            configuration.processors.push(node.clone());
                            assembled.push(node);
                        }
                        Err(report) => errors.extend(report.errors),
                    }
                }
            }
        }

        ConfigurationReport::new(errors).into_result()?;

        let errors: Vec<ConfigurationError> = assembled
            .into_iter()
            .filter_map(|node| registry.register(node).err())
            .collect();
        ConfigurationReport::new(errors).into_result()?;
        Ok(configuration)
    }

    /// Parses a JSON document and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns a `CONFIG-PARSE` report for malformed JSON, otherwise the
    /// errors of [`Configuration::from_document`].
    pub fn from_json(json: &str, registry: &ProcessorRegistry) -> Result<Self, ConfigurationReport> {
        let document: ConfigurationDocument = serde_json::from_str(json)
            .map_err(|e| ConfigurationReport::new(vec![ConfigurationError::parse(e)]))?;
        Self::from_document(document, registry)
    }

    /// Returns the settings.
    #[must_use]
    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Returns the processors, in run order.
    #[must_use]
    pub fn processors(&self) -> &[ProcessorNode] {
        &self.processors
    }

    /// Collects the configuration errors of every processor.
    ///
    /// Validation never executes a processor and never wraps an endpoint.
    #[must_use]
    pub fn validate(&self) -> ConfigurationReport {
        let mut errors = Vec::new();
        for processor in &self.processors {
            processor.validate(&mut errors);
        }

        let report = ConfigurationReport::new(errors);
        info!(
            processors = self.processors.len(),
            errors = report.len(),
            "Validated configuration"
        );
        report
    }

    /// Validates and refuses to continue on errors when the settings ask so.
    ///
    /// # Errors
    ///
    /// Returns the report if it holds errors and `fail_on_validation_error`
    /// is set.
    pub fn ensure_valid(&self) -> Result<(), ConfigurationReport> {
        let report = self.validate();
        if report.is_valid() {
            return Ok(());
        }

        if self.settings.fail_on_validation_error {
            return Err(report);
        }

        for error in &report.errors {
            warn!(
                processor = error.processor.as_deref().unwrap_or("-"),
                code = error.code().unwrap_or("-"),
                details = ?error.error_info.as_ref().map(ErrorInfo::to_dict),
                "Ignoring configuration error: {}",
                error.message
            );
        }
        Ok(())
    }

    /// Returns a runner configured from the settings.
    #[must_use]
    pub fn runner(&self) -> ProcessorRunner {
        ProcessorRunner::from_settings(&self.settings)
    }
}
