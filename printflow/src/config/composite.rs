//! Composites described by name.

use super::ProcessorRegistry;
use crate::errors::{ConfigurationError, ConfigurationReport};
use crate::processors::{CompositeHttpProcessor, ProcessorNode};
use serde::{Deserialize, Serialize};

/// A composite HTTP processor described by the names of its parts.
///
/// ```json
/// { "name": "upstream", "parts": ["auth", "proxy", "user-agent"] }
/// ```
///
/// Part order is kept as written: the first name becomes the outermost layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeConfig {
    /// Name of the composite.
    #[serde(default = "default_composite_name")]
    pub name: String,
    /// Registered names of the parts, outermost first.
    #[serde(default)]
    pub parts: Vec<String>,
}

fn default_composite_name() -> String {
    CompositeHttpProcessor::DEFAULT_NAME.to_string()
}

impl CompositeConfig {
    /// Creates a config with no parts.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: Vec::new(),
        }
    }

    /// Appends a part name.
    #[must_use]
    pub fn with_part(mut self, name: impl Into<String>) -> Self {
        self.parts.push(name.into());
        self
    }

    /// Resolves every part against `registry` and builds the composite.
    ///
    /// Only name resolution is checked here. Structural problems such as an
    /// empty part list or a part that cannot wrap endpoints are left to
    /// [`Configuration::validate`](super::Configuration::validate).
    ///
    /// # Errors
    ///
    /// Returns a report with one `CONFIG-UNKNOWN-PROCESSOR` error per
    /// unresolved name.
    pub fn assemble(
        &self,
        registry: &ProcessorRegistry,
    ) -> Result<CompositeHttpProcessor, ConfigurationReport> {
        self.assemble_with(|name| registry.resolve(name))
    }

    /// Builds the composite, resolving part names with `resolve`.
    ///
    /// # Errors
    ///
    /// Returns a report with every error `resolve` produced.
    pub fn assemble_with<F>(&self, resolve: F) -> Result<CompositeHttpProcessor, ConfigurationReport>
    where
        F: Fn(&str) -> Result<ProcessorNode, ConfigurationError>,
    {
        let mut parts = Vec::with_capacity(self.parts.len());
        let mut errors = Vec::new();

        for name in &self.parts {
            match resolve(name) {
                Ok(node) => parts.push(node),
                Err(e) => errors.push(e.with_processor(&self.name)),
            }
        }

        ConfigurationReport::new(errors).into_result()?;
        Ok(CompositeHttpProcessor::new(parts).with_name(&self.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::codes;
    use crate::processors::Processor;
    use crate::testing::{CallLog, LayerProcessor};
    use pretty_assertions::assert_eq;

    fn registry(log: &CallLog) -> ProcessorRegistry {
        let registry = ProcessorRegistry::new();
        for name in ["auth", "proxy"] {
            registry
                .register(ProcessorNode::http(LayerProcessor::new(name, log.clone())))
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_assemble_keeps_order() {
        let log = CallLog::new();
        let config: CompositeConfig =
            serde_json::from_str(r#"{"name": "upstream", "parts": ["proxy", "auth"]}"#).unwrap();

        let composite = config.assemble(&registry(&log)).unwrap();

        assert_eq!(composite.name(), "upstream");
        let names: Vec<&str> = composite.parts().iter().map(ProcessorNode::name).collect();
        assert_eq!(names, vec!["proxy", "auth"]);
    }

    #[test]
    fn test_assemble_reports_every_unknown_name() {
        let log = CallLog::new();
        let config = CompositeConfig::new("upstream")
            .with_part("auth")
            .with_part("cache")
            .with_part("retry");

        let report = config.assemble(&registry(&log)).unwrap_err();

        assert_eq!(report.len(), 2);
        assert!(report.has_code(codes::UNKNOWN_PROCESSOR));
        assert_eq!(report.errors[0].processor.as_deref(), Some("upstream"));
    }

    #[test]
    fn test_defaults() {
        let config: CompositeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.name, CompositeHttpProcessor::DEFAULT_NAME);

        let composite = config.assemble(&ProcessorRegistry::new()).unwrap();
        assert!(composite.is_empty());
    }
}
