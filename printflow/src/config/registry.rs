//! Registry of named processors.

use crate::errors::ConfigurationError;
use crate::processors::ProcessorNode;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

/// Registry of configured processors, keyed by name.
///
/// Nodes are cheap to clone, so lookups hand out clones instead of borrowing
/// through the lock.
#[derive(Debug, Default)]
pub struct ProcessorRegistry {
    nodes: RwLock<HashMap<String, ProcessorNode>>,
}

impl ProcessorRegistry {
    /// Creates a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node under its own name.
    ///
    /// # Errors
    ///
    /// Returns a `CONFIG-DUPLICATE-PROCESSOR` error if the name is taken.
    pub fn register(&self, node: ProcessorNode) -> Result<(), ConfigurationError> {
        let name = node.name().to_string();
        self.register_as(name, node)
    }

    /// Registers a node under an explicit name.
    ///
    /// # Errors
    ///
    /// Returns a `CONFIG-DUPLICATE-PROCESSOR` error if the name is taken.
    pub fn register_as(
        &self,
        name: impl Into<String>,
        node: ProcessorNode,
    ) -> Result<(), ConfigurationError> {
        let name = name.into();
        let mut nodes = self.nodes.write();
        if nodes.contains_key(&name) {
            return Err(ConfigurationError::duplicate_processor(&name));
        }

        debug!(processor = %name, http = node.is_http(), "Registered processor");
        nodes.insert(name, node);
        Ok(())
    }

    /// Returns the node registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ProcessorNode> {
        self.nodes.read().get(name).cloned()
    }

    /// Resolves a name or reports it as unknown.
    ///
    /// # Errors
    ///
    /// Returns a `CONFIG-UNKNOWN-PROCESSOR` error.
    pub fn resolve(&self, name: &str) -> Result<ProcessorNode, ConfigurationError> {
        self.get(name)
            .ok_or_else(|| ConfigurationError::unknown_processor(name))
    }

    /// Checks if a name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.read().contains_key(name)
    }

    /// Returns all registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.nodes.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the number of registered processors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.read().len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::codes;
    use crate::testing::{CallLog, NoOpProcessor, LayerProcessor};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_register_and_resolve() {
        let registry = ProcessorRegistry::new();
        registry
            .register(ProcessorNode::http(LayerProcessor::new("auth", CallLog::new())))
            .unwrap();
        registry
            .register(ProcessorNode::plain(NoOpProcessor::new("legend")))
            .unwrap();

        assert_eq!(registry.names(), vec!["auth", "legend"]);
        assert!(registry.resolve("auth").unwrap().is_http());
        assert!(!registry.resolve("legend").unwrap().is_http());
    }

    #[test]
    fn test_duplicate_rejected() {
        let registry = ProcessorRegistry::new();
        registry
            .register(ProcessorNode::plain(NoOpProcessor::new("legend")))
            .unwrap();

        let err = registry
            .register(ProcessorNode::plain(NoOpProcessor::new("legend")))
            .unwrap_err();
        assert_eq!(err.code(), Some(codes::DUPLICATE_PROCESSOR));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_name() {
        let registry = ProcessorRegistry::new();
        let err = registry.resolve("proxy").unwrap_err();
        assert_eq!(err.code(), Some(codes::UNKNOWN_PROCESSOR));
        assert!(registry.is_empty());
    }
}
