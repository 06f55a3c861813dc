//! Processor output values.

use crate::endpoint::SharedEndpoint;
use crate::errors::ValuesError;
use crate::values::{AnyValue, REQUEST_ENDPOINT_KEY};
use std::any::Any;
use std::collections::HashMap;

/// Named values produced by a processor.
///
/// The runner writes every entry back into the run values under its name.
#[derive(Debug, Clone, Default)]
pub struct ProcessorOutput {
    fields: HashMap<String, AnyValue>,
}

impl ProcessorOutput {
    /// Creates an empty output.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value.
    #[must_use]
    pub fn with<T: Any + Send + Sync>(mut self, name: impl Into<String>, value: T) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a value, replacing any previous one.
    pub fn insert<T: Any + Send + Sync>(&mut self, name: impl Into<String>, value: T) {
        self.fields.insert(name.into(), AnyValue::new(value));
    }

    /// Returns a clone of an output value.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound` or `TypeMismatch`.
    pub fn get<T: Any + Clone>(&self, name: &str) -> Result<T, ValuesError> {
        let value = self
            .fields
            .get(name)
            .ok_or_else(|| ValuesError::key_not_found(name))?;

        value.downcast_ref::<T>().cloned().ok_or_else(|| {
            ValuesError::type_mismatch(name, std::any::type_name::<T>(), value.type_name())
        })
    }

    /// Returns the endpoint produced under [`REQUEST_ENDPOINT_KEY`].
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound` or `TypeMismatch`.
    pub fn endpoint(&self) -> Result<SharedEndpoint, ValuesError> {
        self.get::<SharedEndpoint>(REQUEST_ENDPOINT_KEY)
    }

    /// Returns the output names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the output is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl IntoIterator for ProcessorOutput {
    type Item = (String, AnyValue);
    type IntoIter = std::collections::hash_map::IntoIter<String, AnyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
