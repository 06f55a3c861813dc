//! The per-run value store.

use super::AnyValue;
use crate::endpoint::SharedEndpoint;
use crate::errors::ValuesError;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Key under which the current request endpoint is stored.
pub const REQUEST_ENDPOINT_KEY: &str = "request_endpoint";

/// A heterogeneous key/value store threaded through one processing run.
///
/// Writes overwrite any prior entry (last write wins). Reads are checked:
/// a missing key or a stored value of another type is an error, never a
/// silent default.
///
/// A `Values` instance belongs to a single run. Mutation needs `&mut self`,
/// so concurrent runs must each own their own instance.
#[derive(Clone)]
pub struct Values {
    run_id: Uuid,
    entries: HashMap<String, AnyValue>,
}

impl Values {
    /// Creates an empty store with a fresh run id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            entries: HashMap::new(),
        }
    }

    /// Sets the run id.
    #[must_use]
    pub fn with_run_id(mut self, run_id: Uuid) -> Self {
        self.run_id = run_id;
        self
    }

    /// Stores `value` and returns the store, for building fixtures.
    #[must_use]
    pub fn with<T: Any + Send + Sync>(mut self, key: impl Into<String>, value: T) -> Self {
        self.put(key, value);
        self
    }

    /// Returns the run id.
    #[must_use]
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Stores a value under `key`, replacing any previous entry.
    pub fn put<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.entries.insert(key.into(), AnyValue::new(value));
    }

    /// Stores an already erased value under `key`, replacing any previous entry.
    pub fn put_value(&mut self, key: impl Into<String>, value: AnyValue) {
        self.entries.insert(key.into(), value);
    }

    /// Returns a clone of the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound` if nothing is stored under `key` and
    /// `TypeMismatch` if the stored value is not a `T`.
    pub fn get<T: Any + Clone>(&self, key: &str) -> Result<T, ValuesError> {
        self.get_ref::<T>(key).cloned()
    }

    /// Borrows the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Same as [`Values::get`].
    pub fn get_ref<T: Any>(&self, key: &str) -> Result<&T, ValuesError> {
        let value = self
            .entries
            .get(key)
            .ok_or_else(|| ValuesError::key_not_found(key))?;

        value.downcast_ref::<T>().ok_or_else(|| {
            ValuesError::type_mismatch(key, std::any::type_name::<T>(), value.type_name())
        })
    }

    /// Returns the erased value stored under `key`, if any.
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<&AnyValue> {
        self.entries.get(key)
    }

    /// Stores the current request endpoint.
    pub fn put_endpoint(&mut self, endpoint: SharedEndpoint) {
        self.put(REQUEST_ENDPOINT_KEY, endpoint);
    }

    /// Returns the current request endpoint.
    ///
    /// # Errors
    ///
    /// Returns `KeyNotFound` if no endpoint is stored and `TypeMismatch` if
    /// the well-known key holds something else.
    pub fn endpoint(&self) -> Result<SharedEndpoint, ValuesError> {
        self.get::<SharedEndpoint>(REQUEST_ENDPOINT_KEY)
    }

    /// Checks if a key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes and returns the value under `key`.
    pub fn remove(&mut self, key: &str) -> Option<AnyValue> {
        self.entries.remove(key)
    }

    /// Returns all keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Creates a store for a nested run of the same request.
    ///
    /// The child sees every entry of the parent but writes only to itself.
    #[must_use]
    pub fn fork(&self) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            entries: self.entries.clone(),
        }
    }
}

impl Default for Values {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<(&str, &str)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.type_name()))
            .collect();
        types.sort_unstable();

        f.debug_struct("Values")
            .field("run_id", &self.run_id)
            .field("entries", &types)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let mut values = Values::new();
        values.put("dpi", 300_u32);

        assert_eq!(values.get::<u32>("dpi"), Ok(300));
        assert!(values.contains_key("dpi"));
        assert!(!values.contains_key("other"));
    }

    #[test]
    fn test_last_write_wins() {
        let mut values = Values::new();
        values.put("layout", "A4 portrait".to_string());
        values.put("layout", "A3 landscape".to_string());

        assert_eq!(values.get::<String>("layout").unwrap(), "A3 landscape");
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn test_overwrite_with_other_type() {
        let mut values = Values::new();
        values.put("scale", 25_000_u32);
        values.put("scale", 25_000.0_f64);

        assert_eq!(values.get::<f64>("scale"), Ok(25_000.0));
        assert!(values.get::<u32>("scale").is_err());
    }

    #[test]
    fn test_missing_key() {
        let values = Values::new();
        assert_eq!(
            values.get::<u32>("dpi"),
            Err(ValuesError::key_not_found("dpi"))
        );
    }

    #[test]
    fn test_type_mismatch() {
        let values = Values::new().with("dpi", "300".to_string());

        match values.get::<u32>("dpi") {
            Err(ValuesError::TypeMismatch { key, expected, actual }) => {
                assert_eq!(key, "dpi");
                assert_eq!(expected, "u32");
                assert_eq!(actual, "alloc::string::String");
            }
            other => panic!("expected type mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_remove_and_keys() {
        let mut values = Values::new().with("b", 2_i32).with("a", 1_i32);
        assert_eq!(values.keys(), vec!["a".to_string(), "b".to_string()]);

        assert!(values.remove("a").is_some());
        assert!(values.remove("a").is_none());
        assert_eq!(values.len(), 1);
    }
}
