//! Dynamically typed value handle.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

/// A shared, dynamically typed value.
///
/// Clones share the same allocation. The concrete type name is kept for
/// error messages since `dyn Any` cannot report it.
#[derive(Clone)]
pub struct AnyValue {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl AnyValue {
    /// Wraps a value.
    #[must_use]
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Returns the name of the stored type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the [`TypeId`] of the stored value.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        (*self.inner).type_id()
    }

    /// Returns true if the stored value is a `T`.
    #[must_use]
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Borrows the stored value as a `T`, if it is one.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast() {
        let value = AnyValue::new(42_u32);
        assert!(value.is::<u32>());
        assert!(!value.is::<i64>());
        assert_eq!(value.downcast_ref::<u32>(), Some(&42));
        assert_eq!(value.type_id(), TypeId::of::<u32>());
        assert_eq!(value.type_name(), "u32");
    }

    #[test]
    fn test_clones_share_allocation() {
        let value = AnyValue::new(String::from("shared"));
        let copy = value.clone();
        let a = value.downcast_ref::<String>().unwrap();
        let b = copy.downcast_ref::<String>().unwrap();
        assert!(std::ptr::eq(a, b));
    }
}
