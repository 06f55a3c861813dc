//! Field and shape descriptors.

use crate::values::AnyValue;
use std::any::{Any, TypeId};
use std::fmt;

fn default_of<T: Default + Any + Send + Sync>() -> AnyValue {
    AnyValue::new(T::default())
}

/// A single declared field.
#[derive(Clone)]
pub struct FieldSpec {
    name: String,
    type_id: TypeId,
    type_name: &'static str,
    default: Option<fn() -> AnyValue>,
}

impl FieldSpec {
    /// Declares a required field of type `T`.
    #[must_use]
    pub fn required<T: Any + Send + Sync>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            default: None,
        }
    }

    /// Declares an optional field of type `T`, defaulting to `T::default()`.
    #[must_use]
    pub fn optional<T: Default + Any + Send + Sync>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            default: Some(default_of::<T>),
        }
    }

    /// Returns the field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type name.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns true if the field must be present in the run values.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// Returns true if `value` has the declared type.
    #[must_use]
    pub fn accepts(&self, value: &AnyValue) -> bool {
        value.type_id() == self.type_id
    }

    /// Builds the default value for an optional field.
    #[must_use]
    pub fn default_value(&self) -> Option<AnyValue> {
        self.default.map(|make| make())
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("required", &self.is_required())
            .finish()
    }
}

/// The declared shape of a processor's input or output.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    fields: Vec<FieldSpec>,
    captures_values: bool,
}

impl Shape {
    /// Creates an empty shape.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A shape whose bound input carries a snapshot of the whole run values.
    ///
    /// Used by processors that bind further processors themselves.
    #[must_use]
    pub fn all_values() -> Self {
        Self {
            fields: Vec::new(),
            captures_values: true,
        }
    }

    /// Adds a required field of type `T`.
    #[must_use]
    pub fn required<T: Any + Send + Sync>(self, name: impl Into<String>) -> Self {
        self.with_field(FieldSpec::required::<T>(name))
    }

    /// Adds an optional field of type `T`.
    #[must_use]
    pub fn optional<T: Default + Any + Send + Sync>(self, name: impl Into<String>) -> Self {
        self.with_field(FieldSpec::optional::<T>(name))
    }

    /// Adds a field. A later field replaces an earlier one of the same name.
    #[must_use]
    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.retain(|f| f.name != field.name);
        self.fields.push(field);
        self
    }

    /// Returns the declared fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the names of the required fields.
    #[must_use]
    pub fn required_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|f| f.is_required())
            .map(FieldSpec::name)
            .collect()
    }

    /// Returns true if bound inputs carry the whole run values.
    #[must_use]
    pub fn captures_values(&self) -> bool {
        self.captures_values
    }

    /// Returns true if the shape declares no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}
