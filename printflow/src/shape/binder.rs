//! Binding declared inputs against the run values.

use super::Shape;
use crate::errors::{BindingFailure, ParameterBindingError};
use crate::values::{AnyValue, Values};
use std::any::Any;
use std::collections::HashMap;
use tracing::trace;

/// Extracts a processor's input from the run values.
///
/// For every declared field the binder looks up the entry whose key equals
/// the field name:
/// - present with the declared type: bound as is;
/// - present with another type: `TypeMismatch`;
/// - absent and required: `MissingRequired`;
/// - absent and optional: bound to the type's default value.
///
/// Entries the shape does not declare are ignored, so unrelated processors
/// can share one `Values` without coupling.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterBinder;

impl ParameterBinder {
    /// Binds `shape` for `processor` against `values`.
    ///
    /// # Errors
    ///
    /// Returns `ParameterBindingError` for the first field that cannot be bound.
    pub fn bind(
        processor: &str,
        shape: &Shape,
        values: &Values,
    ) -> Result<ProcessorInput, ParameterBindingError> {
        let mut fields = HashMap::with_capacity(shape.len());

        for field in shape.fields() {
            let value = match values.get_value(field.name()) {
                Some(value) if field.accepts(value) => value.clone(),
                Some(value) => {
                    return Err(ParameterBindingError::new(
                        processor,
                        field.name(),
                        BindingFailure::TypeMismatch {
                            expected: field.type_name(),
                            actual: value.type_name(),
                        },
                    ));
                }
                None => field.default_value().ok_or_else(|| {
                    ParameterBindingError::new(
                        processor,
                        field.name(),
                        BindingFailure::MissingRequired,
                    )
                })?,
            };
            fields.insert(field.name().to_string(), value);
        }

        trace!(
            processor,
            run_id = %values.run_id(),
            bound = fields.len(),
            "Bound processor input"
        );

        Ok(ProcessorInput {
            processor: processor.to_string(),
            fields,
            values: shape.captures_values().then(|| values.clone()),
        })
    }
}

/// The bound input of one processor.
#[derive(Debug, Clone)]
pub struct ProcessorInput {
    processor: String,
    fields: HashMap<String, AnyValue>,
    values: Option<Values>,
}

impl ProcessorInput {
    /// Creates an input with no fields.
    #[must_use]
    pub fn empty(processor: impl Into<String>) -> Self {
        Self {
            processor: processor.into(),
            fields: HashMap::new(),
            values: None,
        }
    }

    /// Returns the name of the processor this input was bound for.
    #[must_use]
    pub fn processor(&self) -> &str {
        &self.processor
    }

    /// Returns a clone of a bound field.
    ///
    /// # Errors
    ///
    /// Returns `Undeclared` if the field was not part of the shape and
    /// `TypeMismatch` if it is not a `T`.
    pub fn get<T: Any + Clone>(&self, field: &str) -> Result<T, ParameterBindingError> {
        self.get_ref::<T>(field).cloned()
    }

    /// Borrows a bound field.
    ///
    /// # Errors
    ///
    /// Same as [`ProcessorInput::get`].
    pub fn get_ref<T: Any>(&self, field: &str) -> Result<&T, ParameterBindingError> {
        let value = self.fields.get(field).ok_or_else(|| {
            ParameterBindingError::new(&self.processor, field, BindingFailure::Undeclared)
        })?;

        value.downcast_ref::<T>().ok_or_else(|| {
            ParameterBindingError::new(
                &self.processor,
                field,
                BindingFailure::TypeMismatch {
                    expected: std::any::type_name::<T>(),
                    actual: value.type_name(),
                },
            )
        })
    }

    /// Returns the snapshot of the run values, for shapes that capture them.
    ///
    /// # Errors
    ///
    /// Returns `ValuesNotCaptured` if the shape did not ask for the values.
    pub fn values(&self) -> Result<&Values, ParameterBindingError> {
        self.values.as_ref().ok_or_else(|| {
            ParameterBindingError::new(&self.processor, "*", BindingFailure::ValuesNotCaptured)
        })
    }

    /// Checks if a field was bound.
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns the number of bound fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields were bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct ProxySettings {
        host: String,
        port: u16,
    }

    fn shape() -> Shape {
        Shape::new()
            .required::<String>("auth_token")
            .optional::<ProxySettings>("proxy")
            .optional::<Vec<String>>("allowed_hosts")
    }

    #[test]
    fn test_binds_present_fields() {
        let proxy = ProxySettings {
            host: "proxy.local".to_string(),
            port: 3128,
        };
        let values = Values::new()
            .with("auth_token", "secret".to_string())
            .with("proxy", proxy.clone())
            .with("unrelated", 12_i64);

        let input = ParameterBinder::bind("auth", &shape(), &values).unwrap();

        assert_eq!(input.processor(), "auth");
        assert_eq!(input.len(), 3);
        assert_eq!(input.get::<String>("auth_token").unwrap(), "secret");
        assert_eq!(input.get::<ProxySettings>("proxy").unwrap(), proxy);
        assert!(!input.contains("unrelated"));
    }

    #[test]
    fn test_missing_required_field() {
        let values = Values::new().with("proxy", ProxySettings::default());

        let err = ParameterBinder::bind("auth", &shape(), &values).unwrap_err();
        assert_eq!(err.field, "auth_token");
        assert_eq!(err.failure, BindingFailure::MissingRequired);
    }

    #[test]
    fn test_missing_optional_field_defaults() {
        let values = Values::new().with("auth_token", "secret".to_string());

        let input = ParameterBinder::bind("auth", &shape(), &values).unwrap();
        assert_eq!(input.get::<ProxySettings>("proxy").unwrap(), ProxySettings::default());
        assert!(input.get::<Vec<String>>("allowed_hosts").unwrap().is_empty());
    }

    #[test]
    fn test_incompatible_type() {
        let values = Values::new().with("auth_token", 42_u64);

        let err = ParameterBinder::bind("auth", &shape(), &values).unwrap_err();
        assert_eq!(
            err.failure,
            BindingFailure::TypeMismatch {
                expected: "alloc::string::String",
                actual: "u64",
            }
        );
    }

    #[test]
    fn test_optional_field_with_wrong_type_still_fails() {
        let values = Values::new()
            .with("auth_token", "secret".to_string())
            .with("proxy", "proxy.local:3128".to_string());

        let err = ParameterBinder::bind("auth", &shape(), &values).unwrap_err();
        assert_eq!(err.field, "proxy");
    }

    #[test]
    fn test_undeclared_field_access() {
        let values = Values::new().with("auth_token", "secret".to_string());
        let input = ParameterBinder::bind("auth", &shape(), &values).unwrap();

        let err = input.get::<String>("password").unwrap_err();
        assert_eq!(err.failure, BindingFailure::Undeclared);
        assert!(input.get::<u32>("auth_token").is_err());
    }

    #[test]
    fn test_captured_values() {
        let values = Values::new().with("auth_token", "secret".to_string());

        let input = ParameterBinder::bind("chain", &Shape::all_values(), &values).unwrap();
        assert!(input.is_empty());
        assert_eq!(input.values().unwrap().run_id(), values.run_id());

        let plain = ParameterBinder::bind("auth", &shape(), &values).unwrap();
        assert_eq!(
            plain.values().unwrap_err().failure,
            BindingFailure::ValuesNotCaptured
        );
    }
}
