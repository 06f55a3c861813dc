//! Service settings.

use serde::{Deserialize, Serialize};

/// Options that govern how a configuration is validated and run.
///
/// Settings are owned by the [`Configuration`](super::Configuration) they
/// were loaded with; there is no process-wide copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Refuse to start when validation reports errors.
    #[serde(default = "default_true")]
    pub fail_on_validation_error: bool,
    /// Fail a run when a processor outputs a value its shape does not declare.
    #[serde(default = "default_true")]
    pub throw_error_on_extra_parameters: bool,
    /// Logging options.
    #[serde(default)]
    pub logging: LoggingSettings,
}

fn default_true() -> bool {
    true
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            fail_on_validation_error: default_true(),
            throw_error_on_extra_parameters: default_true(),
            logging: LoggingSettings::default(),
        }
    }
}

impl ServiceSettings {
    /// Creates settings with the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether validation errors are fatal.
    #[must_use]
    pub fn with_fail_on_validation_error(mut self, fail: bool) -> Self {
        self.fail_on_validation_error = fail;
        self
    }

    /// Sets whether undeclared processor outputs are fatal.
    #[must_use]
    pub fn with_throw_error_on_extra_parameters(mut self, throw: bool) -> Self {
        self.throw_error_on_extra_parameters = throw;
        self
    }

    /// Sets the logging options.
    #[must_use]
    pub fn with_logging(mut self, logging: LoggingSettings) -> Self {
        self.logging = logging;
        self
    }
}

/// Logging options consumed by [`init_tracing`](crate::observability::init_tracing).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `printflow=debug`.
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of compact text.
    #[serde(default)]
    pub json: bool,
    /// Include the event target.
    #[serde(default = "default_true")]
    pub with_target: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            with_target: default_true(),
        }
    }
}

impl LoggingSettings {
    /// Sets the filter directive.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Enables or disables JSON output.
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_fail_closed() {
        let settings = ServiceSettings::default();
        assert!(settings.fail_on_validation_error);
        assert!(settings.throw_error_on_extra_parameters);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: ServiceSettings =
            serde_json::from_str(r#"{"logging": {"json": true}}"#).unwrap();

        assert!(settings.fail_on_validation_error);
        assert!(settings.logging.json);
        assert!(settings.logging.with_target);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_explicit_values() {
        let settings: ServiceSettings = serde_json::from_str(
            r#"{"fail_on_validation_error": false, "throw_error_on_extra_parameters": false}"#,
        )
        .unwrap();

        assert_eq!(
            settings,
            ServiceSettings::new()
                .with_fail_on_validation_error(false)
                .with_throw_error_on_extra_parameters(false)
        );
    }
}
