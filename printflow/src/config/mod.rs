//! Configuration-time assembly and validation.
//!
//! This module provides:
//! - [`ServiceSettings`], the serde-backed service options
//! - [`ProcessorRegistry`], named processors available to configurations
//! - [`CompositeConfig`], a composite described by the names of its parts
//! - [`Configuration`], the validated set of processors a service runs

mod composite;
mod configuration;
mod registry;
mod settings;

pub use composite::CompositeConfig;
pub use configuration::{Configuration, ConfigurationDocument, ProcessorConfig};
pub use registry::ProcessorRegistry;
pub use settings::{LoggingSettings, ServiceSettings};
