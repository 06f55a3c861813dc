//! # Printflow
//!
//! The request-processing layer of a print service.
//!
//! A print run threads one [`Values`](values::Values) store through a list of
//! processors. Each processor declares the shape of what it reads and writes,
//! so its input is bound from the run values before it executes and a missing
//! or mistyped value is reported instead of defaulted.
//!
//! HTTP processors decorate the endpoint used to fetch remote resources
//! (map tiles, images, legends). A composite HTTP processor layers several of
//! them into a single endpoint:
//!
//! - **Ordered composition**: the first part is the outermost layer
//! - **Fail-closed configuration**: empty composites and parts that cannot
//!   wrap endpoints are reported before anything runs
//! - **Structured logging**: `tracing` events carry the run id and processor
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use printflow::prelude::*;
//!
//! let composite = CompositeHttpProcessor::new(vec![
//!     ProcessorNode::http(AuthProcessor::new()),
//!     ProcessorNode::http(ProxyProcessor::new()),
//! ]);
//!
//! let mut values = Values::new();
//! values.put_endpoint(raw_endpoint);
//! ProcessorRunner::new().run(&composite, &mut values)?;
//!
//! let endpoint = values.endpoint()?;
//! let response = endpoint.send(HttpRequest::get(tile_url)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod endpoint;
pub mod errors;
pub mod observability;
pub mod processors;
pub mod shape;
pub mod testing;
pub mod values;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{
        CompositeConfig, Configuration, LoggingSettings, ProcessorRegistry, ServiceSettings,
    };
    pub use crate::endpoint::{
        FnEndpoint, HttpEndpoint, HttpRequest, HttpResponse, Method, SharedEndpoint,
        StaticEndpoint,
    };
    pub use crate::errors::{
        ConfigurationError, ConfigurationReport, EndpointError, ErrorInfo,
        ParameterBindingError, PrintflowError, ProcessorError, ValuesError,
    };
    pub use crate::observability::{init_tracing, RunTimer};
    pub use crate::processors::{
        CompositeHttpProcessor, HttpProcessor, Processor, ProcessorNode, ProcessorOutput,
        ProcessorRunner,
    };
    pub use crate::shape::{FieldSpec, ParameterBinder, ProcessorInput, Shape};
    pub use crate::values::{AnyValue, Values, REQUEST_ENDPOINT_KEY};
}
