//! Processors and endpoint decoration.
//!
//! Processors are the units of work of a print run. HTTP processors are the
//! subset that decorate the request endpoint; a composite HTTP processor
//! layers several of them into one endpoint.

mod composite;
mod node;
mod output;
mod runner;
mod traits;

pub use composite::CompositeHttpProcessor;
pub use node::ProcessorNode;
pub use output::ProcessorOutput;
pub use runner::ProcessorRunner;
pub use traits::{decorate_current_endpoint, endpoint_output_shape, HttpProcessor, Processor};
