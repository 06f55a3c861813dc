//! Declared input/output shapes and the parameter binder.
//!
//! Processors describe the values they consume and produce as a [`Shape`]:
//! a table of named, typed fields, each required or optional. The
//! [`ParameterBinder`] uses that table to pull a processor's input out of the
//! run values without any knowledge of the processor itself.

mod binder;
mod descriptor;

pub use binder::{ParameterBinder, ProcessorInput};
pub use descriptor::{FieldSpec, Shape};
