//! Observability utilities.
//!
//! Processors and the runner log through `tracing` with structured fields
//! (`run_id`, `processor`, `duration_ms`). [`init_tracing`] installs a
//! subscriber for binaries and integration harnesses.

mod subscriber;
mod run_timer;

pub use subscriber::{build_env_filter, init_tracing};
pub use run_timer::RunTimer;
