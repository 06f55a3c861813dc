//! Timing of processor runs.

use std::fmt::Display;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

/// Measures one processor run and reports how it ended.
///
/// Consuming the timer with [`RunTimer::finish`] or [`RunTimer::fail`] emits
/// the closing event of the run.
#[derive(Debug)]
pub struct RunTimer {
    start: Instant,
    processor: String,
    run_id: Uuid,
}

impl RunTimer {
    /// Starts timing `processor` within the run `run_id`.
    #[must_use]
    pub fn start(processor: impl Into<String>, run_id: Uuid) -> Self {
        Self {
            start: Instant::now(),
            processor: processor.into(),
            run_id,
        }
    }

    /// Milliseconds since the run started.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// The processor being timed.
    #[must_use]
    pub fn processor(&self) -> &str {
        &self.processor
    }

    /// Logs a completed run that wrote `outputs` values and returns its duration.
    pub fn finish(self, outputs: usize) -> f64 {
        let duration_ms = self.elapsed_ms();
        info!(
            processor = %self.processor,
            run_id = %self.run_id,
            outputs,
            duration_ms,
            "Processor completed"
        );
        duration_ms
    }

    /// Logs a failed run and returns its duration.
    pub fn fail(self, error: &dyn Display) -> f64 {
        let duration_ms = self.elapsed_ms();
        warn!(
            processor = %self.processor,
            run_id = %self.run_id,
            duration_ms,
            error = %error,
            "Processor failed"
        );
        duration_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_finish_reports_duration() {
        let timer = RunTimer::start("legend", Uuid::new_v4());
        assert_eq!(timer.processor(), "legend");

        std::thread::sleep(Duration::from_millis(5));
        assert!(timer.finish(2) >= 5.0);
    }

    #[test]
    fn test_fail_reports_duration() {
        let timer = RunTimer::start("upstream", Uuid::new_v4());
        let duration = timer.fail(&"composite has no parts");
        assert!(duration >= 0.0);
    }
}
