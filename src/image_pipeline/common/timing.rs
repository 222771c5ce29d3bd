use std::time::{Duration, Instant};

use tracing::info;

/// Durations of the named steps of one conversion, in run order.
#[derive(Debug, Default)]
pub struct PipelineTimings {
    steps: Vec<(&'static str, Duration)>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` and records how long it took under `step`.
    pub fn record<T>(&mut self, step: &'static str, f: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let out = f();
        self.steps.push((step, start.elapsed()));
        out
    }

    pub fn steps(&self) -> &[(&'static str, Duration)] {
        &self.steps
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|(_, d)| *d).sum()
    }

    /// Emits one `info` event per step plus the total.
    pub fn log_summary(&self) {
        let total = self.total_duration().as_secs_f64();
        for (step, duration) in self.steps() {
            let secs = duration.as_secs_f64();
            let share = if total > 0.0 { secs / total * 100.0 } else { 0.0 };
            info!(
                step,
                ms = format_args!("{:.3}", secs * 1000.0),
                share = format_args!("{:.1}%", share),
                "Step timing"
            );
        }
        info!(ms = format_args!("{:.3}", total * 1000.0), "Total time");
    }
}
