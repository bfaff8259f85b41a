//! Trace-level timing of the stages inside `World::step`.

use log::{log_enabled, trace, warn, Level};
use std::time::{Duration, Instant};

/// One stage of the step pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Gravity,
    Integrate,
    Collisions,
    Bounds,
    Damping,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::Gravity => "gravity",
            Stage::Integrate => "integrate",
            Stage::Collisions => "collisions",
            Stage::Bounds => "bounds",
            Stage::Damping => "damping",
        }
    }
}

/// Logs how long a stage took when dropped. The clock is only read while
/// trace logging is enabled.
pub struct StageTimer {
    stage: Stage,
    started: Option<Instant>,
}

impl StageTimer {
    pub fn start(stage: Stage) -> Self {
        Self {
            stage,
            started: log_enabled!(Level::Trace).then(Instant::now),
        }
    }
}

impl Drop for StageTimer {
    fn drop(&mut self) {
        if let Some(started) = self.started {
            trace!(
                "step::{} took {} µs",
                self.stage.name(),
                started.elapsed().as_micros()
            );
        }
    }
}

/// Warns when a whole step ran longer than `budget_ms`. Returns whether it did.
pub fn check_step_budget(elapsed: Duration, budget_ms: f32, block_count: usize) -> bool {
    let elapsed_ms = elapsed.as_secs_f32() * 1000.0;
    let over = elapsed_ms > budget_ms;
    if over {
        warn!("step with {block_count} blocks took {elapsed_ms:.2} ms, budget {budget_ms:.2} ms");
    }
    over
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_check_compares_milliseconds() {
        assert!(!check_step_budget(Duration::from_millis(4), 16.0, 10));
        assert!(check_step_budget(Duration::from_millis(20), 16.0, 10));
    }

    #[test]
    fn timer_without_trace_logging_skips_the_clock() {
        let timer = StageTimer::start(Stage::Collisions);
        assert_eq!(timer.stage.name(), "collisions");
        assert!(timer.started.is_none());
    }
}
