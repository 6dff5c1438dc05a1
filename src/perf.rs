//! Timing for the board's pointer handlers and the dashboard's save path.
//!
//! Pointer handlers are timed only with the `profiling` feature, against a
//! tight per-event budget. Document saves are always timed. Overruns are
//! logged as warnings.

use std::time::Instant;
use tracing::warn;

/// Per-event budget for a pointer handler.
pub const POINTER_HANDLER_BUDGET_MS: f64 = 1.0;

/// Threshold above which a document save is reported as slow
pub const SLOW_SAVE_MS: f64 = 100.0;

/// Time the rest of the enclosing pointer handler. Compiles to nothing
/// without the `profiling` feature.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::start($name, $crate::perf::POINTER_HANDLER_BUDGET_MS);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
}

/// Reports its scope on drop if it ran past its budget.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    budget_ms: f64,
}

impl ScopedTimer {
    pub fn start(name: &'static str, budget_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            budget_ms,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Elapsed time, if it is over budget.
    pub fn overrun_ms(&self) -> Option<f64> {
        let elapsed = self.elapsed_ms();
        (elapsed > self.budget_ms).then_some(elapsed)
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if let Some(elapsed_ms) = self.overrun_ms() {
            warn!(
                operation = self.name,
                elapsed_ms = format!("{elapsed_ms:.2}"),
                budget_ms = format!("{:.2}", self.budget_ms),
                "Slow operation"
            );
        }
    }
}

/// Run `f`, warning if it takes longer than `threshold_ms`.
pub fn measure_and_log<T>(name: &'static str, threshold_ms: f64, f: impl FnOnce() -> T) -> T {
    let _timer = ScopedTimer::start(name, threshold_ms);
    f()
}
