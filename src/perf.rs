//! Timing instrumentation for the input and paint hot paths.
//!
//! Enable with the `profiling` feature:
//! ```toml
//! editor-canvas = { features = ["profiling"] }
//! ```
//!
//! ```ignore
//! fn paint(&mut self) {
//!     editor_canvas::profile_scope!("editor_paint");
//!     // ...
//! }
//! ```
//! Without the feature the macro expands to nothing that runs.

use std::time::Instant;
use tracing::{debug, warn};

// ============================================================================
// Constants
// ============================================================================

/// One frame at 60 Hz. A paint pass slower than this drops a frame.
pub const FRAME_BUDGET_MS: f64 = 16.67;

/// Timers logged by `profile_scope!` report anything slower than this.
const PROFILING_THRESHOLD_MS: f64 = 1.0;

// ============================================================================
// Profiling Macro
// ============================================================================

/// Time the enclosing scope. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

// ============================================================================
// Scoped Timer
// ============================================================================

/// RAII timer: logs on drop when the scope took longer than its threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    /// Low threshold, used by `profile_scope!`.
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, PROFILING_THRESHOLD_MS)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms <= self.threshold_ms {
            return;
        }
        if elapsed_ms > FRAME_BUDGET_MS {
            warn!(scope = self.name, elapsed_ms, "over frame budget");
        } else {
            debug!(scope = self.name, elapsed_ms, "[PERF]");
        }
    }
}
