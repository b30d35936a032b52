//! Wall-clock throughput measurement for forward pipelines.
//!
//! [`measure`] drives any [`Forward`] model over a fixed input for a fixed
//! number of passes and reports what the clock saw. The measurement has no
//! global state and no hidden warm-up pass; callers that want warmed caches
//! run a pass themselves before measuring.

use std::fmt;
use std::time::{Duration, Instant};

use crate::backend::Backend;
use crate::error::Result;
use crate::pipeline::Forward;

/// Timing summary of one measured run.
///
/// Produced by [`measure`]; the accessors derive per-pass figures from the
/// raw pass count and total elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThroughputReport {
    passes: usize,
    elapsed: Duration,
}

impl ThroughputReport {
    /// Number of forward passes the clock covered.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Total wall-clock time across all passes.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Mean wall-clock time of a single pass.
    pub fn latency(&self) -> Duration {
        Duration::from_secs_f64(self.elapsed.as_secs_f64() / self.passes as f64)
    }

    /// Completed passes per second of wall-clock time.
    ///
    /// Zero when the elapsed time itself is zero, which a coarse clock can
    /// report for a sufficiently fast run.
    pub fn passes_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds == 0.0 {
            return 0.0;
        }
        self.passes as f64 / seconds
    }
}

impl fmt::Display for ThroughputReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} passes in {:.3}s ({:.1} ms/pass, {:.2} passes/s)",
            self.passes,
            self.elapsed.as_secs_f64(),
            self.latency().as_secs_f64() * 1000.0,
            self.passes_per_second()
        )
    }
}

/// Runs `passes` forward passes of `model` over `input` and times the loop.
///
/// Passes run back to back on the calling thread; the clock starts before
/// the first pass and stops after the last, so the report covers the whole
/// loop rather than a sum of per-pass timings.
///
/// # Parameters
///
/// * `model` - The model to drive
/// * `input` - The batch every pass consumes
/// * `passes` - How many passes to run; must be at least one
///
/// # Returns
///
/// The timing report, or the first error a pass produced
pub fn measure<M, I, O>(model: &M, input: &I, passes: usize) -> Result<ThroughputReport>
where
    M: Forward<I, O>,
    I: Backend,
    O: Backend,
{
    assert!(passes > 0, "throughput measurement requires at least one pass");

    let start = Instant::now();
    for _ in 0..passes {
        model.forward(input)?;
    }
    Ok(ThroughputReport {
        passes,
        elapsed: start.elapsed(),
    })
}
