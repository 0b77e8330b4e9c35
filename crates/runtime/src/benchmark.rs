use std::time::Duration;

use crate::metrics::LatencyPercentiles;

/// Whole recomputes per second over a timed run; 0 for an empty run.
pub fn recomputes_per_sec(recomputes: u64, elapsed: Duration) -> u64 {
    let nanos = elapsed.as_nanos();
    if nanos == 0 {
        return 0;
    }

    let achieved = u128::from(recomputes).saturating_mul(1_000_000_000) / nanos;
    u64::try_from(achieved).unwrap_or(u64::MAX)
}

/// A keystroke recompute is interactive when its p99 fits the frame budget.
pub fn meets_interactive_budget(report: &LatencyPercentiles, budget_micros: u64) -> bool {
    report.p99_micros <= budget_micros
}
