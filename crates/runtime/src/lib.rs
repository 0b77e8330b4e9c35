pub mod benchmark;
pub mod events;
pub mod export;
pub mod logging;
pub mod metrics;
pub mod record;
pub mod session;

/// One 60 Hz frame; a keystroke recompute must finish inside it.
pub const INTERACTIVE_BUDGET_MICROS: u64 = 16_000;

/// Solver runs per second a single server core is expected to sustain.
pub const TARGET_RECOMPUTES_PER_SEC: u64 = 100_000;

pub fn module_ready() -> bool {
    true
}
