use std::time::Duration;

/// Recompute latency summary, in microseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatencyPercentiles {
    pub count: usize,
    pub p50_micros: u64,
    pub p95_micros: u64,
    pub p99_micros: u64,
    pub max_micros: u64,
    /// Samples slower than the budget the metrics were built with.
    pub over_budget: usize,
}

/// Collects one sample per keystroke recompute and judges it against a
/// per-frame budget.
#[derive(Debug, Clone)]
pub struct RecomputeLatencyMetrics {
    budget_micros: u64,
    samples_micros: Vec<u64>,
}

impl RecomputeLatencyMetrics {
    pub fn with_budget(budget_micros: u64) -> Self {
        Self {
            budget_micros,
            samples_micros: Vec::new(),
        }
    }

    pub fn record(&mut self, elapsed: Duration) {
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.record_micros(micros);
    }

    pub fn record_micros(&mut self, latency_micros: u64) {
        self.samples_micros.push(latency_micros);
    }

    pub fn percentiles(&self) -> Option<LatencyPercentiles> {
        let max_micros = *self.samples_micros.iter().max()?;

        let mut sorted = self.samples_micros.clone();
        sorted.sort_unstable();

        Some(LatencyPercentiles {
            count: sorted.len(),
            p50_micros: percentile_nearest_rank(&sorted, 50),
            p95_micros: percentile_nearest_rank(&sorted, 95),
            p99_micros: percentile_nearest_rank(&sorted, 99),
            max_micros,
            over_budget: sorted
                .iter()
                .filter(|&&micros| micros > self.budget_micros)
                .count(),
        })
    }
}

fn percentile_nearest_rank(sorted: &[u64], percentile: usize) -> u64 {
    let rank = (percentile * sorted.len()).div_ceil(100);
    sorted[rank.saturating_sub(1)]
}
