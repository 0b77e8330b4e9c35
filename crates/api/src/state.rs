use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

pub const DEFAULT_MAX_QUANTITY: u32 = 10;
pub const DEFAULT_VOLUME_MARGIN_PERCENT: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineLimits {
    /// Largest bundle a volume table may list.
    pub max_quantity: u32,
    /// Margin share used when a request or a new session names none.
    pub default_margin_percent: f64,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            max_quantity: DEFAULT_MAX_QUANTITY,
            default_margin_percent: DEFAULT_VOLUME_MARGIN_PERCENT,
        }
    }
}

impl EngineLimits {
    pub fn clamp_quantity(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.max_quantity)
            .min(self.max_quantity)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub recomputes_served: u64,
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    recomputes_served: Arc<AtomicU64>,
    limits: EngineLimits,
}

impl AppState {
    pub fn new(limits: EngineLimits) -> Self {
        Self {
            recomputes_served: Arc::new(AtomicU64::new(0)),
            limits,
        }
    }

    pub fn limits(&self) -> EngineLimits {
        self.limits
    }

    pub fn record_recompute(&self) -> u64 {
        self.recomputes_served
            .fetch_add(1, Ordering::Relaxed)
            .saturating_add(1)
    }

    pub fn stats(&self) -> StatsResponse {
        StatsResponse {
            recomputes_served: self.recomputes_served.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppState, EngineLimits};

    #[test]
    fn clamp_quantity_defaults_to_and_caps_at_limit() {
        let limits = EngineLimits {
            max_quantity: 6,
            default_margin_percent: 50.0,
        };

        assert_eq!(limits.clamp_quantity(None), 6);
        assert_eq!(limits.clamp_quantity(Some(3)), 3);
        assert_eq!(limits.clamp_quantity(Some(40)), 6);
    }

    #[test]
    fn recompute_counter_is_shared_between_clones() {
        let state = AppState::default();
        let clone = state.clone();

        state.record_recompute();
        assert_eq!(clone.record_recompute(), 2);
        assert_eq!(state.stats().recomputes_served, 2);
    }
}
