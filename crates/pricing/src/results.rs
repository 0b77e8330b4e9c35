use serde::{Deserialize, Serialize};

/// Per-delivered-sale components of the final price, each rounded to a whole
/// currency unit on its own. Their sum may drift from `total_price` by a few
/// units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub product_cost: f64,
    pub freight_cost: f64,
    pub cpa_cost: f64,
    pub commission_cost: f64,
    pub return_loss: f64,
    pub other_expenses: f64,
    pub net_profit: f64,
    pub total_price: f64,
}

#[cfg(test)]
impl CostBreakdown {
    pub(crate) fn component_sum(&self) -> f64 {
        self.product_cost
            + self.freight_cost
            + self.cpa_cost
            + self.commission_cost
            + self.return_loss
            + self.other_expenses
            + self.net_profit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectivenessFunnel {
    pub total_orders: u32,
    pub after_pre_cancellation: u32,
    pub after_returns: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorResults {
    pub suggested_price: f64,
    pub original_suggested_price: f64,
    pub net_profit_per_sale: f64,
    pub final_effectiveness_percent: f64,
    pub cost_breakdown: CostBreakdown,
    pub effectiveness_funnel: EffectivenessFunnel,
}

impl SimulatorResults {
    /// The rendering of every non-computable case.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}
