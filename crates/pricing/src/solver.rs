use crate::error::PricingError;
use crate::inputs::SimulatorInputs;
use crate::results::{CostBreakdown, EffectivenessFunnel, SimulatorResults};
use crate::rounding::{round_price, round_unit};

pub const FUNNEL_BASE_ORDERS: u32 = 100;

/// Reverse logistics on a returned order costs this many outbound legs.
pub const RETURN_LEG_FACTOR: f64 = 1.5;

/// Costs of one delivered sale, with every loss already amortized into it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CostModel {
    confirmation_rate: f64,
    delivery_rate: f64,
    effectiveness_rate: f64,
    shipped_per_delivery: f64,
    commission_rate: f64,
    margin_rate: f64,
    product_cost: f64,
    cpa_cost: f64,
    freight_cost: f64,
    other_cost: f64,
    return_loss: f64,
}

impl CostModel {
    fn from_inputs(inputs: &SimulatorInputs) -> Result<Self, PricingError> {
        let confirmation_rate = 1.0 - inputs.pre_cancellation_percent / 100.0;
        let delivery_rate = 1.0 - inputs.return_rate_percent / 100.0;
        let effectiveness_rate = confirmation_rate * delivery_rate;
        if effectiveness_rate <= 0.0 {
            return Err(PricingError::NoEffectiveOrders);
        }

        // Ads are paid per placed order, freight and fees per shipment.
        let orders_per_delivery = 1.0 / effectiveness_rate;
        let shipped_per_delivery = 1.0 / delivery_rate;
        let returns_per_delivery = (inputs.return_rate_percent / 100.0) / delivery_rate;

        Ok(Self {
            confirmation_rate,
            delivery_rate,
            effectiveness_rate,
            shipped_per_delivery,
            commission_rate: inputs.collection_commission_percent / 100.0,
            margin_rate: inputs.desired_margin_percent / 100.0,
            product_cost: inputs.product_cost,
            cpa_cost: inputs.average_cpa * orders_per_delivery,
            freight_cost: inputs.shipping_cost * shipped_per_delivery,
            other_cost: inputs.other_expenses * shipped_per_delivery,
            return_loss: inputs.shipping_cost * RETURN_LEG_FACTOR * returns_per_delivery,
        })
    }

    fn total_fixed_cost(&self) -> f64 {
        self.product_cost + self.cpa_cost + self.freight_cost + self.other_cost + self.return_loss
    }

    /// Share of the price left once margin and per-shipment commission are taken.
    fn price_denominator(&self) -> f64 {
        (1.0 - self.margin_rate) - self.shipped_per_delivery * self.commission_rate
    }

    fn commission_for(&self, price: f64) -> f64 {
        price * self.commission_rate * self.shipped_per_delivery
    }

    fn funnel(&self) -> EffectivenessFunnel {
        let after_pre_cancellation =
            round_unit(f64::from(FUNNEL_BASE_ORDERS) * self.confirmation_rate);
        let after_returns = round_unit(after_pre_cancellation * self.delivery_rate);

        EffectivenessFunnel {
            total_orders: FUNNEL_BASE_ORDERS,
            after_pre_cancellation: after_pre_cancellation as u32,
            after_returns: after_returns as u32,
        }
    }
}

/// Derives the price that nets the desired margin on every delivered order.
///
/// When `manual_price` is given it replaces the derived price, and profit and
/// commission are recomputed against it. `original_suggested_price` always
/// carries the model price.
pub fn solve(
    inputs: &SimulatorInputs,
    manual_price: Option<f64>,
) -> Result<SimulatorResults, PricingError> {
    inputs.validate()?;
    let manual_price = manual_price.map(validate_manual_price).transpose()?;

    let model = CostModel::from_inputs(inputs)?;
    let denominator = model.price_denominator();
    if denominator <= 0.0 {
        return Err(PricingError::UnreachableMargin);
    }

    let total_fixed_cost = model.total_fixed_cost();
    let original_suggested_price = round_price(total_fixed_cost / denominator);
    let final_price = manual_price.unwrap_or(original_suggested_price);

    let commission_per_sale = model.commission_for(final_price);
    let net_profit = final_price - total_fixed_cost - commission_per_sale;

    Ok(SimulatorResults {
        suggested_price: final_price,
        original_suggested_price,
        net_profit_per_sale: round_unit(net_profit),
        final_effectiveness_percent: round_unit(model.effectiveness_rate * 100.0),
        cost_breakdown: CostBreakdown {
            product_cost: round_unit(model.product_cost),
            freight_cost: round_unit(model.freight_cost),
            cpa_cost: round_unit(model.cpa_cost),
            commission_cost: round_unit(commission_per_sale),
            return_loss: round_unit(model.return_loss),
            other_expenses: round_unit(model.other_cost),
            net_profit: round_unit(net_profit),
            total_price: final_price,
        },
        effectiveness_funnel: model.funnel(),
    })
}

/// [`solve`] with every non-computable case rendered as the zero result.
pub fn solve_or_zero(inputs: &SimulatorInputs, manual_price: Option<f64>) -> SimulatorResults {
    solve(inputs, manual_price).unwrap_or_else(|_| SimulatorResults::zero())
}

/// A manual price must be a finite, positive amount.
pub fn validate_manual_price(price: f64) -> Result<f64, PricingError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(PricingError::InvalidManualPrice);
    }
    Ok(price)
}
