//! COD price inversion: the retail price that nets a target margin on every
//! delivered order, and the bundle price table derived from it.

pub mod bundle;
pub mod error;
pub mod inputs;
pub mod results;
pub mod rounding;
pub mod solver;
pub mod volume;

pub use bundle::volume_metrics;
pub use error::{InputField, PricingError};
pub use inputs::SimulatorInputs;
pub use results::{CostBreakdown, EffectivenessFunnel, SimulatorResults};
pub use solver::{solve, solve_or_zero, validate_manual_price, FUNNEL_BASE_ORDERS};
pub use volume::{build_table, VolumeStrategy, VolumeTableRow};

pub fn module_ready() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use crate::{build_table, solve, volume_metrics, SimulatorInputs};

    #[test]
    fn solved_sale_feeds_volume_table_and_bundle_metrics() {
        let inputs = SimulatorInputs {
            product_cost: 10_000.0,
            desired_margin_percent: 20.0,
            ..SimulatorInputs::default()
        };

        let single = solve(&inputs, None).unwrap();
        let rows = build_table(
            single.suggested_price,
            inputs.product_cost,
            single.net_profit_per_sale,
            50.0,
            3,
        );
        let bundle = volume_metrics(&inputs, 2, Some(rows[1].total_price)).unwrap();

        assert_eq!(rows[1].total_price, 23_800.0);
        assert_eq!(bundle.cost_breakdown.product_cost, 20_000.0);
        assert_eq!(bundle.net_profit_per_sale, 3_800.0);
    }

    #[test]
    fn results_serialize_with_form_field_names() {
        let inputs = SimulatorInputs {
            product_cost: 10_000.0,
            desired_margin_percent: 20.0,
            ..SimulatorInputs::default()
        };
        let json = serde_json::to_value(solve(&inputs, None).unwrap()).unwrap();

        assert_eq!(json["suggestedPrice"], 12_500.0);
        assert_eq!(json["netProfitPerSale"], 2_500.0);
        assert_eq!(json["costBreakdown"]["totalPrice"], 12_500.0);
        assert_eq!(json["effectivenessFunnel"]["afterReturns"], 100);
    }
}
