use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::inputs::SimulatorInputs;
use crate::results::SimulatorResults;
use crate::rounding::{round_price, round_unit};

pub const MIN_MARGIN_SHARE_PERCENT: f64 = 10.0;
pub const MAX_MARGIN_SHARE_PERCENT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeTableRow {
    pub quantity: u32,
    pub total_price: f64,
    pub price_per_unit: f64,
    /// Against buying `quantity` units at the single-unit price.
    pub savings_per_unit: f64,
    pub total_profit: f64,
}

/// Price of each unit added to a bundle: its own supplier cost plus a share
/// of the single-unit margin. The share not passed on is the volume discount.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MarginalUnit {
    price: f64,
    profit: f64,
}

impl MarginalUnit {
    fn new(unit_cost: f64, unit1_profit: f64, margin_share_percent: f64) -> Self {
        let profit = unit1_profit * margin_share_percent / 100.0;
        Self {
            price: unit_cost + profit,
            profit,
        }
    }
}

/// Builds the bundle price table for quantities `1..=max_quantity`.
///
/// Totals are rounded to the price step first; profit is then taken against
/// the unrounded cost base, so rounding lands in profit and never in cost.
pub fn build_table(
    unit1_price: f64,
    unit_cost: f64,
    unit1_profit: f64,
    margin_share_percent: f64,
    max_quantity: u32,
) -> Vec<VolumeTableRow> {
    let marginal = MarginalUnit::new(unit_cost, unit1_profit, margin_share_percent);
    let discounting = margin_share_percent < MAX_MARGIN_SHARE_PERCENT;
    // A bundle unit never costs more than a single unit bought alone.
    let unit1_ceiling = round_unit(unit1_price);
    let mut rows: Vec<VolumeTableRow> = Vec::with_capacity(max_quantity as usize);

    for quantity in 1..=max_quantity {
        let row = if quantity == 1 {
            let total_price = round_price(unit1_price);
            VolumeTableRow {
                quantity,
                total_price,
                price_per_unit: total_price,
                savings_per_unit: 0.0,
                total_profit: round_unit(unit1_profit),
            }
        } else {
            let extra_units = f64::from(quantity - 1);
            let raw_total_price = unit1_price + marginal.price * extra_units;
            let raw_total_profit = unit1_profit + marginal.profit * extra_units;
            let raw_cost_base = raw_total_price - raw_total_profit;

            let total_price = round_price(raw_total_price);
            let mut price_per_unit =
                round_unit(total_price / f64::from(quantity)).min(unit1_ceiling);
            // Price-step rounding of the total can nudge the average up by a few units.
            if discounting {
                if let Some(previous) = rows.last() {
                    price_per_unit = price_per_unit.min(previous.price_per_unit);
                }
            }

            VolumeTableRow {
                quantity,
                total_price,
                price_per_unit,
                savings_per_unit: round_unit(unit1_price - price_per_unit),
                total_profit: round_unit(total_price - raw_cost_base),
            }
        };
        rows.push(row);
    }

    rows
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeStrategy {
    pub enabled: bool,
    pub margin_percent: f64,
    pub price_table: Vec<VolumeTableRow>,
}

impl VolumeStrategy {
    pub fn new(enabled: bool, margin_percent: f64) -> Result<Self, PricingError> {
        if !margin_percent.is_finite()
            || !(MIN_MARGIN_SHARE_PERCENT..=MAX_MARGIN_SHARE_PERCENT).contains(&margin_percent)
        {
            return Err(PricingError::MarginShareOutOfRange);
        }

        Ok(Self {
            enabled,
            margin_percent,
            price_table: Vec::new(),
        })
    }

    /// Rebuilds `price_table` from a solved single-unit sale. The table stays
    /// empty while the strategy is disabled or the sale is not computable.
    pub fn reprice(
        &mut self,
        unit1_price: f64,
        unit_cost: f64,
        unit1_profit: f64,
        max_quantity: u32,
    ) {
        self.price_table = if self.enabled && unit1_price > 0.0 {
            build_table(
                unit1_price,
                unit_cost,
                unit1_profit,
                self.margin_percent,
                max_quantity,
            )
        } else {
            Vec::new()
        };
    }

    /// [`reprice`](Self::reprice) from a solved costing of one unit.
    pub fn priced_for(
        &mut self,
        results: &SimulatorResults,
        inputs: &SimulatorInputs,
        max_quantity: u32,
    ) {
        self.reprice(
            results.suggested_price,
            inputs.product_cost,
            results.net_profit_per_sale,
            max_quantity,
        );
    }

    pub fn row(&self, quantity: u32) -> Option<&VolumeTableRow> {
        self.price_table.iter().find(|row| row.quantity == quantity)
    }
}
