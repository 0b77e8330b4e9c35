use serde::{Deserialize, Serialize};

use crate::error::{InputField, PricingError};

/// Merchant unit economics for one product. Money is in minor currency units,
/// percentages are whole-number percents (`20.0` means 20%).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorInputs {
    pub product_cost: f64,
    pub desired_margin_percent: f64,
    pub shipping_cost: f64,
    pub collection_commission_percent: f64,
    pub return_rate_percent: f64,
    pub other_expenses: f64,
    pub average_cpa: f64,
    pub pre_cancellation_percent: f64,
}

impl SimulatorInputs {
    pub fn validate(&self) -> Result<(), PricingError> {
        let money = [
            (self.product_cost, InputField::ProductCost),
            (self.shipping_cost, InputField::ShippingCost),
            (self.other_expenses, InputField::OtherExpenses),
            (self.average_cpa, InputField::AverageCpa),
        ];
        for (value, field) in money {
            if !value.is_finite() || value < 0.0 {
                return Err(PricingError::InvalidInput(field));
            }
        }

        // 100% is accepted here; it surfaces as a degenerate rate instead.
        let percents = [
            (self.desired_margin_percent, InputField::DesiredMarginPercent),
            (
                self.collection_commission_percent,
                InputField::CollectionCommissionPercent,
            ),
            (self.return_rate_percent, InputField::ReturnRatePercent),
            (
                self.pre_cancellation_percent,
                InputField::PreCancellationPercent,
            ),
        ];
        for (value, field) in percents {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(PricingError::InvalidInput(field));
            }
        }

        Ok(())
    }

    /// Same economics for a single order carrying `quantity` units. Only the
    /// supplier cost scales; freight, ads and commission stay per order.
    pub fn as_bundle(&self, quantity: u32) -> Self {
        Self {
            product_cost: self.product_cost * f64::from(quantity),
            ..*self
        }
    }
}
