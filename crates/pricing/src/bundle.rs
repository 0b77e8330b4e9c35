use crate::error::PricingError;
use crate::inputs::SimulatorInputs;
use crate::results::SimulatorResults;
use crate::solver::solve;

/// Cost breakdown for selling `quantity` units as one order at
/// `manual_total_price`.
///
/// The bundle is priced as a single sale of a composite product, so it still
/// pays one shipment, one ad acquisition and one commission charge.
pub fn volume_metrics(
    inputs: &SimulatorInputs,
    quantity: u32,
    manual_total_price: Option<f64>,
) -> Result<SimulatorResults, PricingError> {
    let manual_total_price = manual_total_price.ok_or(PricingError::MissingManualPrice)?;
    if quantity == 0 {
        return Err(PricingError::InvalidQuantity);
    }

    solve(&inputs.as_bundle(quantity), Some(manual_total_price))
}
