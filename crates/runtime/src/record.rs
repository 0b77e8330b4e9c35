use pricing::{SimulatorInputs, SimulatorResults, VolumeStrategy};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One costing as the persistence layer stores it: inputs, the results they
/// produced and the volume strategy, verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCosteo {
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub saved_at: OffsetDateTime,
    pub inputs: SimulatorInputs,
    pub manual_price: Option<f64>,
    pub results: SimulatorResults,
    pub volume_strategy: VolumeStrategy,
}
