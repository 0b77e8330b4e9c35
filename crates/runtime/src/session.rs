use pricing::{
    solve, validate_manual_price, PricingError, SimulatorInputs, SimulatorResults, VolumeStrategy,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::events::{RecomputeEvent, RecomputeStage};
use crate::record::SavedCosteo;

/// One edit coming from the costing form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionChange {
    SetInputs {
        inputs: SimulatorInputs,
    },
    SetManualPrice {
        price: f64,
    },
    ClearManualPrice,
    SetVolume {
        enabled: bool,
        #[serde(rename = "marginPercent")]
        margin_percent: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub sequence: u64,
    pub computable: bool,
    pub reason: Option<&'static str>,
    pub inputs: SimulatorInputs,
    pub manual_price: Option<f64>,
    pub results: SimulatorResults,
    pub volume_strategy: VolumeStrategy,
}

/// Live costing state behind one form. Every accepted change recomputes the
/// whole costing from scratch; nothing is carried over between recomputes
/// except the inputs themselves.
#[derive(Debug, Clone)]
pub struct CosteoSession {
    sequence: u64,
    max_quantity: u32,
    inputs: SimulatorInputs,
    manual_price: Option<f64>,
    volume_strategy: VolumeStrategy,
    results: SimulatorResults,
    status: Result<(), PricingError>,
}

impl CosteoSession {
    pub fn new(max_quantity: u32, margin_percent: f64) -> Result<Self, PricingError> {
        let mut session = Self {
            sequence: 0,
            max_quantity,
            inputs: SimulatorInputs::default(),
            manual_price: None,
            volume_strategy: VolumeStrategy::new(false, margin_percent)?,
            results: SimulatorResults::zero(),
            status: Ok(()),
        };
        session.recompute();
        Ok(session)
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn results(&self) -> &SimulatorResults {
        &self.results
    }

    pub fn volume_strategy(&self) -> &VolumeStrategy {
        &self.volume_strategy
    }

    /// Applies one change and recomputes. A change that fails validation is
    /// rejected and leaves the session untouched; a costing that is merely
    /// not computable is accepted and reported through the events.
    pub fn apply(&mut self, change: SessionChange) -> Result<Vec<RecomputeEvent>, PricingError> {
        match change {
            SessionChange::SetInputs { inputs } => {
                inputs.validate()?;
                self.inputs = inputs;
            }
            SessionChange::SetManualPrice { price } => {
                self.manual_price = Some(validate_manual_price(price)?);
            }
            SessionChange::ClearManualPrice => {
                self.manual_price = None;
            }
            SessionChange::SetVolume {
                enabled,
                margin_percent,
            } => {
                self.volume_strategy = VolumeStrategy::new(enabled, margin_percent)?;
            }
        }

        self.sequence += 1;
        let mut events = vec![RecomputeEvent::new(
            self.sequence,
            RecomputeStage::ChangeApplied,
        )];
        events.extend(self.recompute());
        Ok(events)
    }

    fn recompute(&mut self) -> Vec<RecomputeEvent> {
        let mut events = Vec::with_capacity(3);

        match solve(&self.inputs, self.manual_price) {
            Ok(results) => {
                self.results = results;
                self.status = Ok(());
                events.push(RecomputeEvent::new(self.sequence, RecomputeStage::PriceSolved));
            }
            Err(reason) => {
                self.results = SimulatorResults::zero();
                self.status = Err(reason);
                events.push(RecomputeEvent::not_computable(self.sequence, reason));
            }
        }

        self.volume_strategy
            .priced_for(&self.results, &self.inputs, self.max_quantity);
        events.push(RecomputeEvent::new(
            self.sequence,
            RecomputeStage::VolumeTableBuilt,
        ));
        events.push(RecomputeEvent::new(
            self.sequence,
            RecomputeStage::SnapshotPublished,
        ));
        events
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            sequence: self.sequence,
            computable: self.status.is_ok(),
            reason: self.status.err().map(PricingError::code),
            inputs: self.inputs,
            manual_price: self.manual_price,
            results: self.results,
            volume_strategy: self.volume_strategy.clone(),
        }
    }

    pub fn save(&self, name: impl Into<String>, saved_at: OffsetDateTime) -> SavedCosteo {
        SavedCosteo {
            name: name.into(),
            saved_at,
            inputs: self.inputs,
            manual_price: self.manual_price,
            results: self.results,
            volume_strategy: self.volume_strategy.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pricing::{PricingError, SimulatorInputs};
    use time::macros::datetime;

    use super::{CosteoSession, SessionChange};
    use crate::events::RecomputeStage;

    fn inputs() -> SimulatorInputs {
        SimulatorInputs {
            product_cost: 10_000.0,
            desired_margin_percent: 20.0,
            ..SimulatorInputs::default()
        }
    }

    #[test]
    fn session_emits_stages_in_expected_order() {
        let mut session = CosteoSession::new(5, 50.0).unwrap();

        let events = session
            .apply(SessionChange::SetInputs { inputs: inputs() })
            .unwrap();
        let stages: Vec<RecomputeStage> = events.iter().map(|event| event.stage).collect();

        assert_eq!(
            stages,
            vec![
                RecomputeStage::ChangeApplied,
                RecomputeStage::PriceSolved,
                RecomputeStage::VolumeTableBuilt,
                RecomputeStage::SnapshotPublished,
            ]
        );
        assert!(events.iter().all(|event| event.sequence == 1));
        assert_eq!(session.results().suggested_price, 12_500.0);
    }

    #[test]
    fn empty_form_solves_to_zero_price() {
        let session = CosteoSession::new(5, 50.0).unwrap();
        let snapshot = session.snapshot();

        assert!(snapshot.computable);
        assert_eq!(snapshot.results.suggested_price, 0.0);
        assert!(snapshot.volume_strategy.price_table.is_empty());
    }

    #[test]
    fn degenerate_inputs_publish_zero_results_with_reason() {
        let mut session = CosteoSession::new(5, 50.0).unwrap();
        session
            .apply(SessionChange::SetInputs { inputs: inputs() })
            .unwrap();

        let events = session
            .apply(SessionChange::SetInputs {
                inputs: SimulatorInputs {
                    return_rate_percent: 100.0,
                    ..inputs()
                },
            })
            .unwrap();
        let snapshot = session.snapshot();

        assert_eq!(events[1].stage, RecomputeStage::NotComputable);
        assert_eq!(events[1].reason, Some(PricingError::NoEffectiveOrders));
        assert!(!snapshot.computable);
        assert_eq!(snapshot.reason, Some("no_effective_orders"));
        assert!(snapshot.results.is_zero());
    }

    #[test]
    fn manual_price_overrides_and_clears() {
        let mut session = CosteoSession::new(5, 50.0).unwrap();
        session
            .apply(SessionChange::SetInputs { inputs: inputs() })
            .unwrap();

        session
            .apply(SessionChange::SetManualPrice { price: 14_000.0 })
            .unwrap();
        assert_eq!(session.results().suggested_price, 14_000.0);
        assert_eq!(session.results().original_suggested_price, 12_500.0);
        assert_eq!(session.results().net_profit_per_sale, 4_000.0);

        session.apply(SessionChange::ClearManualPrice).unwrap();
        assert_eq!(session.results().suggested_price, 12_500.0);
    }

    #[test]
    fn invalid_manual_price_is_rejected_without_recompute() {
        let mut session = CosteoSession::new(5, 50.0).unwrap();
        session
            .apply(SessionChange::SetInputs { inputs: inputs() })
            .unwrap();

        for price in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(
                session.apply(SessionChange::SetManualPrice { price }),
                Err(PricingError::InvalidManualPrice)
            );
        }
        assert_eq!(session.sequence(), 1);
        assert_eq!(session.snapshot().manual_price, None);
    }

    #[test]
    fn off_step_manual_price_keeps_bundle_savings_non_negative() {
        let mut session = CosteoSession::new(5, 100.0).unwrap();
        session
            .apply(SessionChange::SetInputs { inputs: inputs() })
            .unwrap();
        session
            .apply(SessionChange::SetManualPrice { price: 12_550.0 })
            .unwrap();

        for margin_percent in [99.0, 99.9, 100.0] {
            session
                .apply(SessionChange::SetVolume {
                    enabled: true,
                    margin_percent,
                })
                .unwrap();
            let table = &session.volume_strategy().price_table;

            assert_eq!(table.len(), 5);
            assert!(
                table.iter().all(|row| row.savings_per_unit >= 0.0),
                "share {margin_percent}: {table:?}"
            );
        }
    }

    #[test]
    fn rejected_change_leaves_state_and_sequence_untouched() {
        let mut session = CosteoSession::new(5, 50.0).unwrap();
        session
            .apply(SessionChange::SetInputs { inputs: inputs() })
            .unwrap();

        let err = session
            .apply(SessionChange::SetVolume {
                enabled: true,
                margin_percent: 5.0,
            })
            .unwrap_err();

        assert_eq!(err, PricingError::MarginShareOutOfRange);
        assert_eq!(session.sequence(), 1);
        assert!(!session.volume_strategy().enabled);
    }

    #[test]
    fn enabling_volume_builds_table_up_to_limit() {
        let mut session = CosteoSession::new(4, 50.0).unwrap();
        session
            .apply(SessionChange::SetInputs { inputs: inputs() })
            .unwrap();

        session
            .apply(SessionChange::SetVolume {
                enabled: true,
                margin_percent: 50.0,
            })
            .unwrap();
        let table = &session.volume_strategy().price_table;

        assert_eq!(table.len(), 4);
        assert_eq!(table[1].total_price, 23_800.0);
        assert_eq!(table[1].total_profit, 3_800.0);
    }

    #[test]
    fn save_captures_current_costing() {
        let mut session = CosteoSession::new(3, 50.0).unwrap();
        session
            .apply(SessionChange::SetInputs { inputs: inputs() })
            .unwrap();

        let saved = session.save("serum", datetime!(2026-01-02 03:04:05 UTC));

        assert_eq!(saved.name, "serum");
        assert_eq!(saved.inputs, inputs());
        assert_eq!(saved.results, *session.results());
    }

    #[test]
    fn change_deserializes_from_tagged_frame() {
        let change: SessionChange = serde_json::from_value(serde_json::json!({
            "type": "set_volume",
            "enabled": true,
            "marginPercent": 40.0
        }))
        .unwrap();

        assert_eq!(
            change,
            SessionChange::SetVolume {
                enabled: true,
                margin_percent: 40.0,
            }
        );
    }
}
