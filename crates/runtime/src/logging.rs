use crate::events::{RecomputeEvent, RecomputeStage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputeLogKind {
    Stage(RecomputeStage),
    LatencyRecorded,
    CosteoSaved,
    TableExported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecomputeLogEvent {
    pub sequence: u64,
    pub kind: RecomputeLogKind,
    pub latency_micros: Option<u64>,
    pub detail: Option<String>,
}

impl RecomputeLogEvent {
    pub fn new(sequence: u64, kind: RecomputeLogKind, latency_micros: Option<u64>) -> Self {
        Self {
            sequence,
            kind,
            latency_micros,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl From<&RecomputeEvent> for RecomputeLogEvent {
    fn from(event: &RecomputeEvent) -> Self {
        let log_event = Self::new(event.sequence, RecomputeLogKind::Stage(event.stage), None);
        match event.reason {
            Some(reason) => log_event.with_detail(reason.code()),
            None => log_event,
        }
    }
}

pub trait RecomputeLogWriter {
    fn write(&mut self, event: RecomputeLogEvent);
}

pub fn write_events(writer: &mut dyn RecomputeLogWriter, events: &[RecomputeEvent]) {
    for event in events {
        writer.write(RecomputeLogEvent::from(event));
    }
}

#[derive(Debug, Default)]
pub struct InMemoryRecomputeLog {
    events: Vec<RecomputeLogEvent>,
}

impl InMemoryRecomputeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RecomputeLogEvent] {
        &self.events
    }
}

impl RecomputeLogWriter for InMemoryRecomputeLog {
    fn write(&mut self, event: RecomputeLogEvent) {
        self.events.push(event);
    }
}

/// Forwards recompute log events to `tracing` under the `costeo::recompute` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogWriter;

impl RecomputeLogWriter for TracingLogWriter {
    fn write(&mut self, event: RecomputeLogEvent) {
        let detail = event.detail.as_deref().unwrap_or("");
        match event.kind {
            RecomputeLogKind::Stage(RecomputeStage::NotComputable) => tracing::info!(
                target: "costeo::recompute",
                sequence = event.sequence,
                reason = detail,
                "costeo not computable"
            ),
            RecomputeLogKind::Stage(stage) => tracing::debug!(
                target: "costeo::recompute",
                sequence = event.sequence,
                stage = stage.as_str(),
                "recompute stage"
            ),
            RecomputeLogKind::LatencyRecorded => tracing::debug!(
                target: "costeo::recompute",
                sequence = event.sequence,
                latency_micros = event.latency_micros.unwrap_or_default(),
                "recompute finished"
            ),
            RecomputeLogKind::CosteoSaved => tracing::info!(
                target: "costeo::recompute",
                sequence = event.sequence,
                name = detail,
                "costeo record produced"
            ),
            RecomputeLogKind::TableExported => tracing::info!(
                target: "costeo::recompute",
                sequence = event.sequence,
                costeo = detail,
                "price table exported"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use pricing::PricingError;

    use super::{write_events, InMemoryRecomputeLog, RecomputeLogKind, TracingLogWriter};
    use crate::events::{RecomputeEvent, RecomputeStage};

    #[test]
    fn write_events_preserves_order_and_reason_codes() {
        let mut log = InMemoryRecomputeLog::new();
        let events = vec![
            RecomputeEvent::new(4, RecomputeStage::ChangeApplied),
            RecomputeEvent::not_computable(4, PricingError::UnreachableMargin),
        ];

        write_events(&mut log, &events);

        assert_eq!(log.events().len(), 2);
        assert_eq!(
            log.events()[0].kind,
            RecomputeLogKind::Stage(RecomputeStage::ChangeApplied)
        );
        assert_eq!(log.events()[0].detail, None);
        assert_eq!(
            log.events()[1].detail.as_deref(),
            Some("unreachable_margin")
        );
    }

    #[test]
    fn tracing_writer_accepts_every_kind_without_subscriber() {
        let mut writer = TracingLogWriter;
        let events = vec![
            RecomputeEvent::new(1, RecomputeStage::PriceSolved),
            RecomputeEvent::not_computable(1, PricingError::NoEffectiveOrders),
        ];

        write_events(&mut writer, &events);
    }
}
