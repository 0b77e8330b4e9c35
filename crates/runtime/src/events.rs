use pricing::PricingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecomputeStage {
    ChangeApplied,
    PriceSolved,
    NotComputable,
    VolumeTableBuilt,
    SnapshotPublished,
}

impl RecomputeStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChangeApplied => "change_applied",
            Self::PriceSolved => "price_solved",
            Self::NotComputable => "not_computable",
            Self::VolumeTableBuilt => "volume_table_built",
            Self::SnapshotPublished => "snapshot_published",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecomputeEvent {
    pub sequence: u64,
    pub stage: RecomputeStage,
    pub reason: Option<PricingError>,
}

impl RecomputeEvent {
    pub fn new(sequence: u64, stage: RecomputeStage) -> Self {
        Self {
            sequence,
            stage,
            reason: None,
        }
    }

    pub fn not_computable(sequence: u64, reason: PricingError) -> Self {
        Self {
            sequence,
            stage: RecomputeStage::NotComputable,
            reason: Some(reason),
        }
    }
}
