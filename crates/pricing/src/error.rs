use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    ProductCost,
    DesiredMarginPercent,
    ShippingCost,
    CollectionCommissionPercent,
    ReturnRatePercent,
    OtherExpenses,
    AverageCpa,
    PreCancellationPercent,
}

impl InputField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProductCost => "productCost",
            Self::DesiredMarginPercent => "desiredMarginPercent",
            Self::ShippingCost => "shippingCost",
            Self::CollectionCommissionPercent => "collectionCommissionPercent",
            Self::ReturnRatePercent => "returnRatePercent",
            Self::OtherExpenses => "otherExpenses",
            Self::AverageCpa => "averageCpa",
            Self::PreCancellationPercent => "preCancellationPercent",
        }
    }
}

/// Reasons a price cannot be derived.
///
/// Every variant renders the same way downstream: as
/// [`SimulatorResults::zero`](crate::SimulatorResults::zero). Callers must read
/// a zero result as "not computable", never as a free product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("no placed order survives cancellation and returns")]
    NoEffectiveOrders,
    #[error("desired margin plus amortized commission reaches 100% of the price")]
    UnreachableMargin,
    #[error("a manual total price is required")]
    MissingManualPrice,
    #[error("manual price must be finite and greater than zero")]
    InvalidManualPrice,
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    #[error("{} is out of range", .0.as_str())]
    InvalidInput(InputField),
    #[error("volume margin share must be between 10 and 100 percent")]
    MarginShareOutOfRange,
}

impl PricingError {
    pub fn code(self) -> &'static str {
        match self {
            Self::NoEffectiveOrders => "no_effective_orders",
            Self::UnreachableMargin => "unreachable_margin",
            Self::MissingManualPrice => "missing_manual_price",
            Self::InvalidManualPrice => "invalid_manual_price",
            Self::InvalidQuantity => "invalid_quantity",
            Self::InvalidInput(_) => "invalid_input",
            Self::MarginShareOutOfRange => "margin_share_out_of_range",
        }
    }
}
