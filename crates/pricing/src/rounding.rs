pub const PRICE_STEP: f64 = 100.0;

/// Nearest integer, halves toward positive infinity.
pub fn round_unit(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Nearest multiple of [`PRICE_STEP`].
pub fn round_price(value: f64) -> f64 {
    round_unit(value / PRICE_STEP) * PRICE_STEP
}
