//! Numeric helpers shared by every scoring site.

/// Clamps a value to the `[0, 1]` interval.
pub fn clamp01(value: f64) -> f64 {
    value.max(0.0).min(1.0)
}

/// Rounds a value to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
