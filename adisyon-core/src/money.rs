/// Round to 2 decimal places, half away from zero. This is the same rounding
/// the store's SQL `ROUND` applies, so Rust-side and SQL-side totals agree.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
