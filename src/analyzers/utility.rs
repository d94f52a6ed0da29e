/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Rounds a percentage to the nearest whole number, halves away from zero:
/// 1 of 8 prints as 13%. Python's `{:.0f}` rounds halves to even and would
/// print 12% for the same tally.
pub fn round_percent(p: f64) -> i64 {
    p.round() as i64
}
