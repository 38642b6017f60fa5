//! Mean and median over small f64 samples.
//!
//! Daily series for a window are at most a year long, so sorting a copy for
//! the median is fine; no streaming statistics are needed.

/// Arithmetic mean. `None` for an empty sample.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Conventional statistical median. `None` for an empty sample.
///
/// Even-length samples reduce to the arithmetic mean of the two central
/// order statistics.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}
