//! Signed percentage deltas.

/// Percentage deviation of `current` from `reference`, rounded to one
/// decimal place.
///
/// A zero reference saturates to `0.0` rather than producing infinity or an
/// error. Note this is a sentinel, not a genuine "no change": consumers that
/// must distinguish the two cases should inspect the reference as well.
pub fn pct_delta(current: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        return 0.0;
    }
    let raw = (current - reference) / reference * 100.0;
    (raw * 10.0).round() / 10.0
}
