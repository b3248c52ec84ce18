//! Boolean-based channel

/// Relative share of the baseline length a true/false gap must exceed
pub const MIN_GAP_RATIO: f64 = 0.1;

/// Absolute floor for the true/false gap, in bytes
pub const MIN_GAP_BYTES: f64 = 100.0;

/// True and false pages differ clearly while the true page stays within
/// 10% of the original page.
pub fn confirms(baseline_len: usize, true_len: usize, false_len: usize) -> bool {
    let base = baseline_len as f64;
    let gap = (true_len as f64 - false_len as f64).abs();
    if gap <= base * MIN_GAP_RATIO || gap <= MIN_GAP_BYTES {
        return false;
    }
    let drift = (true_len as f64 - base).abs();
    drift < base * MIN_GAP_RATIO
}

pub fn gap(true_len: usize, false_len: usize) -> usize {
    true_len.abs_diff(false_len)
}
