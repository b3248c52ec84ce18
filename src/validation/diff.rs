use crate::http::response::ProbeResponse;
use crate::validation::baseline::Baseline;

/// Body-length change below this is treated as dynamic noise (timestamps, nonces)
pub const MIN_BODY_DELTA: usize = 5;

#[derive(Debug)]
pub struct DiffResult {
    pub status_changed: bool,
    pub body_len_delta: isize,
}

pub fn diff(baseline: &Baseline, resp: &ProbeResponse) -> DiffResult {
    DiffResult {
        status_changed: baseline.status != resp.status,
        body_len_delta: resp.body_len() as isize - baseline.body_len() as isize,
    }
}

impl DiffResult {
    /// A changed status code always counts; with the same status the body must
    /// move by at least [`MIN_BODY_DELTA`] characters.
    pub fn is_significant(&self) -> bool {
        self.status_changed || self.body_len_delta.unsigned_abs() >= MIN_BODY_DELTA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline(status: u16, len: usize) -> Baseline {
        Baseline::from_response(&ProbeResponse::new(status, "a".repeat(len)))
    }

    #[test]
    fn test_equal_length_same_status_is_noise() {
        let d = diff(&baseline(200, 100), &ProbeResponse::new(200, "b".repeat(100)));
        assert!(!d.is_significant());
    }

    #[test]
    fn test_small_delta_is_noise() {
        let d = diff(&baseline(200, 100), &ProbeResponse::new(200, "b".repeat(104)));
        assert!(!d.is_significant());
        let d = diff(&baseline(200, 100), &ProbeResponse::new(200, "b".repeat(96)));
        assert!(!d.is_significant());
    }

    #[test]
    fn test_delta_of_five_or_more_is_significant() {
        let d = diff(&baseline(200, 100), &ProbeResponse::new(200, "b".repeat(106)));
        assert!(d.is_significant());
        assert_eq!(d.body_len_delta, 6);
    }

    #[test]
    fn test_status_change_is_significant() {
        let d = diff(&baseline(404, 100), &ProbeResponse::new(200, "b".repeat(100)));
        assert!(d.is_significant());
    }
}
