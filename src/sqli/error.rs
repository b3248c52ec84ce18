//! Error-based channel

use crate::core::registry::ScannerKind;
use crate::http::response::ProbeResponse;
use crate::reporting::model::ScanResult;
use crate::sqli::signatures::ERROR_SIGNATURES;
use crate::validation::baseline::Baseline;

/// First DBMS signature present in the response but absent from the
/// baseline body. A page that always shows the error proves nothing.
pub fn confirm(url: &str, payload: &str, baseline: &Baseline, resp: &ProbeResponse) -> Option<ScanResult> {
    for set in ERROR_SIGNATURES.iter() {
        for pattern in &set.patterns {
            if pattern.is_match(&resp.body) && !pattern.is_match(&baseline.body) {
                tracing::debug!("[SQLI] {} matched {} pattern {}", url, set.dbms, pattern.as_str());
                return Some(
                    ScanResult::confirmed(
                        ScannerKind::Sqli,
                        url,
                        payload,
                        format!("Error-based SQLi - {} detected", set.dbms),
                    )
                    .with_response_time(resp.elapsed_secs()),
                );
            }
        }
    }
    None
}
