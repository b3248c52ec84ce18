use crate::core::registry::ScannerKind;
use crate::http::response::ProbeResponse;
use crate::lfi::payloads::LfiPayload;
use crate::lfi::signatures::{self, FileSignature, MIN_MATCHES, PHP_SOURCE};
use crate::reporting::model::ScanResult;
use crate::validation::baseline::Baseline;
use crate::validation::diff::diff;

/// Response indistinguishable from the soft-404 page
fn same_as_baseline(baseline: &Baseline, resp: &ProbeResponse) -> bool {
    !diff(baseline, resp).is_significant()
}

fn included(url: &str, payload: &str, sig: &FileSignature, resp: &ProbeResponse) -> Option<ScanResult> {
    let matched = sig.matches(&resp.body);
    if matched < MIN_MATCHES {
        return None;
    }
    tracing::debug!("[LFI] {} matched {} patterns of {}", url, matched, sig.file);
    Some(
        ScanResult::confirmed(
            ScannerKind::Lfi,
            url,
            payload,
            format!("LFI - {} file included ({})", sig.file, sig.os),
        )
        .with_response_time(resp.elapsed_secs()),
    )
}

/// Verdict for a catalog payload against its own signature set.
pub fn confirm(
    url: &str,
    baseline: &Baseline,
    resp: &ProbeResponse,
    payload: &LfiPayload,
) -> Option<ScanResult> {
    if same_as_baseline(baseline, resp) {
        return None;
    }

    let sig = signatures::lookup(payload.signature)?;
    if let Some(result) = included(url, payload.payload, sig, resp) {
        return Some(result);
    }

    if payload.signature == PHP_SOURCE && signatures::is_base64_php_source(&resp.body) {
        return Some(
            ScanResult::confirmed(
                ScannerKind::Lfi,
                url,
                payload.payload,
                "LFI - PHP source code disclosure via php://filter",
            )
            .with_response_time(resp.elapsed_secs()),
        );
    }

    None
}

/// Verdict for a user payload, checked against every file signature except
/// PHP source (a user payload says nothing about which file it targets).
pub fn confirm_any(
    url: &str,
    baseline: &Baseline,
    resp: &ProbeResponse,
    payload: &str,
) -> Option<ScanResult> {
    if same_as_baseline(baseline, resp) {
        return None;
    }

    signatures::SIGNATURES
        .iter()
        .filter(|s| s.key != PHP_SOURCE)
        .find_map(|sig| included(url, payload, sig, resp))
}
