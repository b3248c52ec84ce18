use crate::core::registry::ScannerKind;
use crate::http::response::ProbeResponse;
use crate::redirect::payloads::KNOWN_EXTERNAL_DOMAINS;
use crate::reporting::model::ScanResult;

pub const BROWSER_PREFIX: &str = "Browser verified: ";

/// Tier 1: the server itself answers with an off-site `Location`.
pub fn header_details(resp: &ProbeResponse, marker: &str) -> Option<String> {
    if !resp.is_redirect() {
        return None;
    }
    let location = resp.header("location").filter(|l| !l.is_empty())?;
    let lowered = location.to_lowercase();

    if lowered.contains(&marker.to_lowercase()) {
        return Some(format!("Redirects to: {} (Status: {})", location, resp.status));
    }
    if KNOWN_EXTERNAL_DOMAINS.iter().any(|d| lowered.contains(d)) {
        return Some(format!("Redirects to external domain: {}", location));
    }
    None
}

/// Tier 2: where the browser ended up. Known domains already present in the
/// probed URL prove nothing.
pub fn browser_details(final_url: &str, probed_url: &str, marker: &str) -> Option<String> {
    let lowered = final_url.to_lowercase();
    if lowered.contains(&marker.to_lowercase()) {
        return Some(format!("Browser redirected to: {}", final_url));
    }
    let probed = probed_url.to_lowercase();
    if KNOWN_EXTERNAL_DOMAINS
        .iter()
        .any(|d| lowered.contains(d) && !probed.contains(d))
    {
        return Some(format!("Browser redirected to external: {}", final_url));
    }
    None
}

pub fn confirm_header(url: &str, payload: &str, marker: &str, resp: &ProbeResponse) -> Option<ScanResult> {
    let details = header_details(resp, marker)?;
    Some(
        ScanResult::confirmed(ScannerKind::Redirect, url, payload, details)
            .with_response_time(resp.elapsed_secs()),
    )
}

pub fn confirm_browser(url: &str, payload: &str, marker: &str, final_url: &str) -> Option<ScanResult> {
    let details = browser_details(final_url, url, marker)?;
    Some(ScanResult::confirmed(
        ScannerKind::Redirect,
        url,
        payload,
        format!("{}{}", BROWSER_PREFIX, details),
    ))
}
