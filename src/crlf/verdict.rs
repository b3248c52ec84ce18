use crate::core::registry::ScannerKind;
use crate::http::response::ProbeResponse;
use crate::reporting::model::ScanResult;

/// Marker carried by the Set-Cookie payloads, independent of the token
pub const COOKIE_MARKER: &str = "injected";

/// Every channel through which the injection became visible. Empty means
/// no confirmation.
pub fn evidence(resp: &ProbeResponse, token: &str) -> Vec<String> {
    let mut found = Vec::new();

    for cookie in resp.header_values("set-cookie") {
        if cookie.contains(token) || cookie.contains(COOKIE_MARKER) {
            found.push(format!("Set-Cookie injection: {}", cookie));
        }
    }

    if let Some(value) = resp.header("x-injected") {
        if value.contains(token) {
            found.push(format!("X-Injected header: {}", value));
        }
    }

    for (name, value) in &resp.headers {
        if name.contains(token) || value.contains(token) {
            found.push(format!("Header {}: {}", name, value));
        }
    }

    if let Some(location) = resp.header("location") {
        if location.contains("evil.com") || location.contains(token) {
            found.push(format!("Location header injection: {}", location));
        }
    }

    if resp.body.contains(&format!("<html>{}</html>", token)) {
        found.push("Response body injection detected".to_string());
    }

    found
}

pub fn confirm(url: &str, payload: &str, token: &str, resp: &ProbeResponse) -> Option<ScanResult> {
    let found = evidence(resp, token);
    if found.is_empty() {
        return None;
    }
    Some(
        ScanResult::confirmed(ScannerKind::Crlf, url, payload, found.join(" | "))
            .with_response_time(resp.elapsed_secs()),
    )
}
