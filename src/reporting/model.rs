use crate::core::registry::ScannerKind;
use serde::Serialize;

/// One confirmed finding. Unconfirmed attempts are never materialized.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ScanResult {
    pub kind: ScannerKind,
    pub url: String,          // post-payload URL that was confirmed
    pub vulnerable: bool,     // always true for emitted results
    pub payload: String,      // payload as sent (tokens substituted)
    pub response_time: f64,   // seconds, 0.0 when not measured
    pub details: String,      // confirmation method and evidence
}

impl ScanResult {
    pub fn confirmed(
        kind: ScannerKind,
        url: impl Into<String>,
        payload: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            url: url.into(),
            vulnerable: true,
            payload: payload.into(),
            response_time: 0.0,
            details: details.into(),
        }
    }

    pub fn with_response_time(mut self, seconds: f64) -> Self {
        self.response_time = seconds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmed_result_is_vulnerable() {
        let result = ScanResult::confirmed(
            ScannerKind::Crlf,
            "http://t/?q=%0d%0a",
            "%0d%0a",
            "Set-Cookie injection",
        );
        assert!(result.vulnerable);
        assert_eq!(result.response_time, 0.0);
    }

    #[test]
    fn test_serializes_kind_and_fields() {
        let result = ScanResult::confirmed(ScannerKind::Sqli, "u", "p", "d").with_response_time(5.5);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "sqli");
        assert_eq!(json["response_time"], 5.5);
    }
}
