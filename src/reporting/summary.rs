//! Per-class finding breakdowns

use crate::core::registry::ScannerKind;
use crate::reporting::model::ScanResult;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub kind: ScannerKind,
    pub total: usize,
    pub categories: Vec<(&'static str, usize)>,
}

impl ScanSummary {
    pub fn count(&self, label: &str) -> usize {
        self.categories
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

/// Bucket results by detection method. Every result lands in at most one
/// bucket, matched in the order listed.
fn buckets(kind: ScannerKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        ScannerKind::Lfi => &[
            ("Linux files", "Linux"),
            ("Windows files", "Windows"),
            ("PHP source disclosure", "PHP"),
        ],
        ScannerKind::Sqli => &[
            ("Error-based", "Error-based"),
            ("Time-based", "Time-based"),
            ("Boolean-based", "Boolean-based"),
        ],
        ScannerKind::Crlf => &[
            ("Set-Cookie injection", "Set-Cookie"),
            ("Location header injection", "Location"),
            ("Other header injection", ""),
        ],
        ScannerKind::Redirect => &[("Browser-verified", "Browser"), ("Header-based", "")],
        ScannerKind::Xss => &[("Dialog confirmed", "")],
    }
}

pub fn summarize(kind: ScannerKind, results: &[ScanResult]) -> ScanSummary {
    let table = buckets(kind);
    let mut counts = vec![0usize; table.len()];

    for result in results.iter().filter(|r| r.kind == kind) {
        if let Some(i) = table
            .iter()
            .position(|(_, needle)| result.details.contains(needle))
        {
            counts[i] += 1;
        }
    }

    ScanSummary {
        kind,
        total: results.iter().filter(|r| r.kind == kind).count(),
        categories: table.iter().map(|(label, _)| *label).zip(counts).collect(),
    }
}

/// Log the breakdown for one finished scan
pub fn log(kind: ScannerKind, results: &[ScanResult]) {
    let summary = summarize(kind, results);
    for (label, count) in &summary.categories {
        tracing::info!("{} scan summary - {}: {}", kind, label, count);
    }
    if summary.total > 0 {
        tracing::info!("{} scan: {} CONFIRMED finding(s)", kind, summary.total);
    } else {
        tracing::info!("{} scan: no confirmed vulnerabilities", kind);
    }
}
