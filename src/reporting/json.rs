use crate::reporting::model::ScanResult;
use crate::reporting::summary::{summarize, ScanSummary};
use crate::reporting::ReportMeta;
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    scan_metadata: ScanMetadata,
    summary: ScanSummary,
    results: &'a [ScanResult],
}

#[derive(Serialize)]
struct ScanMetadata {
    tool: String,
    version: String,
    scan_type: String,
    scan_date: String,
    total_scanned: usize,
    duration_secs: f64,
}

pub fn render(meta: &ReportMeta, results: &[ScanResult]) -> anyhow::Result<String> {
    let report = Report {
        scan_metadata: ScanMetadata {
            tool: "loxs".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            scan_type: meta.kind.label().to_string(),
            scan_date: chrono::Utc::now().to_rfc3339(),
            total_scanned: meta.total_scanned,
            duration_secs: meta.duration.as_secs_f64(),
        },
        summary: summarize(meta.kind, results),
        results,
    };

    let json = serde_json::to_string_pretty(&report)?;
    Ok(json)
}
