//! Scan output: result model, summaries and report files

pub mod html;
pub mod json;
pub mod model;
pub mod summary;
pub mod text;

use crate::core::registry::ScannerKind;
use crate::reporting::model::ScanResult;
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What a report says about the scan itself
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub kind: ScannerKind,
    pub total_scanned: usize,
    pub duration: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Html,
    Json,
    Text,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
            ReportFormat::Text => "txt",
        }
    }

    pub fn render(&self, meta: &ReportMeta, results: &[ScanResult]) -> anyhow::Result<String> {
        match self {
            ReportFormat::Html => Ok(html::render(meta, results)),
            ReportFormat::Json => json::render(meta, results),
            ReportFormat::Text => Ok(text::render(
                &summary::summarize(meta.kind, results),
                results,
                meta.duration.as_secs_f64(),
            )),
        }
    }
}

/// `report_<unix-seconds>.<ext>`
pub fn default_filename(format: ReportFormat, unix_secs: i64) -> String {
    format!("report_{}.{}", unix_secs, format.extension())
}

/// Append the format's extension when the chosen name lacks it
pub fn normalize_filename(name: &str, format: ReportFormat) -> PathBuf {
    let suffix = format!(".{}", format.extension());
    if name.ends_with(&suffix) {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{}{}", name, suffix))
    }
}

pub fn write_report(path: &Path, content: &str) -> anyhow::Result<()> {
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    tracing::info!("Report saved as {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filenames() {
        assert_eq!(default_filename(ReportFormat::Html, 1700000000), "report_1700000000.html");
        assert_eq!(
            normalize_filename("scan", ReportFormat::Html),
            PathBuf::from("scan.html")
        );
        assert_eq!(
            normalize_filename("scan.html", ReportFormat::Html),
            PathBuf::from("scan.html")
        );
    }

    #[test]
    fn test_write_report_roundtrip_on_disk() {
        let path = std::env::temp_dir().join(format!("loxs_report_{}.html", std::process::id()));
        write_report(&path, "<html></html>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
        let _ = std::fs::remove_file(&path);
    }
}
