//! Terminal rendering of a finished scan

use crate::reporting::model::ScanResult;
use crate::reporting::summary::ScanSummary;
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

const BOX_WIDTH: usize = 70;
const INNER_WIDTH: usize = BOX_WIDTH - 2;

fn visual_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn top_border() -> String {
    format!("╔{}╗", "═".repeat(INNER_WIDTH))
}

fn middle_border() -> String {
    format!("╠{}╣", "═".repeat(INNER_WIDTH))
}

fn bottom_border() -> String {
    format!("╚{}╝", "═".repeat(INNER_WIDTH))
}

/// Left-aligned box line, padded by display width
fn box_line(content: &str) -> String {
    let padded = format!(" {} ", content);
    let padding = INNER_WIDTH.saturating_sub(visual_width(&padded));
    format!("║{}{}║", padded, " ".repeat(padding))
}

fn box_line_centered(content: &str) -> String {
    let padded = format!(" {} ", content);
    let width = visual_width(&padded);
    if width >= INNER_WIDTH {
        return box_line(content);
    }
    let left = (INNER_WIDTH - width) / 2;
    let right = INNER_WIDTH - width - left;
    format!("║{}{}{}║", " ".repeat(left), padded, " ".repeat(right))
}

pub fn render(summary: &ScanSummary, results: &[ScanResult], elapsed_secs: f64) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", top_border());
    let _ = writeln!(out, "{}", box_line_centered(&format!("{} SCAN COMPLETE", summary.kind)));
    let _ = writeln!(out, "{}", middle_border());
    for (label, count) in &summary.categories {
        let _ = writeln!(out, "{}", box_line(&format!("● {}: {}", label, count)));
    }
    let _ = writeln!(out, "{}", box_line(&format!("★ Total CONFIRMED: {}", summary.total)));
    let _ = writeln!(out, "{}", box_line(&format!("Duration: {:.2}s", elapsed_secs)));
    let _ = writeln!(out, "{}", bottom_border());

    if results.is_empty() {
        let _ = writeln!(out, "No confirmed {} vulnerabilities found.", summary.kind);
        return out;
    }

    for (idx, r) in results.iter().enumerate() {
        let _ = writeln!(out, "\nFINDING #{}: {} [{}]", idx + 1, r.kind, r.kind.cwe());
        let _ = writeln!(out, "   URL:      {}", r.url);
        let _ = writeln!(out, "   Payload:  {}", r.payload);
        let _ = writeln!(out, "   Evidence: {}", r.details);
        if r.response_time > 0.0 {
            let _ = writeln!(out, "   Time:     {:.2}s", r.response_time);
        }
    }
    out
}
