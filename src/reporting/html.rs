//! Standalone HTML report

use crate::reporting::model::ScanResult;
use crate::reporting::ReportMeta;
use std::fmt::Write;

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"
        body { font-family: 'Courier New', monospace; background-color: #111; color: #eee; padding: 20px; }
        .container { max-width: 900px; margin: 0 auto; background: #222; padding: 20px; border-radius: 8px; border: 1px solid #444; }
        h1 { color: #ff7f50; text-align: center; }
        .summary { background: #333; padding: 15px; margin-bottom: 20px; border-radius: 5px; }
        .vulnerable-list { list-style: none; padding: 0; }
        .vulnerable-item { background: #3a1c1c; border: 1px solid #ff4444; padding: 10px; margin-bottom: 5px; border-radius: 3px; word-break: break-all; }
        a { color: #ff7f50; text-decoration: none; }
        a:hover { text-decoration: underline; }"#;

pub fn render(meta: &ReportMeta, results: &[ScanResult]) -> String {
    let mut items = String::new();
    let mut found = 0;
    for r in results.iter().filter(|r| r.vulnerable) {
        found += 1;
        let url = escape(&r.url);
        let _ = writeln!(
            items,
            r#"            <li class="vulnerable-item"><a href="{url}" target="_blank" rel="noopener noreferrer">{url}</a> - {}</li>"#,
            escape(&r.details)
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Loxs Security Report</title>
    <style>{style}
    </style>
</head>
<body>
    <div class="container">
        <h1>Loxs Security Scan Report</h1>
        <div class="summary">
            <p><strong>Scan Type:</strong> {scan_type}</p>
            <p><strong>Total Vulnerabilities:</strong> {found}</p>
            <p><strong>Total Scanned:</strong> {scanned}</p>
            <p><strong>Duration:</strong> {duration:.2}s</p>
        </div>
        <h2>Vulnerable URLs</h2>
        <ul class="vulnerable-list">
{items}        </ul>
    </div>
</body>
</html>
"#,
        style = STYLE,
        scan_type = escape(meta.kind.label()),
        found = found,
        scanned = meta.total_scanned,
        duration = meta.duration.as_secs_f64(),
        items = items,
    )
}
