use crate::core::registry::ScannerKind;
use crate::reporting::ReportFormat;
use clap::Parser;

/// loxs – confirmation-driven web vulnerability prober
#[derive(Parser, Debug)]
#[command(
    name = "loxs",
    version,
    about = "loxs – confirmation-driven web vulnerability prober",
    long_about = r#"
loxs fires crafted requests at target URLs and reports a vulnerability only
after it was confirmed:

  • LFI            file content signatures against a soft-404 baseline
  • Open Redirect  off-site Location header, or a real browser landing off-site
  • SQL Injection  new DBMS errors, repeatable sleep delays, true/false page gaps
  • XSS            a native JavaScript dialog observed in headless Chromium
  • CRLF           injected headers carrying a per-request token

Payloads are appended to each URL, so targets usually end with an open
parameter, e.g. https://example.com/page?file=
"#,
    after_help = r#"EXAMPLES:
  loxs lfi -u https://example.com/page?file=a.txt
  loxs 3 -u urls.txt -p sqli.txt -c 10 --timeout 15
  loxs xss -u https://example.com/search?q= -o xss_report
  loxs crlf -u urls.txt --cookie "session=abc" -H "X-Api-Key: 123" --format json -o crlf.json

Set RUST_LOG=loxs=debug to see every ignored probe."#
)]
pub struct Cli {
    /// Scanner: 1|lfi, 2|redirect, 3|sqli, 4|xss, 5|crlf
    pub scanner: ScannerKind,

    /// Target URL, or a file with one URL per line
    #[arg(short = 'u', long = "url")]
    pub target: String,

    /// Payload file, one payload per line
    #[arg(short = 'p', long = "payloads")]
    pub payloads: Option<String>,

    /// Maximum concurrent probes
    #[arg(short = 'c', long = "concurrency", default_value_t = 5, help_heading = "PERFORMANCE")]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, help_heading = "PERFORMANCE")]
    pub timeout: u64,

    /// Maximum HTTP requests per second (0 = unlimited)
    #[arg(long, default_value_t = 0, help_heading = "PERFORMANCE")]
    pub rate: u32,

    /// Cookie string for authenticated scanning
    #[arg(long, help_heading = "AUTHENTICATION")]
    pub cookie: Option<String>,

    /// HTTP headers (can be used multiple times)
    #[arg(long = "header", short = 'H', help_heading = "AUTHENTICATION")]
    pub headers: Vec<String>,

    /// Skip headless browser verification (XSS cannot be confirmed without it)
    #[arg(long, help_heading = "VERIFICATION")]
    pub no_browser: bool,

    /// Report format written with --output / --save-report
    #[arg(long, value_enum, default_value_t = ReportFormat::Html, help_heading = "OUTPUT")]
    pub format: ReportFormat,

    /// Report file path (extension added when missing)
    #[arg(short, long, help_heading = "OUTPUT")]
    pub output: Option<String>,

    /// Save a report under the default name report_<unix-time>.<ext>
    #[arg(long, help_heading = "OUTPUT")]
    pub save_report: bool,

    /// Quiet mode (no terminal summary)
    #[arg(short, long, help_heading = "OUTPUT")]
    pub quiet: bool,

    /// Verbose output (debug level)
    #[arg(short, long, help_heading = "OUTPUT")]
    pub verbose: bool,
}

impl Cli {
    /// `-H "Name: value"` pairs; malformed entries are dropped with a warning
    pub fn parsed_headers(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .filter_map(|h| match h.split_once(':') {
                Some((k, v)) if !k.trim().is_empty() => {
                    Some((k.trim().to_string(), v.trim().to_string()))
                }
                _ => {
                    tracing::warn!("Ignoring malformed header '{}', expected 'Name: value'", h);
                    None
                }
            })
            .collect()
    }
}
