use clap::Parser;
use loxs::cli::Cli;
use loxs::payload::{load_payloads, load_targets};
use loxs::reporting::{self, summary, text, ReportMeta};
use loxs::{AnyScanner, Backends, ScanConfig};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const BANNER: &str = r#"
 ╔════════════════════════════════════════════════════════════════════╗
 ║                                                                    ║
 ║    ██╗      ██████╗ ██╗  ██╗███████╗                               ║
 ║    ██║     ██╔═══██╗╚██╗██╔╝██╔════╝                               ║
 ║    ██║     ██║   ██║ ╚███╔╝ ███████╗                               ║
 ║    ██║     ██║   ██║ ██╔██╗ ╚════██║                               ║
 ║    ███████╗╚██████╔╝██╔╝ ██╗███████║                               ║
 ║    ╚══════╝ ╚═════╝ ╚═╝  ╚═╝╚══════╝                               ║
 ║                                                                    ║
 ║    LFI · Open Redirect · SQLi · XSS · CRLF                         ║
 ║    Only confirmed findings are reported                            ║
 ║                                                                    ║
 ╚════════════════════════════════════════════════════════════════════╝
"#;

fn print_banner() {
    println!("\x1b[36m{}\x1b[0m", BANNER); // Cyan color
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "loxs=debug"
    } else if cli.quiet {
        "loxs=warn"
    } else {
        "loxs=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !cli.quiet {
        print_banner();
    }
    init_tracing(&cli);

    let urls = load_targets(&cli.target)?;
    let payloads = match &cli.payloads {
        Some(path) => load_payloads(path)?.payloads,
        None => Vec::new(),
    };

    let mut builder = ScanConfig::builder()
        .urls(urls)
        .payloads(payloads)
        .with_concurrency(cli.concurrency)
        .with_timeout(cli.timeout)
        .with_cookie(cli.cookie.clone())
        .with_rate_limit(cli.rate)
        .with_browser_verification(!cli.no_browser);
    for (name, value) in cli.parsed_headers() {
        builder = builder.with_header(name, value);
    }
    let config = builder.build();

    let started = Instant::now();
    let results = AnyScanner::new(cli.scanner, Backends::default())
        .scan(&config)
        .await;
    let meta = ReportMeta {
        kind: cli.scanner,
        total_scanned: config.urls.len(),
        duration: started.elapsed(),
    };

    if !cli.quiet {
        print!(
            "{}",
            text::render(
                &summary::summarize(cli.scanner, &results),
                &results,
                meta.duration.as_secs_f64()
            )
        );
    }

    let destination = match (&cli.output, cli.save_report) {
        (Some(name), _) => Some(reporting::normalize_filename(name, cli.format)),
        (None, true) => Some(
            reporting::default_filename(cli.format, chrono::Utc::now().timestamp()).into(),
        ),
        (None, false) => None,
    };

    if let Some(path) = destination {
        let content = cli.format.render(&meta, &results)?;
        reporting::write_report(&path, &content)?;
    }

    Ok(())
}
