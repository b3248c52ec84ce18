//! URL and payload list files

use anyhow::Context;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct PayloadSet {
    pub name: String,
    pub payloads: Vec<String>,
}

/// Non-blank lines, trimmed
pub fn read_lines<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}

pub fn load_payloads<P: AsRef<Path>>(path: P) -> anyhow::Result<PayloadSet> {
    let path = path.as_ref();
    let payloads = read_lines(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    tracing::info!("Loaded {} payload(s) from {}", payloads.len(), name);
    Ok(PayloadSet { name, payloads })
}

/// A readable file is a URL list, anything else is a single URL.
pub fn load_targets(arg: &str) -> anyhow::Result<Vec<String>> {
    let path = Path::new(arg);
    if path.is_file() {
        let urls = read_lines(path)?;
        tracing::info!("Loaded {} target(s) from {}", urls.len(), arg);
        Ok(urls)
    } else {
        Ok(vec![arg.trim().to_string()])
    }
}
