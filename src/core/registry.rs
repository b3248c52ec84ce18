//! Scanner selection: menu keys, names and enum dispatch

use crate::core::config::ScanConfig;
use crate::core::context::Backends;
use crate::crlf::CrlfScanner;
use crate::lfi::LfiScanner;
use crate::redirect::RedirectScanner;
use crate::reporting::model::ScanResult;
use crate::sqli::SqliScanner;
use crate::xss::XssScanner;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScannerKind {
    Lfi,
    Redirect,
    Sqli,
    Xss,
    Crlf,
}

impl ScannerKind {
    /// Menu order
    pub const ALL: [ScannerKind; 5] = [
        ScannerKind::Lfi,
        ScannerKind::Redirect,
        ScannerKind::Sqli,
        ScannerKind::Xss,
        ScannerKind::Crlf,
    ];

    pub fn menu_key(&self) -> &'static str {
        match self {
            ScannerKind::Lfi => "1",
            ScannerKind::Redirect => "2",
            ScannerKind::Sqli => "3",
            ScannerKind::Xss => "4",
            ScannerKind::Crlf => "5",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScannerKind::Lfi => "lfi",
            ScannerKind::Redirect => "redirect",
            ScannerKind::Sqli => "sqli",
            ScannerKind::Xss => "xss",
            ScannerKind::Crlf => "crlf",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScannerKind::Lfi => "LFI",
            ScannerKind::Redirect => "Open Redirect",
            ScannerKind::Sqli => "SQL Injection",
            ScannerKind::Xss => "XSS (Reflected)",
            ScannerKind::Crlf => "CRLF Injection",
        }
    }

    pub fn cwe(&self) -> &'static str {
        match self {
            ScannerKind::Lfi => "CWE-98",
            ScannerKind::Redirect => "CWE-601",
            ScannerKind::Sqli => "CWE-89",
            ScannerKind::Xss => "CWE-79",
            ScannerKind::Crlf => "CWE-93",
        }
    }

    /// Accepts a menu key ("1".."5") or a scanner name, case-insensitive
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.menu_key() == key || k.name().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for ScannerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScannerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| {
            format!(
                "unknown scanner '{}', expected 1-5 or one of: lfi, redirect, sqli, xss, crlf",
                s
            )
        })
    }
}

pub enum AnyScanner {
    Lfi(LfiScanner),
    Redirect(RedirectScanner),
    Sqli(SqliScanner),
    Xss(XssScanner),
    Crlf(CrlfScanner),
}

impl AnyScanner {
    pub fn new(kind: ScannerKind, backends: Backends) -> Self {
        match kind {
            ScannerKind::Lfi => AnyScanner::Lfi(LfiScanner::new().with_backends(backends)),
            ScannerKind::Redirect => {
                AnyScanner::Redirect(RedirectScanner::new().with_backends(backends))
            }
            ScannerKind::Sqli => AnyScanner::Sqli(SqliScanner::new().with_backends(backends)),
            ScannerKind::Xss => AnyScanner::Xss(XssScanner::new().with_backends(backends)),
            ScannerKind::Crlf => AnyScanner::Crlf(CrlfScanner::new().with_backends(backends)),
        }
    }

    pub fn kind(&self) -> ScannerKind {
        match self {
            AnyScanner::Lfi(_) => ScannerKind::Lfi,
            AnyScanner::Redirect(_) => ScannerKind::Redirect,
            AnyScanner::Sqli(_) => ScannerKind::Sqli,
            AnyScanner::Xss(_) => ScannerKind::Xss,
            AnyScanner::Crlf(_) => ScannerKind::Crlf,
        }
    }

    pub async fn scan(&self, config: &ScanConfig) -> Vec<ScanResult> {
        match self {
            AnyScanner::Lfi(s) => s.scan(config).await,
            AnyScanner::Redirect(s) => s.scan(config).await,
            AnyScanner::Sqli(s) => s.scan(config).await,
            AnyScanner::Xss(s) => s.scan(config).await,
            AnyScanner::Crlf(s) => s.scan(config).await,
        }
    }
}
