//! Confirmation-driven web vulnerability prober.
//!
//! Each scanner fans the target × payload cross product out over a bounded
//! pool of tokio tasks and reports a [`ScanResult`] only for findings that a
//! verdict heuristic positively confirmed.
//!
//! ```no_run
//! # async fn demo() {
//! use loxs::{AnyScanner, Backends, ScanConfig, ScannerKind};
//!
//! let config = ScanConfig::builder()
//!     .urls(vec!["https://example.com/page?file="])
//!     .with_concurrency(10)
//!     .build();
//! let results = AnyScanner::new(ScannerKind::Lfi, Backends::default())
//!     .scan(&config)
//!     .await;
//! # }
//! ```

pub mod browser;
pub mod cli;
pub mod core;
pub mod crlf;
pub mod http;
pub mod lfi;
pub mod payload;
pub mod redirect;
pub mod reporting;
pub mod sqli;
pub mod validation;
pub mod xss;

pub use crate::core::config::ScanConfig;
pub use crate::core::context::Backends;
pub use crate::core::registry::{AnyScanner, ScannerKind};
pub use crate::reporting::model::ScanResult;
