pub mod config;
pub mod context;
pub mod error;
pub mod rate_limit;
pub mod registry;
pub mod scheduler;

pub use config::{ScanConfig, ScanConfigBuilder};
pub use error::{Ignored, ProbeError};
pub use registry::{AnyScanner, ScannerKind};
