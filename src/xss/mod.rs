//! Reflected XSS
//!
//! Reflection is only a filter. A finding requires a real browser to open a
//! native dialog when loading the payload URL.

pub mod payloads;
pub mod scanner;
pub mod verdict;

pub use scanner::XssScanner;
