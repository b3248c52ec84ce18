//! CRLF / response header injection
//!
//! Confirmed only from what the server actually sends back: an injected
//! header (or a body split) carrying the per-attempt token.

pub mod payloads;
pub mod scanner;
pub mod verdict;

pub use scanner::CrlfScanner;
