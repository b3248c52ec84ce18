//! Open redirect
//!
//! Tier 1 reads the `Location` of a 3xx answer. Tier 2, only when tier 1
//! saw nothing, lets a real browser follow client-side redirects and
//! checks where it lands.

pub mod payloads;
pub mod scanner;
pub mod verdict;

pub use scanner::RedirectScanner;
