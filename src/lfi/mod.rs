//! Local File Inclusion
//!
//! A candidate is confirmed only when the response carries the content of
//! the file the payload aimed at: at least two independent signature lines
//! of that file, on a response that differs from the soft-404 baseline.
//! `php://filter` payloads are additionally confirmed by base64-armored PHP.

pub mod candidates;
pub mod payloads;
pub mod scanner;
pub mod signatures;
pub mod verdict;

pub use payloads::LfiPayload;
pub use scanner::LfiScanner;
pub use signatures::FileSignature;
