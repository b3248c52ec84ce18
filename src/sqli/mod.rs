//! SQL injection
//!
//! Three channels per target, always in this order on one work item:
//!
//! 1. **Error-based**: a DBMS error signature appears that the unmodified
//!    page does not already contain.
//! 2. **Time-based**: a sleep payload delays the response past a threshold
//!    calibrated from baseline latency, twice in a row.
//! 3. **Boolean-based**: true and false conditions produce clearly different
//!    pages while the true page stays close to the original.
//!
//! The thresholds below are empirical. Changing them shifts the
//! false-positive rate without any visible signal.

pub mod boolean;
pub mod error;
pub mod payloads;
pub mod scanner;
pub mod signatures;
pub mod time;

pub use payloads::{BooleanPair, TimePayload};
pub use scanner::SqliScanner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dbms {
    MySQL,
    PostgreSQL,
    MSSQL,
    Oracle,
    SQLite,
}

impl std::fmt::Display for Dbms {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dbms::MySQL => write!(f, "MySQL"),
            Dbms::PostgreSQL => write!(f, "PostgreSQL"),
            Dbms::MSSQL => write!(f, "MSSQL"),
            Dbms::Oracle => write!(f, "Oracle"),
            Dbms::SQLite => write!(f, "SQLite"),
        }
    }
}
