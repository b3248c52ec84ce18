//! DBMS error message tables

use crate::sqli::Dbms;
use once_cell::sync::Lazy;
use regex::Regex;

pub struct ErrorSignatures {
    pub dbms: Dbms,
    pub patterns: Vec<Regex>,
}

const RAW: &[(Dbms, &[&str])] = &[
    (
        Dbms::MySQL,
        &[
            r"SQL syntax.*MySQL",
            r"Warning.*mysql_",
            r"MySqlException",
            r"valid MySQL result",
            r"check the manual that corresponds to your (MySQL|MariaDB) server version",
            r"MySqlClient\.",
            r"com\.mysql\.jdbc",
            r"Unclosed quotation mark after the character string",
        ],
    ),
    (
        Dbms::PostgreSQL,
        &[
            r"PostgreSQL.*ERROR",
            r"Warning.*\Wpg_",
            r"valid PostgreSQL result",
            r"Npgsql\.",
            r"PG::SyntaxError:",
            r"org\.postgresql\.util\.PSQLException",
            r"ERROR:\s+syntax error at or near",
        ],
    ),
    (
        Dbms::MSSQL,
        &[
            r"Driver.* SQL[\-_ ]*Server",
            r"OLE DB.* SQL Server",
            r"\bSQL Server[^&lt;]+Driver",
            r"Warning.*mssql_",
            r"\bSQL Server[^&lt;]+[0-9a-fA-F]{8}",
            r"System\.Data\.SqlClient\.",
            r"Exception.*\WSystem\.Data\.SqlClient\.",
            r"Unclosed quotation mark after the character string",
            r"com\.microsoft\.sqlserver\.jdbc",
        ],
    ),
    (
        Dbms::Oracle,
        &[
            r"\bORA-[0-9][0-9][0-9][0-9]",
            r"Oracle error",
            r"Oracle.*Driver",
            r"Warning.*\Woci_",
            r"Warning.*\Wora_",
            r"oracle\.jdbc\.driver",
            r"quoted string not properly terminated",
        ],
    ),
    (
        Dbms::SQLite,
        &[
            r"SQLite/JDBCDriver",
            r"SQLite\.Exception",
            r"System\.Data\.SQLite\.SQLiteException",
            r"Warning.*sqlite_",
            r"Warning.*SQLite3::",
            r"\[SQLITE_ERROR\]",
            r"SQLite error \d+:",
            r"sqlite3\.OperationalError:",
        ],
    ),
];

/// Compiled once, evaluated in DBMS order
pub static ERROR_SIGNATURES: Lazy<Vec<ErrorSignatures>> = Lazy::new(|| {
    RAW.iter()
        .map(|(dbms, patterns)| ErrorSignatures {
            dbms: *dbms,
            patterns: patterns
                .iter()
                .filter_map(|p| match Regex::new(p) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        tracing::warn!("Dropping invalid {} error signature {}: {}", dbms, p, e);
                        None
                    }
                })
                .collect(),
        })
        .collect()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        let compiled: usize = ERROR_SIGNATURES.iter().map(|s| s.patterns.len()).sum();
        let raw: usize = RAW.iter().map(|(_, p)| p.len()).sum();
        assert_eq!(compiled, raw);
    }

    #[test]
    fn test_dbms_order() {
        let order: Vec<Dbms> = ERROR_SIGNATURES.iter().map(|s| s.dbms).collect();
        assert_eq!(
            order,
            vec![Dbms::MySQL, Dbms::PostgreSQL, Dbms::MSSQL, Dbms::Oracle, Dbms::SQLite]
        );
    }
}
