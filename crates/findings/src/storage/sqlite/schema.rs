//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Column order in the SELECT statements is what
//! `conversions` reads by index.

/// SQL statement to create the findings table and its index.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS findings (
    id TEXT PRIMARY KEY,
    created_at TEXT NOT NULL,
    title TEXT NOT NULL,
    date TEXT NOT NULL,
    type TEXT NOT NULL,
    severity TEXT NOT NULL,
    priority TEXT,
    environment TEXT NOT NULL,
    area TEXT NOT NULL,
    reporter TEXT NOT NULL,
    version TEXT,
    expected TEXT NOT NULL,
    actual TEXT NOT NULL,
    steps TEXT NOT NULL,
    evidence_url TEXT,
    attachment_name TEXT,
    attachment_path TEXT,
    status TEXT NOT NULL,
    assignee TEXT,
    tags TEXT
);

CREATE INDEX IF NOT EXISTS idx_findings_created_at ON findings(created_at);
"#;

pub const INSERT_FINDING: &str = r#"
INSERT INTO findings (
    id, created_at, title, date, type, severity, priority,
    environment, area, reporter, version, expected, actual, steps,
    evidence_url, attachment_name, attachment_path, status, assignee, tags
) VALUES (
    ?1, ?2, ?3, ?4, ?5, ?6, ?7,
    ?8, ?9, ?10, ?11, ?12, ?13, ?14,
    ?15, ?16, ?17, ?18, ?19, ?20
)
"#;

pub const SELECT_FINDING_BY_ID: &str = r#"
SELECT id, created_at, title, date, type, severity, priority,
       environment, area, reporter, version, expected, actual, steps,
       evidence_url, attachment_name, attachment_path, status, assignee, tags
FROM findings
WHERE id = ?1
"#;

// rowid breaks ties between findings created in the same millisecond.
pub const SELECT_RECENT_FINDINGS: &str = r#"
SELECT id, created_at, title, severity, status, assignee, tags
FROM findings
ORDER BY created_at DESC, rowid DESC
LIMIT ?1
"#;

pub const PING: &str = "SELECT 1";

pub const CHECKPOINT_WAL: &str = "PRAGMA wal_checkpoint(TRUNCATE)";
