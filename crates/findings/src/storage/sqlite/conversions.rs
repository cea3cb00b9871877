//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use chrono::{DateTime, Utc};
use rusqlite::Row;

use findings_core::finding::{Finding, FindingSummary};
use findings_core::serde::{format_timestamp, parse_timestamp};

/// Convert a SQLite row to a Finding.
///
/// Expected columns: id, created_at, title, date, type, severity, priority,
/// environment, area, reporter, version, expected, actual, steps,
/// evidence_url, attachment_name, attachment_path, status, assignee, tags
pub fn row_to_finding(row: &Row) -> rusqlite::Result<Finding> {
    let created_at: String = row.get(1)?;

    Ok(Finding {
        id: row.get(0)?,
        created_at: parse_datetime(1, &created_at)?,
        title: row.get(2)?,
        date: row.get(3)?,
        kind: row.get(4)?,
        severity: row.get(5)?,
        priority: row.get(6)?,
        environment: row.get(7)?,
        area: row.get(8)?,
        reporter: row.get(9)?,
        version: row.get(10)?,
        expected: row.get(11)?,
        actual: row.get(12)?,
        steps: row.get(13)?,
        evidence_url: row.get(14)?,
        attachment_name: row.get(15)?,
        attachment_path: row.get(16)?,
        status: row.get(17)?,
        assignee: row.get(18)?,
        tags: row.get(19)?,
    })
}

/// Convert a SQLite row to a FindingSummary.
///
/// Expected columns: id, created_at, title, severity, status, assignee, tags
pub fn row_to_summary(row: &Row) -> rusqlite::Result<FindingSummary> {
    let created_at: String = row.get(1)?;

    Ok(FindingSummary {
        id: row.get(0)?,
        created_at: parse_datetime(1, &created_at)?,
        title: row.get(2)?,
        severity: row.get(3)?,
        status: row.get(4)?,
        assignee: row.get(5)?,
        tags: row.get(6)?,
    })
}

/// Format a timestamp for the `created_at` column.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    format_timestamp(dt)
}

fn parse_datetime(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    parse_timestamp(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}
