//! SQLite repository implementation.
//!
//! Implements `FindingRepository` from `findings_core::storage` using SQLite.

use std::path::Path;

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use findings_core::finding::{Finding, FindingSummary};
use findings_core::storage::{FindingRepository, ListLimit, RepositoryError, Result};

use super::conversions::{format_datetime, row_to_finding, row_to_summary};
use super::error::map_tokio_rusqlite_error;
use super::schema;

const ENTITY: &str = "Finding";

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based finding repository.
///
/// All statements run on the single background thread owned by the
/// `tokio_rusqlite::Connection`, so writes are serialized.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (or creates) a file-based database in WAL mode.
    ///
    /// Schema tables are created automatically.
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        conn.call(|conn| {
            let mode: String = conn
                .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
                .map_err(wrap_err)?;
            tracing::debug!(journal_mode = %mode, "SQLite journal mode set");
            Ok(())
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, ""))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

#[async_trait]
impl FindingRepository for SqliteRepository {
    async fn create_finding(&self, finding: &Finding) -> Result<()> {
        let f = finding.clone();
        let created_at = format_datetime(&f.created_at);
        let finding_id = f.id.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_FINDING,
                    rusqlite::params![
                        f.id,
                        created_at,
                        f.title,
                        f.date,
                        f.kind,
                        f.severity,
                        f.priority,
                        f.environment,
                        f.area,
                        f.reporter,
                        f.version,
                        f.expected,
                        f.actual,
                        f.steps,
                        f.evidence_url,
                        f.attachment_name,
                        f.attachment_path,
                        f.status,
                        f.assignee,
                        f.tags
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, finding_id))
    }

    async fn list_recent_findings(&self, limit: ListLimit) -> Result<Vec<FindingSummary>> {
        let limit = limit.get();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare_cached(schema::SELECT_RECENT_FINDINGS)
                    .map_err(wrap_err)?;
                let rows = stmt.query_map([limit], row_to_summary).map_err(wrap_err)?;

                let mut findings = Vec::new();
                for row_result in rows {
                    findings.push(row_result.map_err(wrap_err)?);
                }
                Ok(findings)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, ""))
    }

    async fn get_finding(&self, id: &str) -> Result<Option<Finding>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare_cached(schema::SELECT_FINDING_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_finding) {
                    Ok(finding) => Ok(Some(finding)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, id))
    }

    async fn ping(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.query_row(schema::PING, [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, ""))
    }

    async fn flush(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                // Returns (busy, log frames, checkpointed frames); -1s for non-WAL databases.
                let (busy, log, checkpointed): (i64, i64, i64) = conn
                    .query_row(schema::CHECKPOINT_WAL, [], |row| {
                        Ok((row.get(0)?, row.get(1)?, row.get(2)?))
                    })
                    .map_err(wrap_err)?;
                tracing::debug!(busy, log, checkpointed, "WAL checkpoint complete");
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY, ""))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn finding(id: &str, created_at: chrono::DateTime<Utc>) -> Finding {
        Finding {
            id: id.to_string(),
            created_at,
            title: format!("Finding {id}"),
            date: "2026-10-18".to_string(),
            kind: "bug".to_string(),
            severity: "high".to_string(),
            priority: None,
            environment: "staging".to_string(),
            area: "editor".to_string(),
            reporter: "qa".to_string(),
            version: None,
            expected: "works".to_string(),
            actual: "broken".to_string(),
            steps: "1. do it".to_string(),
            evidence_url: None,
            attachment_name: None,
            attachment_path: None,
            status: "open".to_string(),
            assignee: None,
            tags: None,
        }
    }

    fn base_time() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let mut f = finding("aaaaaaaaaaaa", base_time());
        f.priority = Some("P1".to_string());
        f.attachment_name = Some("trace.log".to_string());
        f.attachment_path = Some("/uploads/evidence-1-abcdef.log".to_string());

        repo.create_finding(&f).await.unwrap();

        let loaded = repo.get_finding("aaaaaaaaaaaa").await.unwrap();
        assert_eq!(loaded, Some(f));
    }

    #[tokio::test]
    async fn test_optional_fields_round_trip_as_none() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        repo.create_finding(&finding("bbbbbbbbbbbb", base_time()))
            .await
            .unwrap();

        let loaded = repo.get_finding("bbbbbbbbbbbb").await.unwrap().unwrap();
        assert_eq!(loaded.priority, None);
        assert_eq!(loaded.version, None);
        assert_eq!(loaded.evidence_url, None);
        assert_eq!(loaded.attachment_name, None);
        assert_eq!(loaded.attachment_path, None);
        assert_eq!(loaded.assignee, None);
        assert_eq!(loaded.tags, None);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        assert_eq!(repo.get_finding("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_already_exists() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let f = finding("dupdupdupdup", base_time());
        repo.create_finding(&f).await.unwrap();

        let err = repo.create_finding(&f).await.unwrap_err();

        assert_eq!(
            err,
            RepositoryError::AlreadyExists {
                entity_type: "Finding",
                id: "dupdupdupdup".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        // Insert out of chronological order.
        for (id, minutes) in [("m2", 2), ("m0", 0), ("m5", 5), ("m1", 1)] {
            repo.create_finding(&finding(id, base_time() + Duration::minutes(minutes)))
                .await
                .unwrap();
        }

        let listed = repo.list_recent_findings(ListLimit::default()).await.unwrap();
        let ids: Vec<&str> = listed.iter().map(|s| s.id.as_str()).collect();

        assert_eq!(ids, vec!["m5", "m2", "m1", "m0"]);
    }

    #[tokio::test]
    async fn test_list_ties_break_by_insertion_newest_first() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        for id in ["first", "second", "third"] {
            repo.create_finding(&finding(id, base_time())).await.unwrap();
        }

        let listed = repo.list_recent_findings(ListLimit::default()).await.unwrap();
        let ids: Vec<&str> = listed.iter().map(|s| s.id.as_str()).collect();

        assert_eq!(ids, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_list_respects_limit() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        for i in 0..5 {
            repo.create_finding(&finding(
                &format!("id{i}"),
                base_time() + Duration::seconds(i),
            ))
            .await
            .unwrap();
        }

        let listed = repo.list_recent_findings(ListLimit::new(2)).await.unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, "id4");
        assert_eq!(listed[1].id, "id3");
    }

    #[tokio::test]
    async fn test_list_projection() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        let mut f = finding("proj", base_time());
        f.assignee = Some("dev".to_string());
        f.tags = Some("a,b".to_string());
        repo.create_finding(&f).await.unwrap();

        let listed = repo.list_recent_findings(ListLimit::default()).await.unwrap();

        assert_eq!(listed, vec![FindingSummary::from(&f)]);
    }

    #[tokio::test]
    async fn test_file_database_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("findings.db");

        {
            let repo = SqliteRepository::new(&path).await.unwrap();
            repo.create_finding(&finding("persisted", base_time()))
                .await
                .unwrap();
            repo.flush().await.unwrap();
        }

        let repo = SqliteRepository::new(&path).await.unwrap();
        let loaded = repo.get_finding("persisted").await.unwrap();
        assert!(loaded.is_some());
    }

    #[tokio::test]
    async fn test_ping_and_flush_in_memory() {
        let repo = SqliteRepository::new_in_memory().await.unwrap();
        repo.ping().await.unwrap();
        repo.flush().await.unwrap();
    }
}
