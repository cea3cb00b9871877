use async_trait::async_trait;

use crate::finding::{Finding, FindingSummary};

use super::{ListLimit, Result};

/// Repository for finding records.
#[async_trait]
pub trait FindingRepository: Send + Sync {
    /// Inserts a fully populated finding.
    async fn create_finding(&self, finding: &Finding) -> Result<()>;

    /// Gets the newest findings first, at most `limit` of them.
    async fn list_recent_findings(&self, limit: ListLimit) -> Result<Vec<FindingSummary>>;

    /// Gets a finding by its id.
    async fn get_finding(&self, id: &str) -> Result<Option<Finding>>;

    /// Checks that the backing store answers queries.
    async fn ping(&self) -> Result<()>;

    /// Flushes pending writes to durable storage before shutdown.
    async fn flush(&self) -> Result<()>;
}
