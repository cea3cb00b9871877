//! Application state shared by all request handlers.
//!
//! Everything process-wide (the repository handle, the attachment store and
//! the limits) lives here and is constructed once at startup.

use std::{path::Path, sync::Arc, time::Duration};

use anyhow::Context;

use findings_core::storage::FindingRepository;

use crate::{attachments::AttachmentStore, config::Config, storage::SqliteRepository};

/// Database file name inside the data directory.
pub const DATABASE_FILE: &str = "findings.db";
/// Attachment directory name inside the data directory.
pub const UPLOADS_DIR: &str = "uploads";

/// Shared application state.
///
/// Cloned for each request handler; clones share the same resources.
#[derive(Clone)]
pub struct AppState {
    /// Finding repository.
    pub finding_repo: Arc<dyn FindingRepository>,
    /// Attachment store served under `/uploads`.
    pub attachments: Arc<AttachmentStore>,
    /// Maximum accepted request body size.
    pub body_limit: usize,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates a new AppState from already-initialized parts.
    pub fn new(
        finding_repo: Arc<dyn FindingRepository>,
        attachments: AttachmentStore,
        config: &Config,
    ) -> Self {
        Self {
            finding_repo,
            attachments: Arc::new(attachments),
            body_limit: config.body_limit(),
            request_timeout: config.request_timeout(),
        }
    }

    /// Prepares the data directory and opens the SQLite database inside it.
    ///
    /// Creates `<data_dir>/uploads` and `<data_dir>/findings.db` if absent.
    pub async fn open(data_dir: &Path, config: &Config) -> anyhow::Result<Self> {
        let attachments =
            AttachmentStore::init(data_dir.join(UPLOADS_DIR), config.max_attachment_bytes)
                .await
                .with_context(|| format!("failed to create upload directory in {}", data_dir.display()))?;

        let db_path = data_dir.join(DATABASE_FILE);
        let repo = SqliteRepository::new(&db_path)
            .await
            .with_context(|| format!("failed to open database {}", db_path.display()))?;

        tracing::info!(
            database = %db_path.display(),
            uploads = %attachments.upload_dir().display(),
            max_attachment_bytes = config.max_attachment_bytes,
            "Storage ready"
        );

        Ok(Self::new(Arc::new(repo), attachments, config))
    }

    /// Flushes storage before the process exits.
    pub async fn shutdown(&self) {
        match self.finding_repo.flush().await {
            Ok(()) => tracing::info!("Storage flushed"),
            Err(e) => tracing::error!(error = %e, "Failed to flush storage on shutdown"),
        }
    }
}
