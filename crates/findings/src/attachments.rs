//! Filesystem attachment store.
//!
//! Blobs live flat in one upload directory under generated names, and the
//! directory is served read-only at `/uploads`. Nothing is ever deleted.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::{fs, io::AsyncWriteExt};

use findings_core::finding::{attachment_url, generate_stored_name, StoredAttachment};
use findings_core::serde::now_millis;

/// Errors raised while storing an attachment.
#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("Attachment exceeds {limit} bytes")]
    TooLarge { limit: usize },
    #[error("Failed to write attachment {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Attachment store rooted at an upload directory.
#[derive(Debug, Clone)]
pub struct AttachmentStore {
    upload_dir: PathBuf,
    max_bytes: usize,
}

impl AttachmentStore {
    /// Creates the upload directory if needed and returns a store over it.
    pub async fn init(upload_dir: impl Into<PathBuf>, max_bytes: usize) -> std::io::Result<Self> {
        let upload_dir = upload_dir.into();
        fs::create_dir_all(&upload_dir).await?;
        Ok(Self {
            upload_dir,
            max_bytes,
        })
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    /// Largest accepted attachment in bytes.
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Writes `bytes` under a freshly generated name.
    ///
    /// The file is created exclusively, so an existing blob is never
    /// overwritten even if two uploads generate the same name.
    pub async fn store(
        &self,
        bytes: &[u8],
        original_name: &str,
    ) -> Result<StoredAttachment, AttachmentError> {
        if bytes.len() > self.max_bytes {
            return Err(AttachmentError::TooLarge {
                limit: self.max_bytes,
            });
        }

        let stored_name = generate_stored_name(now_millis(), original_name);
        let path = self.upload_dir.join(&stored_name);

        write_new_file(&path, bytes)
            .await
            .map_err(|source| AttachmentError::Io {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(
            stored_name = %stored_name,
            original_name = %original_name,
            size = bytes.len(),
            "Stored attachment"
        );

        Ok(StoredAttachment {
            original_name: original_name.to_string(),
            url: attachment_url(&stored_name),
            stored_name,
        })
    }
}

async fn write_new_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}
