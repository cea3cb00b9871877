use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored finding (defect report).
///
/// JSON field names match the storage column names. Optional attributes are
/// `None` when they were not supplied and serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    #[serde(with = "crate::serde::iso_millis")]
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: String,
    pub priority: Option<String>,
    pub environment: String,
    pub area: String,
    pub reporter: String,
    pub version: Option<String>,
    pub expected: String,
    pub actual: String,
    pub steps: String,
    pub evidence_url: Option<String>,
    pub attachment_name: Option<String>,
    pub attachment_path: Option<String>,
    pub status: String,
    pub assignee: Option<String>,
    pub tags: Option<String>,
}

/// List projection of a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindingSummary {
    pub id: String,
    #[serde(with = "crate::serde::iso_millis")]
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub severity: String,
    pub status: String,
    pub assignee: Option<String>,
    pub tags: Option<String>,
}

impl From<&Finding> for FindingSummary {
    fn from(finding: &Finding) -> Self {
        Self {
            id: finding.id.clone(),
            created_at: finding.created_at,
            title: finding.title.clone(),
            severity: finding.severity.clone(),
            status: finding.status.clone(),
            assignee: finding.assignee.clone(),
            tags: finding.tags.clone(),
        }
    }
}

/// Response body of a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedFinding {
    pub id: String,
    #[serde(with = "crate::serde::iso_millis")]
    pub created_at: DateTime<Utc>,
}

/// An attachment that has been written to the attachment store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAttachment {
    /// Filename as uploaded by the client.
    pub original_name: String,
    /// Generated name on disk.
    pub stored_name: String,
    /// Server-relative URL (`/uploads/<stored_name>`).
    pub url: String,
}
