//! Create-finding request payload and its validation.
//!
//! The server fills a [`CreateFindingRequest`] from multipart form fields and
//! validates it into a [`NewFinding`]. Validation is fail-fast: the first
//! missing required field, in [`REQUIRED_FIELDS`] order, is reported.

use chrono::{DateTime, Utc};

use super::error::ValidationError;
use super::types::{Finding, StoredAttachment};

/// Required form fields, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 11] = [
    "title",
    "date",
    "type",
    "severity",
    "environment",
    "area",
    "reporter",
    "expected",
    "actual",
    "steps",
    "status",
];

/// Raw create-finding form values, keyed by their form field names.
///
/// Every field is optional at this stage; a later call to
/// [`CreateFindingRequest::validate`] enforces presence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateFindingRequest {
    pub title: Option<String>,
    pub date: Option<String>,
    pub kind: Option<String>,
    pub severity: Option<String>,
    pub priority: Option<String>,
    pub environment: Option<String>,
    pub area: Option<String>,
    pub reporter: Option<String>,
    pub version: Option<String>,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub steps: Option<String>,
    pub evidence_url: Option<String>,
    pub status: Option<String>,
    pub assignee: Option<String>,
    pub tags: Option<String>,
}

impl CreateFindingRequest {
    /// Set a field by its form name. Later values replace earlier ones.
    ///
    /// Returns `false` if `name` is not a known field; the value is dropped.
    pub fn set_field(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "title" => &mut self.title,
            "date" => &mut self.date,
            "type" => &mut self.kind,
            "severity" => &mut self.severity,
            "priority" => &mut self.priority,
            "environment" => &mut self.environment,
            "area" => &mut self.area,
            "reporter" => &mut self.reporter,
            "version" => &mut self.version,
            "expected" => &mut self.expected,
            "actual" => &mut self.actual,
            "steps" => &mut self.steps,
            "evidenceUrl" => &mut self.evidence_url,
            "status" => &mut self.status,
            "assignee" => &mut self.assignee,
            "tags" => &mut self.tags,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Builder-style variant of [`set_field`](Self::set_field).
    pub fn with_field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_field(name, value.into());
        self
    }

    /// Check required fields and normalize optional ones.
    pub fn validate(self) -> Result<NewFinding, ValidationError> {
        Ok(NewFinding {
            title: required(self.title, "title")?,
            date: required(self.date, "date")?,
            kind: required(self.kind, "type")?,
            severity: required(self.severity, "severity")?,
            environment: required(self.environment, "environment")?,
            area: required(self.area, "area")?,
            reporter: required(self.reporter, "reporter")?,
            expected: required(self.expected, "expected")?,
            actual: required(self.actual, "actual")?,
            steps: required(self.steps, "steps")?,
            status: required(self.status, "status")?,
            priority: optional(self.priority),
            version: optional(self.version),
            evidence_url: optional(self.evidence_url),
            assignee: optional(self.assignee),
            tags: optional(self.tags),
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(ValidationError::MissingField(field))
}

// Blank optional inputs are stored as NULL.
fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// A validated create request, not yet assigned an id or timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFinding {
    pub title: String,
    pub date: String,
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
    pub status: String,
    pub assignee: Option<String>,
    pub tags: Option<String>,
}

impl NewFinding {
    /// Assemble the full record.
    pub fn into_finding(
        self,
        id: String,
        created_at: DateTime<Utc>,
        attachment: Option<StoredAttachment>,
    ) -> Finding {
        let (attachment_name, attachment_path) = match attachment {
            Some(a) => (optional(Some(a.original_name)), Some(a.url)),
            None => (None, None),
        };

        Finding {
            id,
            created_at,
            title: self.title,
            date: self.date,
            kind: self.kind,
            severity: self.severity,
            priority: self.priority,
            environment: self.environment,
            area: self.area,
            reporter: self.reporter,
            version: self.version,
            expected: self.expected,
            actual: self.actual,
            steps: self.steps,
            evidence_url: self.evidence_url,
            attachment_name,
            attachment_path,
            status: self.status,
            assignee: self.assignee,
            tags: self.tags,
        }
    }
}
