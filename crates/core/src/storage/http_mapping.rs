//! Pure functions for mapping repository errors to HTTP status codes.
//!
//! Only a missing record is visible to clients as such; every other storage
//! failure is a persistence error and surfaces as a generic 500.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - everything else -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use findings_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::finding_not_found("abc-123");
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::AlreadyExists { .. }
        | RepositoryError::ConnectionFailed(_)
        | RepositoryError::QueryFailed(_)
        | RepositoryError::InvalidData(_) => 500,
    }
}
