//! Attachment naming rules.
//!
//! Stored blobs are named `evidence-<unix-millis>-<6 random chars><ext>`, where
//! `<ext>` is taken from the uploaded filename. Only the generated name ever
//! touches the filesystem; the client-supplied name is kept as metadata.

use chrono::{DateTime, Utc};

use super::ids::random_token;

/// Largest accepted attachment, in bytes (15 MiB).
pub const MAX_ATTACHMENT_BYTES: usize = 15 * 1024 * 1024;

/// URL prefix the attachment directory is served under.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

/// Prefix of every stored attachment name.
pub const STORED_NAME_PREFIX: &str = "evidence";

const SUFFIX_LEN: usize = 6;

/// Extension of the final path component of `original_name`, including the dot.
///
/// Returns an empty string when there is no dot, or when the only dot is the
/// first character (`.bashrc`).
pub fn file_extension(original_name: &str) -> &str {
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);

    if base.bytes().all(|b| b == b'.') {
        return "";
    }

    match base.rfind('.') {
        Some(idx) if idx > 0 => &base[idx..],
        _ => "",
    }
}

/// Compose a stored attachment name from its parts.
pub fn stored_attachment_name(millis: i64, suffix: &str, original_name: &str) -> String {
    format!(
        "{STORED_NAME_PREFIX}-{millis}-{suffix}{}",
        file_extension(original_name)
    )
}

/// Generate a fresh stored name for an upload received at `now`.
pub fn generate_stored_name(now: DateTime<Utc>, original_name: &str) -> String {
    let suffix = random_token(&mut rand::rng(), SUFFIX_LEN);
    stored_attachment_name(now.timestamp_millis(), &suffix, original_name)
}

/// Server-relative URL of a stored attachment.
pub fn attachment_url(stored_name: &str) -> String {
    format!("{UPLOADS_URL_PREFIX}/{stored_name}")
}
