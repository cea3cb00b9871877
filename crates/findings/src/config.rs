use std::{env, str::FromStr, time::Duration};

use findings_core::finding::MAX_ATTACHMENT_BYTES;

/// Room left in the request body limit for the text fields of a create form.
const FORM_FIELDS_HEADROOM: usize = 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Largest accepted attachment in bytes (default: 15 MiB)
    pub max_attachment_bytes: usize,
    /// Per-request timeout in seconds (default: 30)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MAX_ATTACHMENT_BYTES` - Largest accepted attachment (default: 15728640)
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout in seconds (default: 30)
    pub fn from_env() -> Self {
        Self {
            max_attachment_bytes: env_or("MAX_ATTACHMENT_BYTES", MAX_ATTACHMENT_BYTES),
            request_timeout_seconds: env_or("REQUEST_TIMEOUT_SECONDS", 30),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Maximum accepted request body size.
    pub fn body_limit(&self) -> usize {
        self.max_attachment_bytes.saturating_add(FORM_FIELDS_HEADROOM)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_attachment_bytes: MAX_ATTACHMENT_BYTES,
            request_timeout_seconds: 30,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
