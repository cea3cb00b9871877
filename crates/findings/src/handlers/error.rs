use axum::{
    body::{self, Body},
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use findings_core::finding::ValidationError;
use findings_core::storage::{repository_error_to_status_code, RepositoryError};

use crate::attachments::AttachmentError;

/// Application-level error type for HTTP handlers.
///
/// Every variant renders as `{"error": "<message>"}`. Server-side failures
/// are logged with full detail and reported to clients as `"Server error"`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A required form field was missing or empty.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A storage error (not-found or persistence failure).
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The attachment could not be stored.
    #[error(transparent)]
    Attachment(#[from] AttachmentError),

    /// The request body exceeded the configured limit.
    #[error("Payload too large")]
    PayloadTooLarge,

    /// A malformed request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const SERVER_ERROR: &str = "Server error";
const FILE_TOO_LARGE: &str = "File too large";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(err) => {
                tracing::warn!(error = %err, "Rejected finding");
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            AppError::Repository(err) => {
                let status = StatusCode::from_u16(repository_error_to_status_code(err))
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status == StatusCode::NOT_FOUND {
                    (status, "Not found".to_string())
                } else {
                    tracing::error!(error = %err, "Repository error");
                    (status, SERVER_ERROR.to_string())
                }
            }
            AppError::Attachment(AttachmentError::TooLarge { limit }) => {
                tracing::warn!(limit, "Attachment too large");
                (StatusCode::PAYLOAD_TOO_LARGE, FILE_TOO_LARGE.to_string())
            }
            AppError::Attachment(err) => {
                tracing::error!(error = %err, "Attachment error");
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR.to_string())
            }
            AppError::PayloadTooLarge => {
                tracing::warn!("Request body too large");
                (StatusCode::PAYLOAD_TOO_LARGE, FILE_TOO_LARGE.to_string())
            }
            AppError::BadRequest(msg) => {
                tracing::warn!(message = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, msg.clone())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Largest plain-text error body carried over into a JSON error message.
const MAX_ERROR_TEXT: usize = 16 * 1024;

/// Middleware giving every error response the `{"error": "<message>"}` shape.
///
/// Handler errors already have it. This catches the rest: extractor
/// rejections, unmatched routes and methods, missing uploads, and the
/// timeout layer's empty 408.
pub async fn json_error_responses(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !(status.is_client_error() || status.is_server_error()) || is_json(&response) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let message = if status.is_server_error() {
        SERVER_ERROR.to_string()
    } else {
        match body::to_bytes(body, MAX_ERROR_TEXT).await {
            Ok(text) if !text.is_empty() => String::from_utf8_lossy(&text).into_owned(),
            _ => status.canonical_reason().unwrap_or("Request failed").to_string(),
        }
    };

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    let body = Body::from(json!({ "error": message }).to_string());

    Response::from_parts(parts, body)
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}
