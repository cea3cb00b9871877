use axum::{
    extract::multipart::{Field, Multipart, MultipartError},
    http::StatusCode,
};

use findings_core::finding::CreateFindingRequest;

use crate::{
    attachments::AttachmentError,
    handlers::{AppError, AppResult},
};

/// Multipart field name carrying the attachment file.
pub const ATTACHMENT_FIELD: &str = "attachment";

/// An attachment received in a create request, not yet written to disk.
#[derive(Debug)]
pub struct AttachmentUpload {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

/// Server-side create-finding submission read from a multipart body.
///
/// Text parts fill the core `CreateFindingRequest`; at most one file part,
/// named `attachment`, is buffered up to the attachment size limit.
#[derive(Debug)]
pub struct CreateFindingForm {
    pub request: CreateFindingRequest,
    pub attachment: Option<AttachmentUpload>,
}

impl CreateFindingForm {
    /// Drain a multipart body into a form.
    ///
    /// A blank file input (empty filename and no content) counts as no
    /// attachment. Unknown text fields are ignored.
    pub async fn read(mut multipart: Multipart, max_attachment_bytes: usize) -> AppResult<Self> {
        let mut request = CreateFindingRequest::default();
        let mut attachment: Option<AttachmentUpload> = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().unwrap_or_default().to_string();

            let Some(file_name) = field.file_name().map(str::to_string) else {
                let value = field.text().await.map_err(multipart_error)?;
                if !request.set_field(&name, value) {
                    tracing::debug!(field = %name, "Ignoring unknown form field");
                }
                continue;
            };

            if name != ATTACHMENT_FIELD {
                return Err(AppError::BadRequest(format!(
                    "Unexpected file field: {name}"
                )));
            }

            let bytes = read_limited(field, max_attachment_bytes).await?;
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }

            if attachment.is_some() {
                return Err(AppError::BadRequest(
                    "Only one attachment is allowed".to_string(),
                ));
            }
            attachment = Some(AttachmentUpload {
                original_name: file_name,
                bytes,
            });
        }

        Ok(Self {
            request,
            attachment,
        })
    }
}

/// Buffer a file part, failing as soon as it grows past `limit`.
async fn read_limited(mut field: Field<'_>, limit: usize) -> AppResult<Vec<u8>> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if bytes.len() + chunk.len() > limit {
            return Err(AttachmentError::TooLarge { limit }.into());
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::BadRequest(err.body_text())
    }
}
