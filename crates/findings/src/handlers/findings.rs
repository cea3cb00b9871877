//! Finding handlers: create (multipart), list, get.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use findings_core::finding::{generate_finding_id, CreatedFinding, Finding, FindingSummary};
use findings_core::serde::now_millis;
use findings_core::storage::{ListLimit, RepositoryError};

use crate::{
    handlers::{AppError, AppResult},
    models::CreateFindingForm,
    state::AppState,
};

/// Query parameter holding the list size.
const LIMIT_PARAM: &str = "limit";

/// First `limit` value of a query string, if any.
///
/// The query is taken as raw pairs so that repeated or non-numeric values
/// fall back to the default instead of rejecting the request.
fn first_limit(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .find(|(key, _)| key == LIMIT_PARAM)
        .map(|(_, value)| value.as_str())
}

/// Create a new finding (POST /api/findings).
///
/// Order of work: read the form, validate required fields, store the
/// attachment, insert the row. A failed insert leaves the stored attachment
/// on disk.
pub async fn create_finding(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<CreatedFinding>)> {
    let multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let form = CreateFindingForm::read(multipart, state.attachments.max_bytes()).await?;

    tracing::debug!(
        request = ?form.request,
        attachment = form.attachment.as_ref().map(|a| a.original_name.as_str()),
        "Received create finding request"
    );

    let new_finding = form.request.validate()?;

    let attachment = match form.attachment {
        Some(upload) => Some(
            state
                .attachments
                .store(&upload.bytes, &upload.original_name)
                .await?,
        ),
        None => None,
    };

    let finding = new_finding.into_finding(generate_finding_id(), now_millis(), attachment);

    if let Err(e) = state.finding_repo.create_finding(&finding).await {
        if let Some(path) = &finding.attachment_path {
            tracing::warn!(
                attachment_path = %path,
                finding_id = %finding.id,
                "Finding insert failed after attachment was stored; attachment left orphaned"
            );
        }
        return Err(e.into());
    }

    tracing::info!(
        finding_id = %finding.id,
        title = %finding.title,
        severity = %finding.severity,
        attachment = finding.attachment_path.as_deref().unwrap_or("-"),
        "Created new finding"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreatedFinding {
            id: finding.id,
            created_at: finding.created_at,
        }),
    ))
}

/// List the newest findings (GET /api/findings?limit=N).
pub async fn list_findings(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<FindingSummary>>> {
    let limit = ListLimit::parse(first_limit(&params));
    let findings = state.finding_repo.list_recent_findings(limit).await?;

    tracing::debug!(limit = limit.get(), count = findings.len(), "Listed findings");

    Ok(Json(findings))
}

/// Get a single finding (GET /api/findings/{id}).
pub async fn get_finding(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Finding>> {
    state
        .finding_repo
        .get_finding(&id)
        .await?
        .map(Json)
        .ok_or_else(|| RepositoryError::finding_not_found(id).into())
}
